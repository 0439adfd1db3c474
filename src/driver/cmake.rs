//! CMake build driver
//!
//! Runs `cmake` with inherited stdio so the tool's own output reaches the
//! user unchanged.

use crate::driver::{BuildDriver, Invocation};
use crate::error::{BootstrapError, BootstrapResult};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Environment variable overriding the CMake executable
pub const CMAKE_ENV_VAR: &str = "HEPH_CMAKE";

const DEFAULT_PROGRAM: &str = "cmake";

/// Build driver backed by the CMake executable
pub struct CmakeDriver {
    program: String,
}

impl CmakeDriver {
    /// Use `cmake` from PATH
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Use a specific CMake executable
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Use `HEPH_CMAKE` when set and non-empty, otherwise `cmake`
    pub fn from_env() -> Self {
        match std::env::var(CMAKE_ENV_VAR) {
            Ok(program) if !program.trim().is_empty() => Self::with_program(program),
            _ => Self::new(),
        }
    }
}

impl Default for CmakeDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BuildDriver for CmakeDriver {
    async fn execute(&self, invocation: &Invocation) -> BootstrapResult<()> {
        let command = invocation.command_line(&self.program);

        let status = Command::new(&self.program)
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| BootstrapError::command_failed(command.clone(), e))?;

        if status.success() {
            debug!("CMake {} step finished", invocation.stage);
            Ok(())
        } else {
            Err(BootstrapError::CommandStatus {
                command,
                code: status.code(),
            })
        }
    }

    fn program(&self) -> &str {
        &self.program
    }
}
