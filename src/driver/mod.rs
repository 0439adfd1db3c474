//! Build driver abstraction
//!
//! The bootstrapper never compiles anything itself. It hands three
//! invocations (configure, build, install) to a `BuildDriver`; the real
//! implementation shells out to CMake.

mod cmake;

pub use cmake::{CmakeDriver, CMAKE_ENV_VAR};

use crate::error::BootstrapResult;
use crate::options::BuildType;
use async_trait::async_trait;
use std::fmt;
use std::path::Path;

/// Which step of the build an invocation performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Configure,
    Build,
    Install,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configure => "configure",
            Self::Build => "build",
            Self::Install => "install",
        };
        write!(f, "{}", name)
    }
}

/// One call of the build tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub stage: Stage,
    pub args: Vec<String>,
}

impl Invocation {
    /// Generate build files for `source` into `build_dir`
    pub fn configure(source: &Path, build_dir: &Path, cmake_args: &[String]) -> Self {
        let mut args = vec![
            "-S".to_string(),
            source.display().to_string(),
            "-B".to_string(),
            build_dir.display().to_string(),
        ];
        args.extend(cmake_args.iter().cloned());
        Self {
            stage: Stage::Configure,
            args,
        }
    }

    pub fn build(build_dir: &Path, build_type: BuildType) -> Self {
        Self {
            stage: Stage::Build,
            args: vec![
                "--build".to_string(),
                build_dir.display().to_string(),
                "--config".to_string(),
                build_type.to_string(),
            ],
        }
    }

    pub fn install(build_dir: &Path, build_type: BuildType) -> Self {
        Self {
            stage: Stage::Install,
            args: vec![
                "--install".to_string(),
                build_dir.display().to_string(),
                "--config".to_string(),
                build_type.to_string(),
            ],
        }
    }

    /// The full command line as it would be typed
    pub fn command_line(&self, program: &str) -> String {
        std::iter::once(program)
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// External build tool interface
#[async_trait]
pub trait BuildDriver: Send + Sync {
    /// Run one invocation to completion; any failure is fatal for the run
    async fn execute(&self, invocation: &Invocation) -> BootstrapResult<()>;

    /// Program name used in command lines
    fn program(&self) -> &str;
}
