//! Heph bootstrap - CMake build bootstrapper
//!
//! Resolves command-line flags against a cached configuration, then
//! configures, builds and optionally installs the project with CMake.

pub mod bootstrap;
pub mod build_dir;
pub mod cache;
pub mod cli;
pub mod derive;
pub mod driver;
pub mod error;
pub mod options;
pub mod resolve;
pub mod ui;

pub use bootstrap::{Bootstrap, Outcome};
pub use error::{BootstrapError, BootstrapResult, Warning};
