//! Command-line surface: token parsing and help text

pub mod args;
pub mod help;

pub use args::{parse_args, ParsedArgs};
pub use help::render_help;
