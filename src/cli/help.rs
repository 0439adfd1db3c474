//! `--help` output
//!
//! The clap command is generated from the option schema so the help text
//! lists exactly what the parser accepts.

use crate::options::{Flag, ValueOption};
use clap::{Arg, ArgAction, Command};

const EXAMPLES: &str = "\
Examples:
  heph-bootstrap --build-dir \"path/to/build\" --build-tests --generator Ninja
  heph-bootstrap --build-docs
  heph-bootstrap --rebuild --build-tests --verbose
  heph-bootstrap --msvc --release --build-tests";

/// Build the clap command describing every recognized option
pub fn command() -> Command {
    let values = ValueOption::ALL.into_iter().map(|option| {
        Arg::new(option.name())
            .long(option.name())
            .value_name(option.value_name())
            .help(option.help())
            .action(ArgAction::Set)
    });
    let flags = Flag::ALL.into_iter().map(|flag| {
        Arg::new(flag.name())
            .long(flag.name())
            .help(flag.help())
            .action(if flag == Flag::Help {
                ArgAction::Help
            } else {
                ArgAction::SetTrue
            })
    });

    Command::new("heph-bootstrap")
        .about("Configure, build and install the project with CMake")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .args(values)
        .args(flags)
        .after_help(EXAMPLES)
}

/// Render the help text
pub fn render_help() -> String {
    command().render_help().to_string()
}
