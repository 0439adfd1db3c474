//! Output functions for consistent CLI formatting

use console::{style, Style};
use std::fmt::Display;

/// Prefix of every user-facing line
pub const PREFIX: &str = "[Heph]";

fn line(message: impl Display) -> String {
    format!("{} {}", PREFIX, message)
}

/// Display a progress step
pub fn step(message: impl Display) {
    println!("{}", line(message));
}

/// Display a non-fatal warning
pub fn step_warn(message: impl Display) {
    println!("{}", Style::new().yellow().apply_to(line(message)));
}

/// Display the final success message
pub fn success(message: impl Display) {
    println!("{}", style(line(message)).green());
}

/// Display a fatal error with an optional hint and its cause chain
pub fn error(err: &(dyn std::error::Error + 'static), hint: Option<&str>) {
    eprintln!("{}", style(line(err)).red().bold());

    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  {} {}", style("Caused by:").red(), cause);
        source = cause.source();
    }

    if let Some(hint) = hint {
        eprintln!("  {} {}", style("Hint:").yellow(), hint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_prefixed() {
        assert_eq!(line("Building"), "[Heph] Building");
    }

    #[test]
    fn output_does_not_panic() {
        step("Checking for the build directory");
        step_warn("Invalid argument: --bogus");
        success("Build files have been written to build");

        let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        error(&err, Some("try again"));
    }
}
