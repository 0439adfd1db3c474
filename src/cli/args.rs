//! Command-line token parsing
//!
//! Parsing never fails: unknown tokens and value options missing their
//! value become warnings and the remaining tokens are still processed.

use crate::error::Warning;
use crate::options::{ExplicitArgs, OptionKey, Options};
use tracing::debug;

/// Outcome of parsing the raw argument list
#[derive(Debug, Clone, Default)]
pub struct ParsedArgs {
    /// Defaults overlaid with the command-line values
    pub options: Options,
    /// Option names that appeared in the raw tokens
    pub explicit: ExplicitArgs,
    /// Problems found while parsing, in token order
    pub warnings: Vec<Warning>,
}

/// Parse the argument list, excluding the program name
pub fn parse_args<I, S>(tokens: I) -> ParsedArgs
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
    let mut parsed = ParsedArgs {
        explicit: ExplicitArgs::from_tokens(&tokens),
        ..ParsedArgs::default()
    };

    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        match OptionKey::from_token(token) {
            Some(OptionKey::Flag(flag)) => parsed.options.set_flag(flag, true),
            Some(OptionKey::Value(option)) => match tokens.get(i + 1) {
                Some(value) => {
                    parsed.options.assign(option, option.parse_value(value.as_str()));
                    i += 1;
                }
                None => parsed.warnings.push(Warning::MissingValue(option.token())),
            },
            None => parsed.warnings.push(Warning::UnknownArgument(token.clone())),
        }
        i += 1;
    }

    debug!(
        "Parsed {} tokens with {} warnings",
        tokens.len(),
        parsed.warnings.len()
    );
    parsed
}
