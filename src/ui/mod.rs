//! User-facing output
//!
//! Every line the bootstrapper prints for the user carries the `[Heph]`
//! prefix. Colors come from `console` and switch off automatically when
//! the stream is not a terminal.

mod output;

pub use output::{error, step, step_warn, success, PREFIX};
