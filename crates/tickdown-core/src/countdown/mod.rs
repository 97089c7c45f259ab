mod engine;
mod format;

pub use engine::{CountdownEngine, CountdownState};
pub use format::{format_remaining, parse_target, DONE, NO_TARGET};
