//! Terminal status surface for the upload flow.

mod spinner;
mod status;

pub use spinner::Spinner;
pub use status::{StatusView, TerminalStatus};
