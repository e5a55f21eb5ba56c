//! API request handlers.

mod analyze;
mod assist;

pub use analyze::*;
pub use assist::*;
