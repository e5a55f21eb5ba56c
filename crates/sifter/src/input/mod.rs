//! Input parsing and data source handling.

mod parser;
mod source;

pub use parser::{is_null_token, Parser, ParserConfig};
pub use source::SourceMetadata;
