//! Input decoding and data source handling.

mod parser;
mod source;
#[cfg(feature = "excel")]
mod workbook;

pub use parser::{InputFormat, Parser, ParserConfig};
pub use source::{DecodedTable, SourceMetadata};
