//! Payload parsing.
//!
//! The upstream data API serves the same observations in two shapes: a
//! tagged text document and a JSON array. Both strategies normalize into
//! [`StationReport`](crate::report::StationReport) values; downstream code
//! never knows which format was fetched.

mod document;
mod tag_stream;

pub use document::parse_document;
pub use tag_stream::TagStreamParser;

use crate::report::StationReport;

/// Error type for payload parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("payload ended inside a <{field}> field")]
    TruncatedField { field: &'static str },
    #[error("payload ended inside a markup tag")]
    TruncatedMarkup,
    #[error("payload is neither a tagged document nor JSON")]
    UnrecognizedFormat,
    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("JSON payload does not contain an array of station objects")]
    NotAnArray,
}

/// Parse either supported payload format.
///
/// A payload opening with `<` goes through the streaming tag scanner; one
/// opening with `[` or `{` goes through the JSON strategy. Anything else
/// is rejected outright.
pub fn parse_payload(payload: &str) -> Result<Vec<StationReport>, ParseError> {
    let body = payload.trim_start();
    if body.starts_with('<') {
        let mut parser = TagStreamParser::new();
        parser.push(body);
        parser.finish()
    } else if body.starts_with('[') || body.starts_with('{') {
        parse_document(body)
    } else {
        Err(ParseError::UnrecognizedFormat)
    }
}
