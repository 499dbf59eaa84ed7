//! Error types for metadata serialization and parsing.

use thiserror::Error;

/// Errors produced while reading or writing updateinfo documents.
///
/// Model construction and field assignment never fail; serialization of a
/// well-formed in-memory value never fails either. Everything here comes
/// from malformed input documents or writer plumbing.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("unexpected root element <{0}>, expected <updates>")]
    UnexpectedRoot(String),

    #[error("document ended before </{0}>")]
    Truncated(String),

    #[error("serialized document is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, MetadataError>;
