//! SVG processing errors.

use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Reasons an icon source could not be turned into a record.
///
/// Every variant is a per-icon parse failure: the caller logs it and
/// moves on to the next file.
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("malformed markup at byte {position}")]
    Parse {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("malformed attribute")]
    Attribute(#[from] AttrError),

    #[error("closing tag without matching opening tag at byte {0}")]
    UnbalancedTag(u64),

    #[error("document ended before `<{0}>` was closed")]
    UnexpectedEof(String),

    #[error("no <svg> element found")]
    MissingRoot,
}
