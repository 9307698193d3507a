//! JSON interchange format for board documents.
//!
//! The layout is a versioned contract:
//!
//! ```json
//! {
//!   "strokes": [{ "points": [{ "x": 0.0, "y": 0.0 }], "color": -16777216, "strokeWidth": 8.0 }],
//!   "texts": [{ "x": 10.0, "y": 20.0, "text": "hi", "color": -16777216, "textSize": 48.0 }],
//!   "shapes": [{ "type": "SQUARE", "left": 0.0, "top": 0.0, "right": 5.0, "bottom": 5.0,
//!                "color": -16777216, "strokeWidth": 8.0 }],
//!   "width": 1080,
//!   "height": 1920
//! }
//! ```

use crate::document::Document;
use crate::error::{BoardError, BoardResult};

/// Encode a document. `pretty` only affects whitespace.
///
/// Non-finite numbers are written as `null`, which [`decode`] rejects. Board
/// operations never store them.
///
/// # Panics
///
/// Panics if `serde_json` reports an error, which it only does for maps with
/// non-string keys. Documents contain none.
pub fn encode(document: &Document, pretty: bool) -> String {
    let result = if pretty {
        serde_json::to_string_pretty(document)
    } else {
        serde_json::to_string(document)
    };
    result.expect("board documents always serialize")
}

/// Decode a document, rejecting unknown or missing fields.
pub fn decode(text: &str) -> BoardResult<Document> {
    serde_json::from_str(text).map_err(|e| {
        log::warn!("Rejected board document: {}", e);
        BoardError::MalformedDocument(e.to_string())
    })
}
