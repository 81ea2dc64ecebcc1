//! Content screen adapters.
//!
//! - `KeywordContentScreen` - Case-insensitive keyword substring match

mod keyword_screen;

pub use keyword_screen::{KeywordContentScreen, DEFAULT_FORBIDDEN_KEYWORDS};
