//! Content Screen Port - refusal check for problem descriptions.
//!
//! The flow controller asks this port whether a description may be
//! mediated before it opens a case. Adapters decide what counts as a match.

/// Port for screening free text against a content policy.
///
/// # Contract
///
/// Implementations must:
/// - Be deterministic for the same input
/// - Return the matched term, never the caller's text
///
/// # Usage
///
/// ```rust,ignore
/// let screen: &dyn ContentScreen = get_screen();
///
/// if let Some(term) = screen.first_match(description) {
///     return Err(MediationError::content_policy());
/// }
/// ```
pub trait ContentScreen: Send + Sync {
    /// Returns the first forbidden term found in `text`, if any.
    fn first_match(&self, text: &str) -> Option<&str>;

    /// True when `text` contains no forbidden term.
    fn is_allowed(&self, text: &str) -> bool {
        self.first_match(text).is_none()
    }
}
