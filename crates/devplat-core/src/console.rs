//! Interactive console abstraction

use crate::Result;

/// User interaction used by the selection and parameter prompts.
///
/// Implementations may block on terminal input. Errors and interrupts are
/// reported through [`crate::Error::Console`] or [`crate::Error::Cancelled`].
pub trait Console: Send + Sync {
    /// Ask the user to pick one of `options`; returns its index.
    fn select(&self, message: &str, options: &[String]) -> Result<usize>;

    /// Ask a yes/no question.
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;

    /// Ask for free text. An empty answer yields `default` when given.
    fn prompt(&self, message: &str, default: Option<&str>) -> Result<String>;

    /// Show an informational line.
    fn message(&self, text: &str);
}
