//! The text-generation capability the reply generator depends on.

use std::future::Future;

use crate::error::LlmError;

/// Anything that can turn a prompt into text.
///
/// One call is one attempt: implementations must not retry internally,
/// since retry policy belongs to [`crate::generator::ReplyGenerator`].
pub trait TextBackend {
    /// Generate text for `prompt`.
    ///
    /// # Errors
    /// Returns an error if the provider fails for any reason. The error's
    /// message is what gets classified for retry.
    fn generate_content(&self, prompt: &str) -> impl Future<Output = Result<String, LlmError>> + Send;
}

impl<B: TextBackend + Sync> TextBackend for &B {
    fn generate_content(&self, prompt: &str) -> impl Future<Output = Result<String, LlmError>> + Send {
        (**self).generate_content(prompt)
    }
}
