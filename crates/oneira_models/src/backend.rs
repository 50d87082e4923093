//! The completion backend trait.

use crate::CompletionEnvelope;
use async_trait::async_trait;
use oneira_core::CompletionRequest;
use oneira_error::UpstreamError;

/// A completion service the orchestrator can call.
///
/// The production implementation is [`crate::CompletionClient`]; tests
/// inject a scripted mock.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Performs one completion call.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on network, auth, or quota failure. Shape
    /// problems in an otherwise successful response are NOT errors here;
    /// they surface downstream at extraction time.
    async fn complete(&self, request: &CompletionRequest)
    -> Result<CompletionEnvelope, UpstreamError>;
}

#[async_trait]
impl<B: CompletionBackend + ?Sized> CompletionBackend for std::sync::Arc<B> {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionEnvelope, UpstreamError> {
        (**self).complete(request).await
    }
}
