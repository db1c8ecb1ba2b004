use async_trait::async_trait;

/// Blocking message and confirmation prompts offered by the host.
///
/// Controllers report every outcome through this capability, so they can run
/// against any UI toolkit or a test double.
#[async_trait]
pub trait UserFeedback: Send + Sync {
    /// Show a message and wait until it is dismissed
    async fn alert(&self, message: &str);

    /// Ask a yes/no question; `true` means the user agreed
    async fn confirm(&self, message: &str) -> bool;
}
