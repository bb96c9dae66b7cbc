pub mod prompts;
pub mod together;

pub use together::TogetherClient;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait AiClient: Send + Sync {
    /// Sends one prompt and returns the text of the first completion.
    async fn complete(&self, prompt: String) -> Result<String>;
    fn provider_name(&self) -> &'static str;
}
