pub mod classifier;
pub mod ollama;

use async_trait::async_trait;

use crate::models::{ImageInput, VisionReply};

/// External vision/LLM service that runs one instruction against one image.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    async fn analyze(&self, image: &ImageInput, prompt: &str) -> anyhow::Result<VisionReply>;
}
