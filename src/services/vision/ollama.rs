use anyhow::Context;
use async_trait::async_trait;
use base64::Engine;
use serde_json::json;

use super::VisionProvider;
use crate::models::{ImageInput, VisionReply};

/// Local multimodal model served by Ollama. Always answers with freeform text.
pub struct OllamaVisionProvider {
    url: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaVisionProvider {
    pub fn new(url: String, model: String) -> Self {
        Self {
            url,
            model,
            client: reqwest::Client::new(),
        }
    }

    async fn image_base64(&self, image: &ImageInput) -> anyhow::Result<String> {
        match image {
            ImageInput::Base64 { data, .. } => Ok(data.clone()),
            ImageInput::Url { url } => {
                let bytes = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .with_context(|| format!("failed to fetch image: {url}"))?
                    .error_for_status()
                    .context("image host returned error")?
                    .bytes()
                    .await
                    .context("failed to read image body")?;
                Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
            }
        }
    }
}

#[async_trait]
impl VisionProvider for OllamaVisionProvider {
    async fn analyze(&self, image: &ImageInput, prompt: &str) -> anyhow::Result<VisionReply> {
        let encoded = self.image_base64(image).await?;

        let body = json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": prompt,
                "images": [encoded],
            }],
            "stream": false,
        });

        let resp = self
            .client
            .post(format!("{}/api/chat", self.url))
            .json(&body)
            .send()
            .await
            .context("failed to call Ollama API")?;

        let data: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse Ollama response")?;

        let content = data["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("missing content in Ollama response"))?;

        Ok(VisionReply::from_text(content))
    }
}
