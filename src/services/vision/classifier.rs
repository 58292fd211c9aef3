use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

use super::VisionProvider;
use crate::models::{ImageInput, VisionReply};

/// Hosted classification API that answers with `{"classes": [...], "text": "..."}`.
pub struct ClassifierProvider {
    url: String,
    api_key: String,
    client: reqwest::Client,
}

impl ClassifierProvider {
    pub fn new(url: String, api_key: String) -> Self {
        Self {
            url,
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl VisionProvider for ClassifierProvider {
    async fn analyze(&self, image: &ImageInput, prompt: &str) -> anyhow::Result<VisionReply> {
        let image = match image {
            ImageInput::Url { url } => json!({ "url": url }),
            ImageInput::Base64 { data, mime_type } => json!({
                "base64": data,
                "mime_type": mime_type,
            }),
        };

        let body = json!({
            "image": image,
            "prompt": prompt,
        });

        let mut request = self.client.post(&self.url).json(&body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let resp = request
            .send()
            .await
            .context("failed to call vision API")?;

        let status = resp.status();
        let data: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse vision API response")?;

        if !status.is_success() {
            anyhow::bail!("vision API error ({}): {}", status, data);
        }

        Ok(VisionReply::from_json(&data))
    }
}
