use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{ContentOption, ExtractedFields};

/// Inputs collected by the upload wizard for one image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default, rename = "options")]
    pub enabled_options: BTreeSet<ContentOption>,
}

impl AnalysisRequest {
    pub fn new<I, S>(questions: I, product_type: Option<&str>, options: &[ContentOption]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            questions: questions.into_iter().map(Into::into).collect(),
            product_type: product_type.map(str::to_string),
            enabled_options: options.iter().copied().collect(),
        }
    }

    pub fn has_person_attribute(&self) -> bool {
        self.enabled_options.iter().any(|o| o.is_person_attribute())
    }
}

/// The literal instruction sent to the vision service, plus the categories it asks about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptInstruction {
    pub text: String,
    pub categories: Vec<String>,
}

/// Image handed to the vision provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageInput {
    Url { url: String },
    Base64 { data: String, mime_type: String },
}

impl ImageInput {
    /// Short reference stored alongside an analysis. Inline data is not persisted.
    pub fn reference(&self) -> String {
        match self {
            ImageInput::Url { url } => url.clone(),
            ImageInput::Base64 { data, mime_type } => {
                format!("inline:{mime_type}:{}b", data.len())
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub id: String,
    pub image_ref: String,
    pub prompt: String,
    pub categories: Vec<String>,
    pub fields: ExtractedFields,
    pub combined_text: String,
    pub no_data: bool,
    pub created_at: String,
}

/// Pushed to event-stream subscribers as each image completes.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisEvent {
    pub analysis_id: Option<String>,
    pub image_ref: String,
    pub status: AnalysisStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub field_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Completed,
    NoData,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_wire() {
        let json = r#"{"questions":["what is the collar style"],"product_type":"t-shirt","options":["color_variant","product_title"]}"#;
        let req: AnalysisRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.questions, vec!["what is the collar style"]);
        assert_eq!(req.product_type.as_deref(), Some("t-shirt"));
        let options: Vec<_> = req.enabled_options.iter().copied().collect();
        assert_eq!(
            options,
            vec![ContentOption::ProductTitle, ContentOption::ColorVariant]
        );
        assert!(!req.has_person_attribute());
    }

    #[test]
    fn test_request_defaults() {
        let req: AnalysisRequest = serde_json::from_str("{}").unwrap();
        assert!(req.questions.is_empty());
        assert!(req.product_type.is_none());
        assert!(req.enabled_options.is_empty());
    }

    #[test]
    fn test_image_reference() {
        let url = ImageInput::Url {
            url: "https://cdn.example.com/shirt.jpg".to_string(),
        };
        assert_eq!(url.reference(), "https://cdn.example.com/shirt.jpg");

        let inline = ImageInput::Base64 {
            data: "aGVsbG8=".to_string(),
            mime_type: "image/png".to_string(),
        };
        assert_eq!(inline.reference(), "inline:image/png:8b");
    }
}
