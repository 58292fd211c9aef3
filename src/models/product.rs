use serde::{Deserialize, Serialize};

use super::{ExtractedFields, FieldValue};

pub const DEFAULT_TITLE: &str = "Untitled Product";

/// Storefront product created from an analysis. Always created as a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub title: String,
    pub description_html: String,
    pub tags: Vec<String>,
    pub product_type: Option<String>,
    pub seo_description: Option<String>,
    pub image_alt: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<f64>,
    pub status: DraftStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DraftStatus {
    Draft,
}

impl DraftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftStatus::Draft => "draft",
        }
    }
}

impl ProductDraft {
    /// Missing or null fields fall back to fixed defaults. `price_text` is never coerced.
    pub fn from_fields(fields: &ExtractedFields, image_url: Option<&str>) -> Self {
        let text = |key: &str| {
            fields
                .text(key)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let tags = match fields.get("product_tags") {
            Some(FieldValue::List(tags)) => tags.clone(),
            Some(FieldValue::Text(raw)) => raw
                .split([',', ';'])
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        };

        let price = match fields.get("price") {
            Some(FieldValue::Number(n)) => Some(*n),
            _ => None,
        };

        Self {
            title: text("product_title").unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            description_html: text("product_description").unwrap_or_default(),
            tags,
            product_type: text("product_type"),
            seo_description: text("seo_description"),
            image_alt: text("alt_text"),
            image_url: image_url.map(str::to_string),
            price,
            status: DraftStatus::Draft,
        }
    }
}

/// Local record of a draft pushed to the storefront.
#[derive(Debug, Clone, Serialize)]
pub struct DraftRecord {
    pub id: String,
    pub analysis_id: String,
    pub remote_id: String,
    pub title: String,
    pub status: String,
    pub created_at: String,
}
