use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::{ClassLabel, ClassificationItem, ExtractedFields, FieldValue, VisionReply};
use crate::services::synonyms;

const NULL_LABEL: &str = "null";
const UNKNOWN_FIELD: &str = "unknown_field";

static KEY_VALUE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(.+?)\s*:\s*(.+?)\s*$").expect("valid key/value regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionPath {
    Structured,
    Fallback,
    Nothing,
}

#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub fields: ExtractedFields,
    /// Human-readable summary shown in the UI whichever path was taken.
    pub combined_text: String,
    pub path: ExtractionPath,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Lowercase, trim, collapse internal whitespace.
pub fn normalize_category(category: &str) -> String {
    category
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Synthesized key for categories missing from the synonym table.
pub fn sanitize_key(normalized: &str) -> String {
    let key: String = normalized
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect();

    if key.is_empty() {
        UNKNOWN_FIELD.to_string()
    } else {
        key
    }
}

/// Maps a category phrase (as echoed by the service) to its canonical field key.
pub fn resolve_field_key(category: &str) -> String {
    let normalized = normalize_category(category);

    if let Some(key) = synonyms::lookup(&normalized) {
        return key.to_string();
    }

    // "product type (this is a mug product)" resolves like "product type"
    if let Some(base) = strip_parenthetical(&normalized) {
        if let Some(key) = synonyms::lookup(base) {
            return key.to_string();
        }
    }

    sanitize_key(&normalized)
}

fn strip_parenthetical(normalized: &str) -> Option<&str> {
    if !normalized.ends_with(')') {
        return None;
    }
    let open = normalized.rfind('(')?;
    let base = normalized[..open].trim_end();
    (!base.is_empty()).then_some(base)
}

pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split([',', ';'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keeps digits, `.` and `-`, then parses. `None` when nothing numeric remains.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn is_null_label(label: Option<&ClassLabel>) -> bool {
    match label {
        None => true,
        Some(ClassLabel::Text(s)) => s.trim() == NULL_LABEL,
        Some(_) => false,
    }
}

/// Converts a label into the stored `(key, value)` pair for `field_key`.
fn coerce(field_key: &str, label: Option<&ClassLabel>) -> (String, FieldValue) {
    let Some(label) = label.filter(|l| !is_null_label(Some(*l))) else {
        return (field_key.to_string(), FieldValue::Null);
    };

    match field_key {
        "product_tags" => {
            let tags = match label {
                ClassLabel::List(items) => items.clone(),
                other => split_tags(&other.as_text()),
            };
            (field_key.to_string(), FieldValue::List(tags))
        }
        "price" => {
            if let ClassLabel::Number(n) = label {
                return ("price".to_string(), FieldValue::Number(*n));
            }
            let raw = label.as_text();
            match parse_price(&raw) {
                Some(price) => ("price".to_string(), FieldValue::Number(price)),
                None => {
                    tracing::debug!(raw = %raw, "price not numeric, keeping as text");
                    ("price_text".to_string(), FieldValue::Text(raw))
                }
            }
        }
        _ => (field_key.to_string(), FieldValue::Text(label.as_text())),
    }
}

fn extract_structured(items: &[ClassificationItem]) -> (ExtractedFields, Vec<String>) {
    let mut fields = ExtractedFields::new();
    let mut lines = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let Some(category) = item.category.as_deref().filter(|c| !c.trim().is_empty()) else {
            tracing::warn!(index, "skipping classification item without a category");
            continue;
        };

        let field_key = resolve_field_key(category);
        let (key, value) = coerce(&field_key, item.class_label.as_ref());

        let shown = if is_null_label(item.class_label.as_ref()) {
            NULL_LABEL.to_string()
        } else {
            item.class_label
                .as_ref()
                .map(ClassLabel::as_text)
                .unwrap_or_else(|| NULL_LABEL.to_string())
        };
        lines.push(format!("{category}: {shown}"));

        tracing::debug!(category = %category, field = %key, "mapped classification");
        fields.insert(key, value);
    }

    (fields, lines)
}

/// Fills fields from `key: value` lines without overwriting anything already set.
fn extract_from_text(text: &str, fields: &mut ExtractedFields) -> usize {
    let mut added = 0;

    for line in text.lines() {
        let Some(caps) = KEY_VALUE_LINE.captures(line) else {
            continue;
        };
        let raw_key = caps[1]
            .trim_matches(|c: char| c.is_whitespace() || matches!(c, '*' | '-' | '#' | '•'));
        if raw_key.is_empty() {
            continue;
        }
        let raw_value = caps[2].trim_matches('*').trim();
        if raw_value.is_empty() {
            continue;
        }

        let field_key = resolve_field_key(raw_key);
        let (key, value) = coerce(&field_key, Some(&ClassLabel::Text(raw_value.to_string())));

        if fields.contains(&field_key) || fields.contains(&key) {
            tracing::debug!(field = %key, "fallback line ignored, field already set");
            continue;
        }

        fields.insert(key, value);
        added += 1;
    }

    added
}

/// Turns a vision reply into canonical fields. Never fails; an empty result
/// means the service gave nothing usable.
pub fn extract(reply: &VisionReply) -> Extraction {
    let (items, text): (&[ClassificationItem], Option<&str>) = match reply {
        VisionReply::Classes { items, text } => (items.as_slice(), text.as_deref()),
        VisionReply::Text(text) => (&[][..], Some(text.as_str())),
        VisionReply::Empty => (&[][..], None),
    };

    let (mut fields, lines) = extract_structured(items);

    if !fields.is_empty() {
        tracing::info!(fields = fields.len(), "extracted fields from classifications");
        return Extraction {
            fields,
            combined_text: lines.join("\n"),
            path: ExtractionPath::Structured,
        };
    }

    if let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) {
        let added = extract_from_text(text, &mut fields);
        tracing::info!(fields = added, "extracted fields from freeform text");
        return Extraction {
            fields,
            combined_text: text.to_string(),
            path: ExtractionPath::Fallback,
        };
    }

    tracing::info!("no data extracted from vision reply");
    Extraction {
        fields,
        combined_text: String::new(),
        path: ExtractionPath::Nothing,
    }
}
