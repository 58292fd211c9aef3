use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One `{category, classLabel, confidence}` entry of a structured vision reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationItem {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "classLabel", alias = "class_label")]
    pub class_label: Option<ClassLabel>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl ClassificationItem {
    pub fn new(category: &str, class_label: &str) -> Self {
        Self {
            category: Some(category.to_string()),
            class_label: Some(ClassLabel::Text(class_label.to_string())),
            confidence: None,
        }
    }
}

/// Answer value for a category. The service normally sends a string but
/// numbers and already-split lists show up too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassLabel {
    Text(String),
    Number(f64),
    List(Vec<String>),
}

impl ClassLabel {
    pub fn as_text(&self) -> String {
        match self {
            ClassLabel::Text(s) => s.clone(),
            ClassLabel::Number(n) => n.to_string(),
            ClassLabel::List(items) => items.join(", "),
        }
    }
}

/// Vision service reply, decoded once at the provider boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum VisionReply {
    Classes {
        items: Vec<ClassificationItem>,
        text: Option<String>,
    },
    Text(String),
    Empty,
}

impl VisionReply {
    pub fn from_text(text: &str) -> Self {
        if text.trim().is_empty() {
            VisionReply::Empty
        } else {
            VisionReply::Text(text.to_string())
        }
    }

    /// Accepts `{"classes": [...], "text": "..."}`, a bare array of items, or a bare string.
    pub fn from_json(value: &Value) -> Self {
        let (raw_items, text) = match value {
            Value::Array(items) => (items.as_slice(), None),
            Value::Object(map) => {
                let items = map
                    .get("classes")
                    .or_else(|| map.get("classifications"))
                    .and_then(Value::as_array)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                let text = map
                    .get("text")
                    .and_then(Value::as_str)
                    .filter(|t| !t.trim().is_empty())
                    .map(str::to_string);
                (items, text)
            }
            Value::String(s) => return Self::from_text(s),
            _ => return VisionReply::Empty,
        };

        let items: Vec<ClassificationItem> = raw_items
            .iter()
            .filter_map(|raw| match serde_json::from_value(raw.clone()) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(error = %e, "dropping undecodable classification item");
                    None
                }
            })
            .collect();

        match (items.is_empty(), text) {
            (false, text) => VisionReply::Classes { items, text },
            (true, Some(text)) => VisionReply::Text(text),
            (true, None) => VisionReply::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_classes_with_text() {
        let value = json!({
            "classes": [
                {"category": "Product Title", "classLabel": "Blue Jacket", "confidence": 0.92},
                {"category": "Price", "classLabel": 19.99},
                {"category": "Product Tags", "classLabel": ["red", "blue"]},
                {"category": "Brand", "classLabel": null}
            ],
            "text": "Product Title: Blue Jacket"
        });
        let VisionReply::Classes { items, text } = VisionReply::from_json(&value) else {
            panic!("expected classes");
        };
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].confidence, Some(0.92));
        assert_eq!(items[1].class_label, Some(ClassLabel::Number(19.99)));
        assert_eq!(
            items[2].class_label,
            Some(ClassLabel::List(vec!["red".into(), "blue".into()]))
        );
        assert_eq!(items[3].class_label, None);
        assert_eq!(text.as_deref(), Some("Product Title: Blue Jacket"));
    }

    #[test]
    fn test_decode_empty_classes_falls_to_text() {
        let value = json!({"classes": [], "text": "Color: Navy"});
        assert_eq!(
            VisionReply::from_json(&value),
            VisionReply::Text("Color: Navy".to_string())
        );
    }

    #[test]
    fn test_decode_bare_shapes() {
        let value = json!([{"category": "Gender", "classLabel": "Female"}]);
        assert!(matches!(
            VisionReply::from_json(&value),
            VisionReply::Classes { .. }
        ));
        assert_eq!(
            VisionReply::from_json(&json!("hello")),
            VisionReply::Text("hello".to_string())
        );
        assert_eq!(VisionReply::from_json(&json!({})), VisionReply::Empty);
        assert_eq!(VisionReply::from_json(&json!(42)), VisionReply::Empty);
        assert_eq!(VisionReply::from_text("   "), VisionReply::Empty);
    }

    #[test]
    fn test_undecodable_item_dropped() {
        let value = json!({"classes": [{"category": "Material", "classLabel": true}, {"category": "Gender", "classLabel": "Male"}]});
        let VisionReply::Classes { items, .. } = VisionReply::from_json(&value) else {
            panic!("expected classes");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category.as_deref(), Some("Gender"));
    }

    #[test]
    fn test_snake_case_alias() {
        let item: ClassificationItem =
            serde_json::from_value(json!({"category": "Color", "class_label": "Navy"})).unwrap();
        assert_eq!(item.class_label, Some(ClassLabel::Text("Navy".to_string())));
    }
}
