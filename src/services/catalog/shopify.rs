use anyhow::Context;
use async_trait::async_trait;
use serde_json::{json, Value};

use super::CatalogProvider;
use crate::models::ProductDraft;

const PRODUCT_CREATE: &str = r#"mutation productCreate($product: ProductCreateInput!, $media: [CreateMediaInput!]) {
  productCreate(product: $product, media: $media) {
    product { id variants(first: 1) { nodes { id } } }
    userErrors { field message }
  }
}"#;

const VARIANT_PRICE_UPDATE: &str = r#"mutation productVariantsBulkUpdate($productId: ID!, $variants: [ProductVariantsBulkInput!]!) {
  productVariantsBulkUpdate(productId: $productId, variants: $variants) {
    userErrors { field message }
  }
}"#;

/// Shopify Admin GraphQL client for draft product creation.
pub struct ShopifyCatalog {
    shop_domain: String,
    access_token: String,
    api_version: String,
    client: reqwest::Client,
}

impl ShopifyCatalog {
    pub fn new(shop_domain: String, access_token: String, api_version: String) -> Self {
        Self {
            shop_domain,
            access_token,
            api_version,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "https://{}/admin/api/{}/graphql.json",
            self.shop_domain, self.api_version
        )
    }

    async fn graphql(&self, query: &str, variables: Value) -> anyhow::Result<Value> {
        let resp = self
            .client
            .post(self.endpoint())
            .header("X-Shopify-Access-Token", &self.access_token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .context("failed to call Shopify API")?;

        let status = resp.status();
        let data: Value = resp
            .json()
            .await
            .context("failed to parse Shopify response")?;

        if !status.is_success() {
            anyhow::bail!("Shopify API error ({}): {}", status, data);
        }
        if let Some(errors) = data.get("errors") {
            anyhow::bail!("Shopify GraphQL errors: {}", errors);
        }

        Ok(data)
    }
}

pub fn product_input(draft: &ProductDraft) -> Value {
    let mut product = json!({
        "title": draft.title,
        "descriptionHtml": draft.description_html,
        "tags": draft.tags,
        "status": draft.status,
    });
    if let Some(product_type) = &draft.product_type {
        product["productType"] = json!(product_type);
    }
    if let Some(seo) = &draft.seo_description {
        product["seo"] = json!({ "description": seo });
    }
    product
}

pub fn media_input(draft: &ProductDraft) -> Value {
    match &draft.image_url {
        Some(url) => json!([{
            "originalSource": url,
            "alt": draft.image_alt.clone().unwrap_or_default(),
            "mediaContentType": "IMAGE",
        }]),
        None => json!([]),
    }
}

fn user_errors(payload: &Value) -> Option<String> {
    let errors = payload["userErrors"].as_array()?;
    if errors.is_empty() {
        return None;
    }
    let messages: Vec<&str> = errors
        .iter()
        .filter_map(|e| e["message"].as_str())
        .collect();
    Some(messages.join("; "))
}

#[async_trait]
impl CatalogProvider for ShopifyCatalog {
    async fn create_draft(&self, draft: &ProductDraft) -> anyhow::Result<String> {
        let data = self
            .graphql(
                PRODUCT_CREATE,
                json!({ "product": product_input(draft), "media": media_input(draft) }),
            )
            .await?;

        let payload = &data["data"]["productCreate"];
        if let Some(errors) = user_errors(payload) {
            anyhow::bail!("Shopify rejected product: {errors}");
        }

        let product_id = payload["product"]["id"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("missing product id in Shopify response"))?
            .to_string();

        if let Some(price) = draft.price {
            let variant_id = payload["product"]["variants"]["nodes"][0]["id"].as_str();
            match variant_id {
                Some(variant_id) => {
                    let data = self
                        .graphql(
                            VARIANT_PRICE_UPDATE,
                            json!({
                                "productId": product_id,
                                "variants": [{ "id": variant_id, "price": format!("{price:.2}") }],
                            }),
                        )
                        .await?;
                    if let Some(errors) = user_errors(&data["data"]["productVariantsBulkUpdate"]) {
                        tracing::warn!(product_id = %product_id, errors = %errors, "failed to set draft price");
                    }
                }
                None => {
                    tracing::warn!(product_id = %product_id, "no default variant, price not set")
                }
            }
        }

        tracing::info!(product_id = %product_id, title = %draft.title, "created draft product");
        Ok(product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DraftStatus, ExtractedFields, FieldValue};

    #[test]
    fn test_product_input_shape() {
        let mut fields = ExtractedFields::new();
        fields.insert("product_title", FieldValue::Text("Blue Jacket".into()));
        fields.insert("seo_description", FieldValue::Text("Warm jacket".into()));
        fields.insert("product_tags", FieldValue::List(vec!["outerwear".into()]));
        let draft = ProductDraft::from_fields(&fields, None);

        let input = product_input(&draft);
        assert_eq!(input["title"], "Blue Jacket");
        assert_eq!(input["status"], "DRAFT");
        assert_eq!(input["tags"][0], "outerwear");
        assert_eq!(input["seo"]["description"], "Warm jacket");
        assert!(input.get("productType").is_none());
        assert_eq!(draft.status, DraftStatus::Draft);
    }

    #[test]
    fn test_media_input() {
        let mut draft = ProductDraft::from_fields(&ExtractedFields::new(), None);
        assert_eq!(media_input(&draft), json!([]));

        draft.image_url = Some("https://cdn.example.com/a.jpg".to_string());
        draft.image_alt = Some("A jacket".to_string());
        let media = media_input(&draft);
        assert_eq!(media[0]["originalSource"], "https://cdn.example.com/a.jpg");
        assert_eq!(media[0]["alt"], "A jacket");
    }

    #[test]
    fn test_user_errors() {
        let payload = json!({"userErrors": [{"field": ["title"], "message": "Title can't be blank"}]});
        assert_eq!(user_errors(&payload).as_deref(), Some("Title can't be blank"));
        assert_eq!(user_errors(&json!({"userErrors": []})), None);
    }
}
