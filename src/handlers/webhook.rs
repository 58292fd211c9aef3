use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::errors::AppError;
use crate::state::AppState;

fn header<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// Shopify signs the raw body with HMAC-SHA256 and sends it base64-encoded.
pub fn verify_shopify_hmac(secret: &str, body: &[u8], signature: &str) -> bool {
    let Ok(expected) = base64::engine::general_purpose::STANDARD.decode(signature.trim()) else {
        return false;
    };

    let mut mac = match Hmac::<Sha256>::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => return false,
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

// POST /webhooks/shopify
pub async fn shopify_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let topic = header(&headers, "x-shopify-topic");
    let shop = header(&headers, "x-shopify-shop-domain");

    // Skip verification when no secret is configured (dev mode)
    if !state.config.shopify_api_secret.is_empty() {
        let signature = header(&headers, "x-shopify-hmac-sha256");
        if signature.is_empty()
            || !verify_shopify_hmac(&state.config.shopify_api_secret, &body, signature)
        {
            tracing::warn!(topic, shop, "invalid Shopify webhook signature");
            return Err(AppError::Unauthorized);
        }
    }

    match topic {
        "app/uninstalled" => {
            tracing::info!(shop, "app uninstalled from shop");
        }
        "products/update" | "products/delete" => {
            let product_id = serde_json::from_slice::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v["admin_graphql_api_id"].as_str().map(str::to_string))
                .unwrap_or_default();
            tracing::debug!(topic, shop, product_id = %product_id, "product webhook");
        }
        _ => {
            tracing::debug!(topic, shop, "ignoring webhook topic");
        }
    }

    Ok(StatusCode::OK)
}
