pub mod shopify;

use async_trait::async_trait;

use crate::models::ProductDraft;

/// Storefront catalog that accepts draft products.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Returns the remote product id.
    async fn create_draft(&self, draft: &ProductDraft) -> anyhow::Result<String>;
}
