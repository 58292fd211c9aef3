use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub admin_token: String,
    pub vision_provider: String,
    pub vision_api_url: String,
    pub vision_api_key: String,
    pub ollama_url: String,
    pub ollama_model: String,
    pub shopify_shop_domain: String,
    pub shopify_access_token: String,
    pub shopify_api_version: String,
    pub shopify_api_secret: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Self {
            port: get("PORT").and_then(|v| v.parse().ok()).unwrap_or(3000),
            database_url: or("DATABASE_URL", "productlens.db"),
            admin_token: or("ADMIN_TOKEN", "changeme"),
            vision_provider: or("VISION_PROVIDER", "classifier"),
            vision_api_url: get("VISION_API_URL").unwrap_or_default(),
            vision_api_key: get("VISION_API_KEY").unwrap_or_default(),
            ollama_url: or("OLLAMA_URL", "http://localhost:11434"),
            ollama_model: or("OLLAMA_MODEL", "llava"),
            shopify_shop_domain: get("SHOPIFY_SHOP_DOMAIN").unwrap_or_default(),
            shopify_access_token: get("SHOPIFY_ACCESS_TOKEN").unwrap_or_default(),
            shopify_api_version: or("SHOPIFY_API_VERSION", "2024-10"),
            shopify_api_secret: get("SHOPIFY_API_SECRET").unwrap_or_default(),
        }
    }
}
