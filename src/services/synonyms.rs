use std::collections::HashMap;
use std::sync::LazyLock;

/// Normalized category phrase -> canonical field key.
///
/// Downstream catalog glue depends on these exact keys. Entries are matched
/// after normalization (lowercase, trimmed, single spaces).
static SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        // titles
        ("product title", "product_title"),
        ("title", "product_title"),
        ("product name", "product_title"),
        ("name", "product_title"),
        ("product title (compelling, seo-friendly product title)", "product_title"),
        // descriptions
        ("product description", "product_description"),
        ("description", "product_description"),
        ("detailed description", "product_description"),
        (
            "product description (detailed description suitable for e-commerce listing)",
            "product_description",
        ),
        // colors
        ("color variants", "color_variant"),
        ("color variant", "color_variant"),
        ("colors", "color_variant"),
        ("color", "color_variant"),
        ("colour", "color_variant"),
        ("primary color", "color_variant"),
        ("primary colors", "color_variant"),
        (
            "color variants (primary colors and color variants visible)",
            "color_variant",
        ),
        // seo
        ("seo description", "seo_description"),
        ("meta description", "seo_description"),
        ("seo", "seo_description"),
        (
            "seo description (seo-optimized meta description under 160 characters)",
            "seo_description",
        ),
        // tags
        ("product tags", "product_tags"),
        ("tags", "product_tags"),
        ("keywords", "product_tags"),
        ("product keywords", "product_tags"),
        (
            "product tags (5-10 relevant product tags and keywords, comma-separated)",
            "product_tags",
        ),
        // alt text
        ("alt text", "alt_text"),
        ("alt", "alt_text"),
        ("image alt text", "alt_text"),
        ("alt text (descriptive alt text for accessibility)", "alt_text"),
        // pricing
        ("price", "price"),
        ("estimated price", "price"),
        ("suggested price", "price"),
        ("retail price", "price"),
        // product type
        ("product type", "product_type"),
        ("type", "product_type"),
        ("category", "product_type"),
        // person attributes
        ("age range", "age_range"),
        ("age", "age_range"),
        (
            "determine the age range of the person (report as range, ex. 20s)",
            "age_range",
        ),
        ("gender", "gender"),
        ("identify the gender (male/female)", "gender"),
        ("fashion style", "fashion_style"),
        ("style", "fashion_style"),
        (
            "identify the fashion style (casual, formal, bohemian, streetwear, vintage, chic, sporty, edgy)",
            "fashion_style",
        ),
        ("outfit", "outfit_description"),
        ("outfit description", "outfit_description"),
        ("describe their outfit in detail", "outfit_description"),
        // common product attributes
        ("material", "material"),
        ("materials", "material"),
        ("brand", "brand"),
        ("size", "size"),
        ("pattern", "pattern"),
    ]
    .into_iter()
    .collect()
});

pub fn lookup(normalized: &str) -> Option<&'static str> {
    SYNONYMS.get(normalized).copied()
}
