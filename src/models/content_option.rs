use serde::{Deserialize, Serialize};

/// Optional content the merchant asks the vision service to generate.
///
/// Declaration order is significant: enabled options contribute their
/// category phrases to the prompt in exactly this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentOption {
    ProductTitle,
    ProductDescription,
    ColorVariant,
    SeoDescription,
    ProductTags,
    AltText,
    AgeRange,
    Gender,
    FashionStyle,
    OutfitDescription,
}

impl ContentOption {
    pub const ALL: [ContentOption; 10] = [
        ContentOption::ProductTitle,
        ContentOption::ProductDescription,
        ContentOption::ColorVariant,
        ContentOption::SeoDescription,
        ContentOption::ProductTags,
        ContentOption::AltText,
        ContentOption::AgeRange,
        ContentOption::Gender,
        ContentOption::FashionStyle,
        ContentOption::OutfitDescription,
    ];

    pub fn category_phrase(self) -> &'static str {
        match self {
            ContentOption::ProductTitle => "product title (compelling, SEO-friendly product title)",
            ContentOption::ProductDescription => {
                "product description (detailed description suitable for e-commerce listing)"
            }
            ContentOption::ColorVariant => "color variants (primary colors and color variants visible)",
            ContentOption::SeoDescription => {
                "SEO description (SEO-optimized meta description under 160 characters)"
            }
            ContentOption::ProductTags => {
                "product tags (5-10 relevant product tags and keywords, comma-separated)"
            }
            ContentOption::AltText => "alt text (descriptive alt text for accessibility)",
            ContentOption::AgeRange => {
                "Determine the age range of the person (report as range, ex. 20s)"
            }
            ContentOption::Gender => "Identify the gender (Male/Female)",
            ContentOption::FashionStyle => {
                "Identify the fashion style (Casual, Formal, Bohemian, Streetwear, Vintage, Chic, Sporty, Edgy)"
            }
            ContentOption::OutfitDescription => "Describe their outfit in detail",
        }
    }

    /// Person attributes switch the prompt into person-analysis mode.
    pub fn is_person_attribute(self) -> bool {
        matches!(
            self,
            ContentOption::AgeRange
                | ContentOption::Gender
                | ContentOption::FashionStyle
                | ContentOption::OutfitDescription
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentOption::ProductTitle => "product_title",
            ContentOption::ProductDescription => "product_description",
            ContentOption::ColorVariant => "color_variant",
            ContentOption::SeoDescription => "seo_description",
            ContentOption::ProductTags => "product_tags",
            ContentOption::AltText => "alt_text",
            ContentOption::AgeRange => "age_range",
            ContentOption::Gender => "gender",
            ContentOption::FashionStyle => "fashion_style",
            ContentOption::OutfitDescription => "outfit_description",
        }
    }
}
