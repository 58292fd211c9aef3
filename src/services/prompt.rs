use crate::models::{AnalysisRequest, ContentOption, PromptInstruction};

const PREAMBLE: &str = "Analyze the image provided and determine the categories of: ";

const PERSON_PREAMBLE: &str = "Analyze the image provided. For any people in the image, analyze: \
Age (report as range, ex. 20s), Gender (Male/Female), Fashion style (Casual, Formal, Bohemian, \
Streetwear, Vintage, Chic, Sporty, Edgy), and describe their outfit. Also determine the categories of: ";

const POSTAMBLE: &str = ". Report the values of the categories as classLabels. \
Be very careful to place these values correctly. \
If you are unable to provide a category with a value then set its classLabel to null.";

/// Categories in prompt order: product type, user questions, then enabled options
/// in declaration order.
pub fn build_categories(request: &AnalysisRequest) -> Vec<String> {
    let mut categories = Vec::with_capacity(
        request.questions.len() + request.enabled_options.len() + 1,
    );

    if let Some(product_type) = request.product_type.as_deref().filter(|t| !t.is_empty()) {
        categories.push(format!("product type (this is a {product_type} product)"));
    }

    categories.extend(request.questions.iter().cloned());

    categories.extend(
        ContentOption::ALL
            .into_iter()
            .filter(|o| request.enabled_options.contains(o))
            .map(|o| o.category_phrase().to_string()),
    );

    categories
}

pub fn build_prompt(request: &AnalysisRequest) -> PromptInstruction {
    let categories = build_categories(request);

    if categories.is_empty() {
        tracing::warn!("building prompt with no categories");
    }

    let preamble = if request.has_person_attribute() {
        PERSON_PREAMBLE
    } else {
        PREAMBLE
    };
    let text = format!("{preamble}{}{POSTAMBLE}", categories.join(", "));

    tracing::debug!(
        categories = categories.len(),
        person_mode = request.has_person_attribute(),
        "built analysis prompt"
    );

    PromptInstruction { text, categories }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_product_type_question_and_options() {
        let req = AnalysisRequest::new(
            ["what is the collar style"],
            Some("t-shirt"),
            &[ContentOption::ColorVariant, ContentOption::ProductTitle],
        );
        let prompt = build_prompt(&req);
        assert_eq!(
            prompt.categories,
            vec![
                "product type (this is a t-shirt product)",
                "what is the collar style",
                "product title (compelling, SEO-friendly product title)",
                "color variants (primary colors and color variants visible)",
            ]
        );
        assert!(prompt.text.starts_with(
            "Analyze the image provided and determine the categories of: product type (this is a t-shirt product), what is the collar style, product title"
        ));
        assert!(prompt.text.ends_with(
            "If you are unable to provide a category with a value then set its classLabel to null."
        ));
    }

    #[test]
    fn test_exact_standard_template() {
        let req = AnalysisRequest::new(["is it waterproof"], None, &[ContentOption::AltText]);
        let prompt = build_prompt(&req);
        assert_eq!(
            prompt.text,
            "Analyze the image provided and determine the categories of: is it waterproof, \
alt text (descriptive alt text for accessibility). Report the values of the categories as \
classLabels. Be very careful to place these values correctly. If you are unable to provide a \
category with a value then set its classLabel to null."
        );
    }

    #[test]
    fn test_person_mode_preamble() {
        let req = AnalysisRequest::new(
            Vec::<String>::new(),
            None,
            &[ContentOption::AgeRange, ContentOption::Gender],
        );
        let prompt = build_prompt(&req);
        assert!(prompt
            .text
            .contains("For any people in the image, analyze: Age (report as range, ex. 20s)"));
        assert_eq!(
            prompt.categories,
            vec![
                "Determine the age range of the person (report as range, ex. 20s)",
                "Identify the gender (Male/Female)",
            ]
        );
        assert!(prompt.text.contains("Identify the gender (Male/Female). Report the values"));
    }

    #[test]
    fn test_person_mode_never_without_person_options() {
        let non_person: Vec<_> = ContentOption::ALL
            .into_iter()
            .filter(|o| !o.is_person_attribute())
            .collect();
        let req = AnalysisRequest::new(["pattern"], Some("dress"), &non_person);
        let prompt = build_prompt(&req);
        assert!(!prompt.text.contains("For any people in the image"));
        assert!(prompt.text.starts_with(PREAMBLE));

        for person in [
            ContentOption::AgeRange,
            ContentOption::Gender,
            ContentOption::FashionStyle,
            ContentOption::OutfitDescription,
        ] {
            let req = AnalysisRequest::new(["pattern"], None, &[person]);
            assert!(build_prompt(&req).text.contains("For any people in the image"));
        }
    }

    #[test]
    fn test_all_options_in_declaration_order() {
        let mut reversed = ContentOption::ALL;
        reversed.reverse();
        let req = AnalysisRequest::new(Vec::<String>::new(), None, &reversed);
        let expected: Vec<_> = ContentOption::ALL
            .iter()
            .map(|o| o.category_phrase().to_string())
            .collect();
        assert_eq!(build_categories(&req), expected);
    }

    #[test]
    fn test_questions_kept_verbatim_and_in_order() {
        let req = AnalysisRequest::new(
            ["  Sleeve LENGTH? ", "material", "material"],
            Some(""),
            &[],
        );
        assert_eq!(
            build_categories(&req),
            vec!["  Sleeve LENGTH? ", "material", "material"]
        );
    }

    #[test]
    fn test_empty_request() {
        let prompt = build_prompt(&AnalysisRequest::default());
        assert!(prompt.categories.is_empty());
        assert_eq!(prompt.text, format!("{PREAMBLE}{POSTAMBLE}"));
    }

    #[test]
    fn test_deterministic() {
        let req = AnalysisRequest::new(
            ["b", "a", "c"],
            Some("mug"),
            &[ContentOption::ProductTags, ContentOption::SeoDescription],
        );
        let first = build_prompt(&req);
        for _ in 0..10 {
            assert_eq!(build_prompt(&req), first);
        }
    }
}
