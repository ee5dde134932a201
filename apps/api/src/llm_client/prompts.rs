// Prompt text for article explanations.

pub const EXPLAIN_SYSTEM: &str = "You're a helpful assistant for news credibility analysis.";

pub const EXPLAIN_PROMPT_TEMPLATE: &str = "\
The following news article is predicted as **{label}**.

Explain why this article might be {label_lower} in simple language:

{article}";

pub fn build_explain_prompt(article: &str, label: &str) -> String {
    EXPLAIN_PROMPT_TEMPLATE
        .replace("{label_lower}", &label.to_lowercase())
        .replace("{label}", label)
        .replace("{article}", article)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_explain_prompt_contains_label_and_article() {
        let prompt = build_explain_prompt("Mayor resigns after scandal", "Fake");
        assert!(prompt.starts_with("The following news article is predicted as **Fake**."));
        assert!(prompt.contains("might be fake in simple language"));
        assert!(prompt.ends_with("Mayor resigns after scandal"));
    }

    #[test]
    fn test_build_explain_prompt_mixed_label() {
        let prompt = build_explain_prompt("x", "Mixed");
        assert!(prompt.contains("**Mixed**"));
        assert!(prompt.contains("might be mixed"));
    }
}
