use crate::model::DataNode;
use regex::Regex;
use std::sync::LazyLock;

// A run of line breaks, or ". " directly before a "N." step number. The
// number is captured so it stays at the start of the following step.
static STEP_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r?\n)+|\.\s+(\d+\.)").unwrap());

/// Turn `recipeInstructions` of any shape into a list of non-empty steps.
///
/// Strings are split into steps, arrays contribute one step per string or
/// per object `text` (falling back to `name`). Anything else has no steps.
pub fn normalize_instructions(instructions: Option<&DataNode>) -> Vec<String> {
    match instructions {
        Some(DataNode::String(text)) => split_steps(text),
        Some(DataNode::Array(items)) => items.iter().filter_map(step_from_item).collect(),
        _ => Vec::new(),
    }
}

fn split_steps(text: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut start = 0;

    for caps in STEP_BOUNDARY.captures_iter(text) {
        let Some(boundary) = caps.get(0) else {
            continue;
        };
        fragments.push(&text[start..boundary.start()]);
        start = caps.get(1).map_or(boundary.end(), |number| number.start());
    }
    fragments.push(&text[start..]);

    fragments
        .into_iter()
        .map(|fragment| {
            fragment
                .trim_matches(|c: char| matches!(c, ' ' | '-' | '•' | '\t'))
                .trim()
        })
        .filter(|step| !step.is_empty())
        .map(str::to_string)
        .collect()
}

fn step_from_item(item: &DataNode) -> Option<String> {
    let text = match item {
        DataNode::String(s) => s.as_str(),
        DataNode::Object(_) => ["text", "name"]
            .iter()
            .filter_map(|key| item.get(*key).and_then(DataNode::as_str))
            .find(|s| !s.is_empty())
            .unwrap_or(""),
        _ => return None,
    };

    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(value: DataNode) -> Vec<String> {
        normalize_instructions(Some(&value))
    }

    #[test]
    fn test_empty_inputs() {
        assert!(normalize_instructions(None).is_empty());
        assert!(normalize(json!("")).is_empty());
        assert!(normalize(json!("   \n\n  ")).is_empty());
        assert!(normalize(json!([])).is_empty());
        assert!(normalize(json!(null)).is_empty());
        assert!(normalize(json!(42)).is_empty());
        assert!(normalize(json!({"text": "Boil"})).is_empty());
    }

    #[test]
    fn test_newline_separated() {
        assert_eq!(
            normalize(json!("Boil water.\n\n- Add leaves\r\n\t• Steep 3 min.\n")),
            vec!["Boil water.", "Add leaves", "Steep 3 min."]
        );
    }

    #[test]
    fn test_inline_numbered_steps() {
        assert_eq!(
            normalize(json!("1. Boil water. 2. Add leaves. 3. Steep 3 min.")),
            vec!["1. Boil water", "2. Add leaves", "3. Steep 3 min."]
        );
    }

    #[test]
    fn test_prose_without_numbers_stays_one_step() {
        assert_eq!(
            normalize(json!("Boil water. Add leaves. Steep 3 min.")),
            vec!["Boil water. Add leaves. Steep 3 min."]
        );
    }

    #[test]
    fn test_decimal_quantities_do_not_split() {
        assert_eq!(
            normalize(json!("Add 1.5 cups water. Simmer for 10 minutes.")),
            vec!["Add 1.5 cups water. Simmer for 10 minutes."]
        );
    }

    #[test]
    fn test_step_objects() {
        assert_eq!(
            normalize(json!([
                {"@type": "HowToStep", "text": "Preheat oven"},
                {"@type": "HowToStep", "text": "Bake 20 min"}
            ])),
            vec!["Preheat oven", "Bake 20 min"]
        );
    }

    #[test]
    fn test_mixed_sequence() {
        assert_eq!(
            normalize(json!([
                "  Chop onions ",
                {"name": "Fry onions"},
                {"text": "", "name": "Add spices"},
                {"text": "   "},
                {"itemListElement": []},
                7,
                null,
                ["nested"],
                ""
            ])),
            vec!["Chop onions", "Fry onions", "Add spices"]
        );
    }
}
