use crate::model::DataNode;

/// Find the first node declaring itself a Recipe.
///
/// Walks the tree with an explicit stack so hostile nesting depth cannot
/// exhaust the call stack. Children are pushed in reverse, so nodes are
/// visited in document pre-order and the earliest match wins.
pub fn find_recipe_node(root: &DataNode) -> Option<&DataNode> {
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        match node {
            DataNode::Object(map) => {
                if is_recipe_type(node) {
                    return Some(node);
                }
                stack.extend(map.values().rev().filter(|v| is_container(v)));
            }
            DataNode::Array(items) => {
                stack.extend(items.iter().rev().filter(|v| is_container(v)));
            }
            _ => {}
        }
    }

    None
}

/// The `mainEntity` of a top-level object, when it is itself an object.
pub fn main_entity(root: &DataNode) -> Option<&DataNode> {
    root.get("mainEntity").filter(|entity| entity.is_object())
}

/// Whether `@type` (falling back to `type`) names Recipe, as a string or
/// anywhere in an array of strings.
pub fn is_recipe_type(node: &DataNode) -> bool {
    let declared = ["@type", "type"]
        .iter()
        .filter_map(|key| node.get(*key))
        .find(|value| is_present(value));

    match declared {
        Some(DataNode::Array(types)) => types.iter().any(names_recipe),
        Some(value) => names_recipe(value),
        None => false,
    }
}

fn names_recipe(value: &DataNode) -> bool {
    value
        .as_str()
        .map_or(false, |t| t.eq_ignore_ascii_case("recipe"))
}

fn is_container(value: &DataNode) -> bool {
    value.is_object() || value.is_array()
}

/// Missing-equivalent values fall through to the next key.
pub(crate) fn is_present(value: &DataNode) -> bool {
    match value {
        DataNode::Null => false,
        DataNode::Bool(b) => *b,
        DataNode::String(s) => !s.is_empty(),
        DataNode::Array(a) => !a.is_empty(),
        DataNode::Object(o) => !o.is_empty(),
        DataNode::Number(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_recipe() {
        let root = json!({"@type": "Recipe", "name": "Tea"});
        assert_eq!(find_recipe_node(&root).unwrap()["name"], "Tea");
    }

    #[test]
    fn test_type_variants() {
        assert!(is_recipe_type(&json!({"@type": "recipe"})));
        assert!(is_recipe_type(&json!({"@type": "RECIPE"})));
        assert!(is_recipe_type(&json!({"@type": ["NewsArticle", "Recipe"]})));
        assert!(is_recipe_type(&json!({"type": "Recipe"})));
        // an empty @type falls through to type
        assert!(is_recipe_type(&json!({"@type": "", "type": "Recipe"})));
        assert!(!is_recipe_type(&json!({"@type": "WebPage", "type": "Recipe"})));
        assert!(!is_recipe_type(&json!({"@type": "HowToStep"})));
        assert!(!is_recipe_type(&json!({"name": "Recipe"})));
        assert!(!is_recipe_type(&json!("Recipe")));
    }

    #[test]
    fn test_graph_recipe() {
        let root = json!({
            "@context": "https://schema.org",
            "@graph": [
                {"@type": "WebSite", "name": "Site"},
                {"@type": "BreadcrumbList", "itemListElement": []},
                {"@type": "Recipe", "name": "Dal"}
            ]
        });
        assert_eq!(find_recipe_node(&root).unwrap()["name"], "Dal");
    }

    #[test]
    fn test_first_match_in_document_order() {
        let root = json!([
            {"@type": "Recipe", "name": "X"},
            {"@type": "Recipe", "name": "Y"}
        ]);
        assert_eq!(find_recipe_node(&root).unwrap()["name"], "X");
    }

    #[test]
    fn test_outer_recipe_wins_over_nested() {
        let root = json!({
            "@type": "Recipe",
            "name": "Outer",
            "hasPart": {"@type": "Recipe", "name": "Inner"}
        });
        assert_eq!(find_recipe_node(&root).unwrap()["name"], "Outer");
    }

    #[test]
    fn test_no_recipe() {
        let root = json!({"@type": "WebPage", "about": [1, "two", null, {"@type": "Thing"}]});
        assert!(find_recipe_node(&root).is_none());
        assert!(find_recipe_node(&json!("Recipe")).is_none());
    }

    #[test]
    fn test_deep_nesting_terminates() {
        let mut node = json!({"@type": "Recipe", "name": "Deep"});
        for i in 0..2_000 {
            node = if i % 2 == 0 {
                json!([node])
            } else {
                json!({"child": node})
            };
        }
        assert_eq!(find_recipe_node(&node).unwrap()["name"], "Deep");
    }

    #[test]
    fn test_main_entity() {
        let root = json!({"@type": "WebPage", "mainEntity": {"name": "Soup"}});
        assert_eq!(main_entity(&root).unwrap()["name"], "Soup");

        let reference = json!({"@type": "WebPage", "mainEntity": "#recipe"});
        assert!(main_entity(&reference).is_none());
        assert!(main_entity(&json!([{"mainEntity": {}}])).is_none());
    }
}
