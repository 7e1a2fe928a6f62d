use serde::{Deserialize, Serialize};

/// A parsed JSON-LD value: object, array or scalar.
pub type DataNode = serde_json::Value;

/// Name used when a recipe node carries ingredients or steps but no name.
pub const DEFAULT_RECIPE_NAME: &str = "Recipe";

/// A recipe extracted from a web page.
///
/// At least one of `name`, `ingredients` or `steps` came from the page; a
/// node with none of them is reported as "no recipe found" instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub name: String,
    pub url: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

/// Body of a fetched page, already decoded to text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPage {
    pub body: String,
    /// Charset declared by the response, `utf-8` when absent
    pub charset: String,
}
