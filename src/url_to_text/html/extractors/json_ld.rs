use super::instructions::normalize_instructions;
use super::locator::{find_recipe_node, is_present, main_entity};
use super::{Extractor, ParsingContext};
use crate::error::ScrapeFailure;
use crate::model::{DataNode, RecipeRecord, DEFAULT_RECIPE_NAME};
use html_escape::decode_html_entities;
use log::debug;
use scraper::{Html, Selector};

const JSON_LD_TYPE: &str = "application/ld+json";

pub struct JsonLdExtractor;

impl Extractor for JsonLdExtractor {
    fn parse(&self, context: &ParsingContext) -> Result<RecipeRecord, ScrapeFailure> {
        debug!("JsonLdExtractor: Starting parse for URL: {}", context.url);
        let blocks = extract_blocks(&context.document);
        debug!("JsonLdExtractor: Parsed {} JSON-LD blocks", blocks.len());

        for (index, block) in blocks.iter().enumerate() {
            let Some(candidate) = find_recipe_node(block).or_else(|| main_entity(block)) else {
                debug!("JsonLdExtractor: No recipe node in block {}", index);
                continue;
            };

            match assemble_recipe(candidate, &context.url) {
                Some(recipe) => {
                    debug!("JsonLdExtractor: Recipe found in block {}", index);
                    return Ok(recipe);
                }
                None => debug!("JsonLdExtractor: Recipe node in block {} has no usable fields", index),
            }
        }

        Err(ScrapeFailure::NoRecipeFound)
    }
}

/// Parse every JSON-LD script of the page, in document order.
///
/// Blocks that are empty or unparsable even after repair are skipped.
pub fn extract_blocks(document: &Html) -> Vec<DataNode> {
    let selector = Selector::parse("script[type]").unwrap();

    document
        .select(&selector)
        .filter(|script| {
            script
                .value()
                .attr("type")
                .map_or(false, |t| t.trim().eq_ignore_ascii_case(JSON_LD_TYPE))
        })
        .enumerate()
        .filter_map(|(index, script)| {
            let raw = script.text().collect::<String>();
            let decoded = decode_html_entities(&raw);
            let block = decoded.trim();
            if block.is_empty() {
                return None;
            }

            match try_parse(block) {
                Ok(node) => Some(node),
                Err(e) => {
                    debug!("JsonLdExtractor: Skipping script {}: {}", index, e);
                    None
                }
            }
        })
        .collect()
}

/// Strict parse, then a single retry on the repaired text.
pub fn try_parse(block: &str) -> Result<DataNode, serde_json::Error> {
    serde_json::from_str(block).or_else(|e| {
        debug!("JsonLdExtractor: Strict parse failed ({}), retrying repaired", e);
        serde_json::from_str(&repair_block(block))
    })
}

/// Collapse newlines and, when the text looks like several concatenated
/// objects, turn it into one array of them.
pub fn repair_block(block: &str) -> String {
    let collapsed = block.replace('\n', " ");
    let collapsed = collapsed.trim();

    if collapsed.is_empty() || collapsed.starts_with('[') || collapsed.matches('{').count() <= 1 {
        return collapsed.to_string();
    }

    format!("[{}]", separate_top_level_objects(collapsed))
}

// Inserts the comma missing between `}` and `{` at nesting depth zero.
fn separate_top_level_objects(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut after_object = false;

    for c in text.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            out.push(c);
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' | '[' => {
                if depth == 0 && c == '{' && after_object {
                    out.push(',');
                }
                depth += 1;
            }
            '}' | ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if depth == 0 && !c.is_whitespace() {
            after_object = c == '}';
        }
        out.push(c);
    }

    out
}

/// Build a record from a recipe node, or `None` when it has no name,
/// ingredients or steps.
pub fn assemble_recipe(node: &DataNode, url: &str) -> Option<RecipeRecord> {
    let name = node
        .get("name")
        .and_then(DataNode::as_str)
        .map(|n| decode_html_entities(n).trim().to_string())
        .unwrap_or_default();

    let ingredients = first_present(node, &["recipeIngredient", "ingredients"])
        .and_then(DataNode::as_array)
        .map(|items| clean_list(items.iter().filter_map(DataNode::as_str)))
        .unwrap_or_default();

    let instructions = first_present(node, &["recipeInstructions", "instructions"]);
    let steps = clean_list(normalize_instructions(instructions).iter().map(String::as_str));

    if name.is_empty() && ingredients.is_empty() && steps.is_empty() {
        return None;
    }

    Some(RecipeRecord {
        name: if name.is_empty() {
            DEFAULT_RECIPE_NAME.to_string()
        } else {
            name
        },
        url: url.to_string(),
        ingredients,
        steps,
    })
}

fn first_present<'a>(node: &'a DataNode, keys: &[&str]) -> Option<&'a DataNode> {
    keys.iter()
        .filter_map(|key| node.get(*key))
        .find(|value| is_present(value))
}

fn clean_list<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    items
        .map(|item| decode_html_entities(item).trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
