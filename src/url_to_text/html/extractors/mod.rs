use crate::error::ScrapeFailure;
use crate::model::RecipeRecord;
use scraper::Html;

mod instructions;
mod json_ld;
mod locator;

pub use instructions::normalize_instructions;
pub use json_ld::{assemble_recipe, extract_blocks, repair_block, try_parse, JsonLdExtractor};
pub use locator::{find_recipe_node, is_recipe_type, main_entity};

pub struct ParsingContext {
    pub url: String,
    pub document: Html,
}

impl ParsingContext {
    pub fn new(url: &str, html: &str) -> Self {
        Self {
            url: url.to_string(),
            document: Html::parse_document(html),
        }
    }
}

pub trait Extractor {
    fn parse(&self, context: &ParsingContext) -> Result<RecipeRecord, ScrapeFailure>;
}
