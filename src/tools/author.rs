use serde_json::Value;

use crate::core::error::ClassifyError;
use crate::core::tool::{CardTool, ItemKind, Param, ParamKind, ToolSpec};
use crate::domain::{AuthorCard, Card};

pub const NAME: &str = "make_author_card";

const PARAMS: &[Param] = &[
    Param::new("name", ParamKind::String),
    Param::new("birth_year", ParamKind::Integer),
    Param::new("nationality", ParamKind::String),
    Param::new("notable_works", ParamKind::Array(ItemKind::String)),
];

#[derive(Clone, Copy, Default)]
pub struct AuthorCardTool;

impl ToolSpec for AuthorCardTool {
    fn name(&self) -> &'static str {
        NAME
    }
    fn description(&self) -> &'static str {
        "Creates a JSON card with information about an author"
    }
    fn params(&self) -> &'static [Param] {
        PARAMS
    }
}

impl CardTool for AuthorCardTool {
    fn build(&self, args: Value) -> Result<Card, ClassifyError> {
        let card: AuthorCard = super::from_validated(NAME, args)?;
        Ok(Card::Author(card))
    }
}
