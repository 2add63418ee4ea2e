use serde_json::Value;

use crate::core::error::ClassifyError;
use crate::core::tool::{CardTool, Param, ParamKind, ToolSpec};
use crate::domain::{BookCard, Card};

pub const NAME: &str = "make_book_card";

const PARAMS: &[Param] = &[
    Param::new("title", ParamKind::String),
    Param::new("author", ParamKind::String),
    Param::new("year", ParamKind::Integer),
    Param::new("genre", ParamKind::String),
];

#[derive(Clone, Copy, Default)]
pub struct BookCardTool;

impl ToolSpec for BookCardTool {
    fn name(&self) -> &'static str {
        NAME
    }
    fn description(&self) -> &'static str {
        "Creates a JSON card with information about a book"
    }
    fn params(&self) -> &'static [Param] {
        PARAMS
    }
}

impl CardTool for BookCardTool {
    fn build(&self, args: Value) -> Result<Card, ClassifyError> {
        let card: BookCard = super::from_validated(NAME, args)?;
        Ok(Card::Book(card))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_builds_book_card_verbatim() {
        let card = BookCardTool
            .construct(json!({
                "title": "Pride and Prejudice",
                "author": "Jane Austen",
                "year": 1813,
                "genre": "romance"
            }))
            .unwrap();
        assert_eq!(
            card,
            Card::Book(BookCard {
                title: "Pride and Prejudice".into(),
                author: "Jane Austen".into(),
                year: 1813,
                genre: "romance".into(),
            })
        );
    }

    fn emma(year: serde_json::Value) -> serde_json::Value {
        json!({"title": "Emma", "author": "Jane Austen", "year": year, "genre": "novel"})
    }

    #[test]
    fn it_reads_year_given_as_string_or_integral_float() {
        for year in [json!("1815"), json!(1815.0)] {
            let Card::Book(b) = BookCardTool.construct(emma(year)).unwrap() else {
                panic!("expected book card")
            };
            assert_eq!(b.year, 1815);
        }
    }

    #[test]
    fn it_rejects_unusable_years() {
        for year in [json!(1815.5), json!("circa 1815"), json!(true), json!(null)] {
            let err = BookCardTool.construct(emma(year.clone())).unwrap_err();
            match err {
                ClassifyError::Validation { field, .. } => assert_eq!(field, "year", "year = {year}"),
                other => panic!("expected validation error for {year}, got {other:?}"),
            }
        }
    }

    #[test]
    fn schema_lists_the_four_book_fields() {
        let schema = BookCardTool.input_schema();
        assert_eq!(schema["required"], json!(["title", "author", "year", "genre"]));
    }
}
