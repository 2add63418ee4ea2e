use serde::{Deserialize, Serialize, Serializer};

pub mod classifier;

/// Body returned when the model produced no usable tool call.
pub const MISS_MESSAGE: &str = "could not classify the text";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParagraphInput {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookCard {
    pub title: String,
    pub author: String,
    pub year: i64,
    pub genre: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorCard {
    pub name: String,
    pub birth_year: i64,
    pub nationality: String,
    pub notable_works: Vec<String>,
}

/// The record kinds a tool call can produce. Serialises as the bare record.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Card {
    Book(BookCard),
    Author(AuthorCard),
}

impl Card {
    pub fn kind(&self) -> &'static str {
        match self {
            Card::Book(_) => "book",
            Card::Author(_) => "author",
        }
    }
}

/// Outcome of one classification: a card, or a soft miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Card(Card),
    Miss,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Classification::Card(card) => card.serialize(s),
            Classification::Miss => ErrorBody { error: MISS_MESSAGE }.serialize(s),
        }
    }
}
