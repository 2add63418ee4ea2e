//! Classifies a passage as being about a book or an author by letting an LLM
//! call one of two card tools, then building the card it chose.

pub mod api;
pub mod cli;
pub mod clients;
pub mod core;
pub mod domain;
pub mod infra;
pub mod tools;
