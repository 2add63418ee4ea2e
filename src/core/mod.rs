//! Core types & traits: the tool contract, completion wire shapes and the error model.

pub mod completion;
pub mod error;
pub mod tool;
