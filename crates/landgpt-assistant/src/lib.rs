//! Keyword-driven answers to land-record questions.
//!
//! [`KeywordResponder`] classifies free text into a fixed set of categories
//! and answers from the FAQ and record stores. [`seed`] holds the legal FAQs
//! the store is populated with at setup.

pub mod districts;
pub mod responder;
pub mod seed;

pub use districts::DistrictKeyword;
pub use responder::{Category, KeywordResponder, Response};
