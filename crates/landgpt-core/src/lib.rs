//! Core types and trait definitions for the LandGPT land-record store.
//!
//! This crate is free of database and I/O dependencies. Storage backends,
//! the mock Bhulekh generator and the keyword responder all build on it.

// Native `async fn` in traits; the store traits spell out `Send` futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod faq;
pub mod query_log;
pub mod record;
pub mod store;

pub use error::{Error, Result};
