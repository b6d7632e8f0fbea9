//! Console front end for LandGPT: setup, demo walkthrough, interactive
//! questions and database statistics.

pub mod app;
pub mod chat;
pub mod config;
pub mod demo;

pub use app::App;
pub use config::AppConfig;
