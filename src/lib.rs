//! Aggregate every upload of a YouTube channel into a single RSS feed,
//! most recent first.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod sources;
