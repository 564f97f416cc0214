//! # Brewlog Common Library
//!
//! Shared code for the brewlog migration tooling including:
//! - Database initialization, schema and query helpers
//! - Recipe / collection models
//! - Canonical domain value tables and the value normalizer
//! - Configuration loading (database path resolution)

pub mod config;
pub mod db;
pub mod domains;
pub mod error;

pub use error::{Error, Result};
