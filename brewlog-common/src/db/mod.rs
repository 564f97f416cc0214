//! Database access layer

pub mod collections;
pub mod init;
pub mod models;
pub mod recipes;
pub mod schema;

pub use init::{connect, init_database};
