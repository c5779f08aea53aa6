//! Review API client layer
//!
//! - `HomeworkApi` trait so the poll loop can run against a fake
//! - `PracticumClient` implementation over reqwest

pub mod client;
pub mod practicum;

pub use client::HomeworkApi;
pub use practicum::{DEFAULT_ENDPOINT, PracticumClient, PracticumConfig};
