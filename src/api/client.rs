//! Review API trait definition

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Source of homework status responses
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    /// Fetch statuses changed since `from_date` (unix seconds).
    ///
    /// Returns the parsed JSON body of a successful response. Shape checks are
    /// not done here.
    async fn fetch(&self, from_date: i64) -> Result<Value>;
}
