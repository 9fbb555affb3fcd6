use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalog entry. `id` is assigned by storage on insert and immutable after.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
}
