use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `category` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    /// Assigned by the store; zero until the row has been saved
    pub id: i64,
    pub name: String,
}

impl Category {
    pub const UNSAVED_ID: i64 = 0;

    /// A category that has not been persisted yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Self::UNSAVED_ID,
            name: name.into(),
        }
    }
}
