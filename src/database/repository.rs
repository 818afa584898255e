use async_trait::async_trait;
use sqlx::AnyConnection;
use tracing::debug;

use crate::database::manager::DatabaseError;
use crate::database::models::Category;

/// Data access for the `category` table.
///
/// Every call runs on the caller's connection, normally the one owned by an
/// open transaction, so several calls can share one unit of work. None of
/// these methods check existence: callers look a row up first when it matters.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert `category` and return it with the store-assigned id
    async fn save(&self, conn: &mut AnyConnection, category: Category) -> Result<Category, DatabaseError>;

    /// Overwrite the name of the row matching `category.id`
    async fn update(&self, conn: &mut AnyConnection, category: &Category) -> Result<(), DatabaseError>;

    async fn delete(&self, conn: &mut AnyConnection, category: &Category) -> Result<(), DatabaseError>;

    async fn find_by_id(&self, conn: &mut AnyConnection, id: i64) -> Result<Option<Category>, DatabaseError>;

    /// All rows in ascending id order
    async fn find_all(&self, conn: &mut AnyConnection) -> Result<Vec<Category>, DatabaseError>;
}

/// SQL implementation shared by the postgres and sqlite dialects
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlCategoryRepository;

impl SqlCategoryRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CategoryRepository for SqlCategoryRepository {
    async fn save(&self, conn: &mut AnyConnection, mut category: Category) -> Result<Category, DatabaseError> {
        let id: i64 = sqlx::query_scalar("INSERT INTO category (name) VALUES ($1) RETURNING id")
            .bind(category.name.as_str())
            .fetch_one(&mut *conn)
            .await?;

        debug!("Inserted category {}", id);
        category.id = id;
        Ok(category)
    }

    async fn update(&self, conn: &mut AnyConnection, category: &Category) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE category SET name = $1 WHERE id = $2")
            .bind(category.name.as_str())
            .bind(category.id)
            .execute(&mut *conn)
            .await?;

        debug!("Updated category {} ({} rows)", category.id, result.rows_affected());
        Ok(())
    }

    async fn delete(&self, conn: &mut AnyConnection, category: &Category) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM category WHERE id = $1")
            .bind(category.id)
            .execute(&mut *conn)
            .await?;

        debug!("Deleted category {} ({} rows)", category.id, result.rows_affected());
        Ok(())
    }

    async fn find_by_id(&self, conn: &mut AnyConnection, id: i64) -> Result<Option<Category>, DatabaseError> {
        let category = sqlx::query_as::<_, Category>("SELECT id, name FROM category WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(category)
    }

    async fn find_all(&self, conn: &mut AnyConnection) -> Result<Vec<Category>, DatabaseError> {
        let categories = sqlx::query_as::<_, Category>("SELECT id, name FROM category ORDER BY id ASC")
            .fetch_all(&mut *conn)
            .await?;

        Ok(categories)
    }
}
