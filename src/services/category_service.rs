use std::sync::Arc;

use sqlx::{Any, AnyConnection, Transaction};
use validator::Validate;

use crate::api::{CategoryCreateRequest, CategoryResponse, CategoryUpdateRequest};
use crate::database::manager::{DatabaseError, Store};
use crate::database::models::Category;
use crate::database::repository::CategoryRepository;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Database(DatabaseError::Sqlx(err))
    }
}

/// Category business operations.
///
/// Each call runs in its own transaction: committed when the call succeeds,
/// rolled back on every error path.
#[derive(Clone)]
pub struct CategoryService {
    store: Store,
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(store: Store, repository: Arc<dyn CategoryRepository>) -> Self {
        Self { store, repository }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub async fn create(&self, request: CategoryCreateRequest) -> Result<CategoryResponse, ServiceError> {
        // invalid input never opens a transaction
        validate(&request)?;

        let mut tx = self.store.begin().await?;
        let result = self
            .repository
            .save(&mut tx, Category::new(request.name))
            .await
            .map_err(ServiceError::from);

        finish(tx, result).await.map(CategoryResponse::from)
    }

    pub async fn update(&self, request: CategoryUpdateRequest) -> Result<CategoryResponse, ServiceError> {
        validate(&request)?;

        let mut tx = self.store.begin().await?;
        let result = self.update_in(&mut tx, request).await;

        finish(tx, result).await.map(CategoryResponse::from)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let mut tx = self.store.begin().await?;
        let result = self.delete_in(&mut tx, id).await;

        finish(tx, result).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<CategoryResponse, ServiceError> {
        let mut tx = self.store.begin().await?;
        let result = self.find_existing(&mut tx, id).await;

        finish(tx, result).await.map(CategoryResponse::from)
    }

    pub async fn find_all(&self) -> Result<Vec<CategoryResponse>, ServiceError> {
        let mut tx = self.store.begin().await?;
        let result = self.repository.find_all(&mut tx).await.map_err(ServiceError::from);

        let categories = finish(tx, result).await?;
        Ok(categories.into_iter().map(CategoryResponse::from).collect())
    }

    async fn update_in(&self, conn: &mut AnyConnection, request: CategoryUpdateRequest) -> Result<Category, ServiceError> {
        let mut category = self.find_existing(&mut *conn, request.id).await?;
        category.name = request.name;
        self.repository.update(&mut *conn, &category).await?;
        Ok(category)
    }

    async fn delete_in(&self, conn: &mut AnyConnection, id: i64) -> Result<(), ServiceError> {
        let category = self.find_existing(&mut *conn, id).await?;
        self.repository.delete(&mut *conn, &category).await?;
        Ok(())
    }

    async fn find_existing(&self, conn: &mut AnyConnection, id: i64) -> Result<Category, ServiceError> {
        self.repository
            .find_by_id(conn, id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("category {} not found", id)))
    }
}

fn validate<T: Validate>(request: &T) -> Result<(), ServiceError> {
    request
        .validate()
        .map_err(|errors| ServiceError::Validation(errors.to_string()))
}

/// Close `tx` according to `result`: commit on success, rollback otherwise
async fn finish<T>(tx: Transaction<'static, Any>, result: Result<T, ServiceError>) -> Result<T, ServiceError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!("Rollback failed after '{}': {}", err, rollback_err);
            }
            Err(err)
        }
    }
}
