use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, FromRef};
use axum::routing::get;
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::auth::{Authenticator, StaticApiKey};
use crate::config::AppConfig;
use crate::database::{DatabaseError, SqlCategoryRepository, Store};
use crate::handlers::{category, fallback};
use crate::middleware::{api_key_middleware, handle_panic};
use crate::services::CategoryService;

/// Shared, cheaply cloneable state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub categories: CategoryService,
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    pub fn new(categories: CategoryService, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            categories,
            authenticator,
        }
    }

    /// Connect the store and wire the default repository and API-key check
    pub async fn from_config(config: &AppConfig) -> Result<Self, DatabaseError> {
        let store = Store::connect(&config.database).await?;
        let categories = CategoryService::new(store, Arc::new(SqlCategoryRepository::new()));
        let authenticator = Arc::new(StaticApiKey::new(
            config.security.api_key_header.clone(),
            config.security.api_key.clone(),
        ));
        Ok(Self::new(categories, authenticator))
    }
}

impl FromRef<AppState> for CategoryService {
    fn from_ref(state: &AppState) -> Self {
        state.categories.clone()
    }
}

/// Full application router.
///
/// Layer order, outermost first: panic catcher, CORS, tracing, API-key check,
/// then routing. Every path, known or not, is authenticated.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let authenticator = state.authenticator.clone();

    let router = Router::new()
        .merge(category_routes())
        .fallback(fallback::not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(middleware::from_fn_with_state(authenticator, api_key_middleware));

    with_service_layers(router, config)
}

/// Wrap `router` in optional request tracing, CORS and the panic catcher
pub fn with_service_layers(router: Router, config: &AppConfig) -> Router {
    let cors = if config.security.enable_cors {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    let router = if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };
    router.layer(
        ServiceBuilder::new()
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(cors),
    )
}

fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/categories",
            get(category::find_all)
                .post(category::create)
                .fallback(fallback::method_not_allowed),
        )
        .route(
            "/api/categories/:category_id",
            get(category::find_by_id)
                .put(category::update)
                .delete(category::delete)
                .fallback(fallback::method_not_allowed),
        )
}

/// Serve `app` on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await
}

/// Resolves on Ctrl-C
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
