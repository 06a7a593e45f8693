use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::{AuthError, TokenIssuer};
use crate::config::AppConfig;
use crate::database::Store;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::services::{AuthService, BookmarkService, UserService};

/// Shared per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Store>,
    pub tokens: TokenIssuer,
    pub auth: AuthService,
    pub users: UserService,
    pub bookmarks: BookmarkService,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Result<Self, AuthError> {
        let tokens = TokenIssuer::from_config(&config.security)?;

        Ok(Self {
            auth: AuthService::new(store.clone(), tokens.clone(), config.security.bcrypt_cost)?,
            users: UserService::new(store.clone()),
            bookmarks: BookmarkService::new(store.clone()),
            config: Arc::new(config),
            store,
            tokens,
        })
    }
}

/// Build the full router
pub fn app(state: AppState) -> Router {
    let protected = Router::new()
        .merge(user_routes())
        .merge(bookmark_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth_middleware));

    let mut router = Router::new()
        // Public
        .route("/", get(public::system::root))
        .route("/health", get(public::system::health))
        .merge(auth_routes())
        // Protected
        .merge(protected)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = cors_layer(&state.config) {
        router = router.layer(cors);
    }

    router.with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/signin", post(auth::signin))
}

fn user_routes() -> Router<AppState> {
    use protected::users;

    Router::new()
        .route("/users/me", get(users::get_me))
        .route("/users", patch(users::edit_user))
}

fn bookmark_routes() -> Router<AppState> {
    use protected::bookmarks;

    Router::new()
        .route("/bookmarks", get(bookmarks::list).post(bookmarks::create))
        .route(
            "/bookmarks/:id",
            get(bookmarks::get)
                .patch(bookmarks::edit)
                .delete(bookmarks::delete),
        )
}

fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    if !config.security.enable_cors {
        return None;
    }
    if config.security.cors_origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    )
}
