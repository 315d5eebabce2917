use crate::{auth, handlers, middleware::SecurityHeaders, AppState};
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

/// Build the HTTP surface. Routes behind Basic Auth share one `route_layer`
/// so an unmatched path never triggers a credential check.
pub fn app(state: AppState, security: SecurityHeaders) -> Router {
    let protected_routes = Router::new()
        .route("/new", post(handlers::create_adventure_handler))
        .route("/update/{id}", put(handlers::update_adventure_handler))
        .route("/delete/{id}", delete(handlers::delete_adventure_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_basic_auth,
        ));

    Router::new()
        .route("/register", post(handlers::register_handler))
        .route("/ads", get(handlers::list_adventures_handler))
        .route("/ads/{id}", get(handlers::get_adventure_handler))
        .merge(protected_routes)
        .layer(middleware::from_fn_with_state(
            security,
            crate::middleware::add_security_headers,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
