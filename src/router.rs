use axum::{
    routing::{get, put, MethodRouter},
    Extension, Router,
};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{health, records};
use crate::schema::{self, EntitySchema, Key};
use crate::state::AppState;

/// Every route of the gateway. Transport layers (CORS, body limit) are added by the caller.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(health::root).fallback(health::method_not_allowed))
        .route("/health", get(health::health).fallback(health::method_not_allowed));

    for entity in schema::ALL {
        router = router.merge(entity_routes(entity));
    }

    with_error_handling(router.with_state(state))
}

/// JSON 404 for unknown paths, JSON 500 for panicking handlers, request tracing.
pub fn with_error_handling(router: Router) -> Router {
    router
        .fallback(health::not_found)
        .layer(CatchPanicLayer::custom(health::internal_error))
        .layer(TraceLayer::new_for_http())
}

/// Collection routes (with and without trailing slash) plus, for surrogate keys,
/// the `/:id` item route. The schema reaches the handlers as an `Extension`.
fn entity_routes(entity: &'static EntitySchema) -> Router<AppState> {
    let collection: MethodRouter<AppState> = match entity.key {
        Key::Surrogate(_) => get(records::list).post(records::create),
        Key::Composite(_) => get(records::list)
            .post(records::create)
            .delete(records::delete_by_body),
    }
    .fallback(health::method_not_allowed);

    let mut router = Router::new()
        .route(entity.path, collection.clone())
        .route(&format!("{}/", entity.path), collection);

    if entity.supports_update() {
        router = router.route(
            &format!("{}/:id", entity.path),
            put(records::update)
                .delete(records::delete)
                .fallback(health::method_not_allowed),
        );
    }

    router.layer(Extension(entity))
}

/// Bind the listening socket. `host` may be a hostname or an IPv4/IPv6 literal.
pub async fn bind(host: &str, port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind((host, port)).await
}
