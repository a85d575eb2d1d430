use axum::{
    routing::{get, patch, post, put},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::api::routes::{self, AppState};
use wordbank_core::Repository;

pub async fn run(repo: Arc<dyn Repository>, addr: SocketAddr) -> anyhow::Result<()> {
    let state = Arc::new(AppState { repo });

    let app = Router::new()
        .route("/users", get(routes::list_users).post(routes::register_user))
        .route("/users/login", post(routes::login))
        .route(
            "/categories",
            get(routes::list_categories).post(routes::create_category),
        )
        .route(
            "/categories/:id",
            patch(routes::patch_category).delete(routes::delete_category),
        )
        .route("/vocabs", get(routes::list_vocabs).post(routes::create_vocab))
        .route(
            "/vocabs/:id",
            put(routes::put_vocab)
                .patch(routes::patch_vocab)
                .delete(routes::delete_vocab),
        )
        .route(
            "/question",
            get(routes::list_questions).post(routes::create_question),
        )
        .route(
            "/question/:id",
            put(routes::put_question).delete(routes::delete_question),
        )
        .route("/results", get(routes::list_results).post(routes::create_result))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    tracing::info!(%addr, "serving wordbank api");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
