use crate::agent::ChatAgent;
use crate::models::chat::{ ChatRequest, ChatResponse, ErrorResponse };
use crate::ui::INDEX_HTML;
use std::sync::Arc;
use axum::{
    routing::{ get, post },
    Router,
    extract::{ rejection::JsonRejection, State },
    response::{ Html, IntoResponse, Response },
    Json,
};
use tower::ServiceBuilder;
use tower_http::cors::{ Any, CorsLayer };
use log::warn;

#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<ChatAgent>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/chat", post(chat_handler))
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state)
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>
) -> Response {
    let Json(req) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            warn!("Rejected chat request body: {}", rejection.body_text());
            let body = ErrorResponse { error: rejection.body_text() };
            return (rejection.status(), Json(body)).into_response();
        }
    };

    match state.agent.respond(req.messages).await {
        Ok(text) => Json(ChatResponse { text }).into_response(),
        Err(e) => e.into_response(),
    }
}
