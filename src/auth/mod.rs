use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod password;
mod views;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::page_routes())
        .merge(handlers::flow_routes())
}
