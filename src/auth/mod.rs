use crate::state::AppState;
use axum::Router;

mod dto;
pub(crate) mod extractors;
pub mod handlers;
pub mod jwt;
mod otp;
pub mod password;
mod repo;
mod repo_types;

pub use repo_types::User;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
