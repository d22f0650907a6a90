mod dto;
pub mod handlers;
pub(crate) mod extractors;
mod session;

pub use extractors::Session;
pub use session::{SessionClaims, SessionKeys};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
