pub mod auth;
pub mod error;
pub mod middleware;
pub mod pages;
pub mod routes;
pub mod session;
pub mod videos;

pub use error::ApiError;
pub use routes::{AppState, AppStateInner, router};
