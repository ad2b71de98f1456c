//! Web layer for the trip planner.
//!
//! Provides HTTP endpoints for planning, ranking and booking trips, as JSON
//! or as server-rendered HTML.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
