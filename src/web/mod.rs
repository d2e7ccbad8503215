pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::{build_router, create_router};
pub use state::AppState;
