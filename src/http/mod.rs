//! HTTP control surface
//!
//! REST API over the recording lifecycle:
//! - GET  /recordings, GET/DELETE /recordings/:id - listing and detail
//! - POST /recordings/:id/generate|translate - enrichment
//! - POST /capture/start|stop|save|discard - recording lifecycle
//! - GET/PUT /settings/api-key - credential management
//! - GET  /health - health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
