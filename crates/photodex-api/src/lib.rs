//! Photodex API Library
//!
//! HTTP handlers, error rendering and application setup for the image catalogue.

mod api_doc;
mod handlers;

pub mod error;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
