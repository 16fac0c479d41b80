pub mod client;
pub mod error;
pub mod game_api;
pub mod resource;
pub mod types;

pub use client::{ApiClient, Method};
pub use error::ApiError;
pub use game_api::GameApi;
pub use resource::{fetch_all, ApiResource, BatchRequest, BatchResult};
