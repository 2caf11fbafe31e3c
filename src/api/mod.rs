// Request boundary - thin HTTP layer in front of the calculation kernel.
// Handlers only deal with HTTP concerns:
// 1. Extract parameters from the request
// 2. Validate them against the tariff catalog
// 3. Call domain logic
// 4. Transform the domain result into an HTTP response

pub mod error;
pub mod handler;
pub mod server;
pub mod utils;

pub use error::{ApiError, ApiResult};
pub use server::{create_app, AppState};
