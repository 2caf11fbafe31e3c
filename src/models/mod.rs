pub mod api;
pub mod tariff;


pub use api::*;
pub use tariff::*;
