pub mod connection;
pub mod errors;
pub mod memory;
pub mod postgres;
pub mod queries;
pub mod repository;

#[cfg(test)]
mod tests;

pub use connection::*;
pub use errors::*;
pub use memory::InMemoryTariffRepository;
pub use postgres::PgTariffRepository;
pub use repository::*;
