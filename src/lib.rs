pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod models;

// Re-export commonly used types
pub use models::{
    AggregationType, CalculateResponse, FeeType, Modifier, Price, PriceQuery, Scheme,
    SupplierBaseType,
};

pub use db::{
    DatabaseError, InMemoryTariffRepository, PgTariffRepository, PriceResolver, TariffCatalog,
};

pub use domain::{
    calculate_total, CalculationRequest, DomainError, ModifierQuantity, PriceTotal, UnitQuantity,
};

pub use config::{ConfigError, ServerConfig};
