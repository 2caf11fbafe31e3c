// Domain layer - the fee calculation kernel with no HTTP or storage concerns.
// Prices arrive through the PriceResolver trait already materialized.

pub mod calculation;
pub mod coverage;
pub mod modifiers;
pub mod pricing;
pub mod schemes;

use crate::db::DatabaseError;

// Domain error type - no HTTP concerns.
// A missing required modifier is not an error, see pricing::PriceTotal.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] DatabaseError),

    #[error(transparent)]
    Overflow(#[from] AmountOverflow),
}

// Re-export commonly used types and functions
pub use calculation::{aggregate, calculate_total, unit_amount, CalculationRequest, UnitQuantity};
pub use coverage::coverage;
pub use modifiers::ModifierQuantity;
pub use pricing::{AmountOverflow, AppliedModifier, MissingRequiredModifier, PriceTotal};
pub use schemes::select_scheme;
