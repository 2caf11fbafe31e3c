use async_trait::async_trait;
use chrono::NaiveDate;

use crate::db::errors::Result;
use crate::models::{
    AdvocateType, FeeType, ModifierType, OffenceClass, Price, PriceQuery, Scenario, Scheme,
    SupplierBaseType, Unit,
};

/// Resolves the candidate prices for one axis combination.
///
/// Returned prices carry their modifiers. Zero, one or many prices may match
/// and they are never deduplicated.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceResolver: Send + Sync {
    async fn resolve_prices(&self, query: &PriceQuery) -> Result<Vec<Price>>;
}

/// Reference data the request boundary validates raw input against
#[async_trait]
pub trait TariffCatalog: PriceResolver {
    async fn scheme(&self, id: i64) -> Result<Option<Scheme>>;

    /// Scheme of `supplier_type` valid on `case_date`
    async fn find_scheme(
        &self,
        supplier_type: SupplierBaseType,
        case_date: NaiveDate,
    ) -> Result<Option<Scheme>>;

    async fn scenario(&self, id: i64) -> Result<Option<Scenario>>;

    async fn fee_type_by_code(&self, code: &str) -> Result<Option<FeeType>>;

    async fn offence_class(&self, id: &str) -> Result<Option<OffenceClass>>;

    async fn advocate_type(&self, id: &str) -> Result<Option<AdvocateType>>;

    async fn units(&self) -> Result<Vec<Unit>>;

    async fn modifier_types(&self) -> Result<Vec<ModifierType>>;
}
