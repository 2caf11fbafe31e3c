use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use crate::db::errors::Result;
use crate::db::repository::{PriceResolver, TariffCatalog};
use crate::domain::select_scheme;
use crate::models::{
    AdvocateType, FeeType, ModifierType, OffenceClass, Price, PriceQuery, Scenario, Scheme,
    SupplierBaseType, Unit,
};

/// Tariff repository over materialized entities
///
/// Prices keep their insertion order, which is the order they are resolved in.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTariffRepository {
    pub schemes: Vec<Scheme>,
    pub scenarios: Vec<Scenario>,
    pub fee_types: Vec<FeeType>,
    pub offence_classes: Vec<OffenceClass>,
    pub advocate_types: Vec<AdvocateType>,
    pub units: Vec<Unit>,
    pub modifier_types: Vec<ModifierType>,
    pub prices: Vec<Price>,
}

impl InMemoryTariffRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.schemes.push(scheme);
        self
    }

    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenarios.push(scenario);
        self
    }

    pub fn with_fee_type(mut self, fee_type: FeeType) -> Self {
        self.fee_types.push(fee_type);
        self
    }

    pub fn with_offence_class(mut self, offence_class: OffenceClass) -> Self {
        self.offence_classes.push(offence_class);
        self
    }

    pub fn with_advocate_type(mut self, advocate_type: AdvocateType) -> Self {
        self.advocate_types.push(advocate_type);
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.units.push(unit);
        self
    }

    pub fn with_modifier_type(mut self, modifier_type: ModifierType) -> Self {
        self.modifier_types.push(modifier_type);
        self
    }

    pub fn with_price(mut self, price: Price) -> Self {
        self.prices.push(price);
        self
    }
}

#[async_trait]
impl PriceResolver for InMemoryTariffRepository {
    async fn resolve_prices(&self, query: &PriceQuery) -> Result<Vec<Price>> {
        let prices: Vec<Price> = self
            .prices
            .iter()
            .filter(|price| price.matches(query))
            .cloned()
            .collect();

        debug!(unit = %query.unit_id, matched = prices.len(), "Resolved prices in memory");
        Ok(prices)
    }
}

#[async_trait]
impl TariffCatalog for InMemoryTariffRepository {
    async fn scheme(&self, id: i64) -> Result<Option<Scheme>> {
        Ok(self.schemes.iter().find(|s| s.id == id).cloned())
    }

    async fn find_scheme(
        &self,
        supplier_type: SupplierBaseType,
        case_date: NaiveDate,
    ) -> Result<Option<Scheme>> {
        Ok(select_scheme(&self.schemes, supplier_type, case_date).cloned())
    }

    async fn scenario(&self, id: i64) -> Result<Option<Scenario>> {
        Ok(self.scenarios.iter().find(|s| s.id == id).cloned())
    }

    async fn fee_type_by_code(&self, code: &str) -> Result<Option<FeeType>> {
        Ok(self.fee_types.iter().find(|f| f.code == code).cloned())
    }

    async fn offence_class(&self, id: &str) -> Result<Option<OffenceClass>> {
        Ok(self.offence_classes.iter().find(|o| o.id == id).cloned())
    }

    async fn advocate_type(&self, id: &str) -> Result<Option<AdvocateType>> {
        Ok(self.advocate_types.iter().find(|a| a.id == id).cloned())
    }

    async fn units(&self) -> Result<Vec<Unit>> {
        Ok(self.units.clone())
    }

    async fn modifier_types(&self) -> Result<Vec<ModifierType>> {
        Ok(self.modifier_types.clone())
    }
}
