use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::db::errors::Result;
use crate::db::queries;
use crate::db::repository::{PriceResolver, TariffCatalog};
use crate::domain::select_scheme;
use crate::models::{
    AdvocateType, FeeType, ModifierType, OffenceClass, Price, PriceQuery, Scenario, Scheme,
    SupplierBaseType, Unit,
};

/// Tariff repository backed by the calculator_* PostgreSQL tables
#[derive(Debug, Clone)]
pub struct PgTariffRepository {
    pool: PgPool,
}

impl PgTariffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PriceResolver for PgTariffRepository {
    async fn resolve_prices(&self, query: &PriceQuery) -> Result<Vec<Price>> {
        queries::find_prices(&self.pool, query).await
    }
}

#[async_trait]
impl TariffCatalog for PgTariffRepository {
    async fn scheme(&self, id: i64) -> Result<Option<Scheme>> {
        queries::get_scheme(&self.pool, id).await
    }

    async fn find_scheme(
        &self,
        supplier_type: SupplierBaseType,
        case_date: NaiveDate,
    ) -> Result<Option<Scheme>> {
        let candidates = queries::get_schemes_valid_on(&self.pool, supplier_type, case_date).await?;
        Ok(select_scheme(&candidates, supplier_type, case_date).cloned())
    }

    async fn scenario(&self, id: i64) -> Result<Option<Scenario>> {
        queries::get_scenario(&self.pool, id).await
    }

    async fn fee_type_by_code(&self, code: &str) -> Result<Option<FeeType>> {
        queries::get_fee_type_by_code(&self.pool, code).await
    }

    async fn offence_class(&self, id: &str) -> Result<Option<OffenceClass>> {
        queries::get_offence_class(&self.pool, id).await
    }

    async fn advocate_type(&self, id: &str) -> Result<Option<AdvocateType>> {
        queries::get_advocate_type(&self.pool, id).await
    }

    async fn units(&self) -> Result<Vec<Unit>> {
        queries::get_units(&self.pool).await
    }

    async fn modifier_types(&self) -> Result<Vec<ModifierType>> {
        queries::get_modifier_types(&self.pool).await
    }
}
