use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use crate::db::errors::{DatabaseError, Result};
use crate::models::{
    AdvocateType, AggregationType, FeeType, ModifierType, OffenceClass, Scenario, Scheme,
    SupplierBaseType, Unit,
};

/// calculator_scheme row
#[derive(Debug, Clone, FromRow)]
pub struct SchemeRow {
    pub id: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub suty_base_type: i16,
    pub description: String,
}

impl TryFrom<SchemeRow> for Scheme {
    type Error = DatabaseError;

    fn try_from(row: SchemeRow) -> Result<Self> {
        let base_type = SupplierBaseType::from_code(row.suty_base_type).ok_or_else(|| {
            DatabaseError::InvalidData(format!(
                "Scheme {} has unknown supplier base type {}",
                row.id, row.suty_base_type
            ))
        })?;

        Ok(Scheme {
            id: row.id,
            start_date: row.start_date,
            end_date: row.end_date,
            base_type,
            description: row.description,
        })
    }
}

/// calculator_feetype row
#[derive(Debug, Clone, FromRow)]
pub struct FeeTypeRow {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub is_basic: bool,
    pub aggregation: String,
}

impl TryFrom<FeeTypeRow> for FeeType {
    type Error = DatabaseError;

    fn try_from(row: FeeTypeRow) -> Result<Self> {
        let aggregation: AggregationType = row.aggregation.parse().map_err(|e| {
            DatabaseError::InvalidData(format!("Fee type {}: {}", row.code, e))
        })?;

        Ok(FeeType {
            id: row.id,
            name: row.name,
            code: row.code,
            is_basic: row.is_basic,
            aggregation,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
struct ScenarioRow {
    id: i64,
    name: String,
}

#[derive(Debug, Clone, FromRow)]
struct ModifierTypeRow {
    id: i64,
    name: String,
    description: String,
    unit_id: String,
}

const SCHEME_COLUMNS: &str = r#"
    id::bigint AS id,
    start_date,
    end_date,
    suty_base_type::smallint AS suty_base_type,
    description
"#;

#[tracing::instrument(skip(pool))]
pub async fn get_scheme(pool: &PgPool, scheme_id: i64) -> Result<Option<Scheme>> {
    let sql = format!("SELECT {} FROM calculator_scheme WHERE id = $1", SCHEME_COLUMNS);
    let row = sqlx::query_as::<_, SchemeRow>(&sql)
        .bind(scheme_id)
        .fetch_optional(pool)
        .await?;

    row.map(Scheme::try_from).transpose()
}

/// All schemes of one supplier type whose validity window contains `case_date`
#[tracing::instrument(skip(pool))]
pub async fn get_schemes_valid_on(
    pool: &PgPool,
    supplier_type: SupplierBaseType,
    case_date: NaiveDate,
) -> Result<Vec<Scheme>> {
    let sql = format!(
        r#"
        SELECT {}
        FROM calculator_scheme
        WHERE suty_base_type = $1
            AND start_date <= $2
            AND (end_date IS NULL OR end_date >= $2)
        ORDER BY start_date, id
        "#,
        SCHEME_COLUMNS
    );
    let rows = sqlx::query_as::<_, SchemeRow>(&sql)
        .bind(supplier_type.code())
        .bind(case_date)
        .fetch_all(pool)
        .await?;

    debug!(count = rows.len(), "Loaded candidate schemes");
    rows.into_iter().map(Scheme::try_from).collect()
}

pub async fn get_scenario(pool: &PgPool, scenario_id: i64) -> Result<Option<Scenario>> {
    let row = sqlx::query_as::<_, ScenarioRow>(
        "SELECT id::bigint AS id, name FROM calculator_scenario WHERE id = $1",
    )
    .bind(scenario_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| Scenario { id: r.id, name: r.name }))
}

pub async fn get_fee_type_by_code(pool: &PgPool, code: &str) -> Result<Option<FeeType>> {
    let row = sqlx::query_as::<_, FeeTypeRow>(
        r#"
        SELECT id::bigint AS id, name, code, is_basic, aggregation
        FROM calculator_feetype
        WHERE code = $1
        ORDER BY id
        LIMIT 1
        "#,
    )
    .bind(code)
    .fetch_optional(pool)
    .await?;

    row.map(FeeType::try_from).transpose()
}

pub async fn get_offence_class(pool: &PgPool, id: &str) -> Result<Option<OffenceClass>> {
    let row = sqlx::query_as::<_, (String, String, String)>(
        "SELECT id, name, description FROM calculator_offenceclass WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(id, name, description)| OffenceClass { id, name, description }))
}

pub async fn get_advocate_type(pool: &PgPool, id: &str) -> Result<Option<AdvocateType>> {
    let row = sqlx::query_as::<_, (String, String)>(
        "SELECT id, name FROM calculator_advocatetype WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(id, name)| AdvocateType { id, name }))
}

pub async fn get_units(pool: &PgPool) -> Result<Vec<Unit>> {
    let rows = sqlx::query_as::<_, (String, String)>(
        "SELECT id, name FROM calculator_unit ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id, name)| Unit { id, name }).collect())
}

pub async fn get_modifier_types(pool: &PgPool) -> Result<Vec<ModifierType>> {
    let rows = sqlx::query_as::<_, ModifierTypeRow>(
        r#"
        SELECT id::bigint AS id, name, description, unit_id
        FROM calculator_modifiertype
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| ModifierType {
            id: r.id,
            name: r.name,
            description: r.description,
            unit_id: r.unit_id,
        })
        .collect())
}
