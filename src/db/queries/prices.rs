use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use tracing::debug;

use crate::db::errors::{DatabaseError, Result};
use crate::models::{Modifier, Price, PriceQuery};

/// calculator_price row
#[derive(Debug, Clone, FromRow)]
pub struct PriceRow {
    pub id: i64,
    pub scheme_id: i64,
    pub scenario_id: i64,
    pub fee_type_id: i64,
    pub unit_id: String,
    pub advocate_type_id: Option<String>,
    pub offence_class_id: Option<String>,
    pub fixed_fee: Decimal,
    pub fee_per_unit: Decimal,
    pub limit_from: i32,
    pub limit_to: Option<i32>,
}

/// calculator_modifier row joined through calculator_price_modifiers
#[derive(Debug, Clone, FromRow)]
pub struct PriceModifierRow {
    pub price_id: i64,
    pub id: i64,
    pub modifier_type_id: i64,
    pub limit_from: i32,
    pub limit_to: Option<i32>,
    pub fixed_percent: Decimal,
    pub percent_per_unit: Decimal,
    pub required: bool,
    pub priority: i16,
    pub strict_range: bool,
}

impl PriceRow {
    pub fn into_price(self, modifiers: Vec<Modifier>) -> Price {
        Price {
            id: self.id,
            scheme_id: self.scheme_id,
            scenario_id: self.scenario_id,
            fee_type_id: self.fee_type_id,
            unit_id: self.unit_id,
            advocate_type_id: self.advocate_type_id,
            offence_class_id: self.offence_class_id,
            fixed_fee: self.fixed_fee,
            fee_per_unit: self.fee_per_unit,
            limit_from: self.limit_from,
            limit_to: self.limit_to,
            modifiers,
        }
    }
}

impl From<PriceModifierRow> for Modifier {
    fn from(row: PriceModifierRow) -> Self {
        Modifier {
            id: row.id,
            modifier_type_id: row.modifier_type_id,
            limit_from: row.limit_from,
            limit_to: row.limit_to,
            fixed_percent: row.fixed_percent,
            percent_per_unit: row.percent_per_unit,
            required: row.required,
            priority: row.priority,
            strict_range: row.strict_range,
        }
    }
}

/// Load prices matching the axis combination, with their modifiers attached
#[tracing::instrument(
    skip(pool, query),
    fields(
        scheme_id = query.scheme_id,
        fee_type_id = query.fee_type_id,
        scenario_id = query.scenario_id,
        unit = %query.unit_id
    )
)]
pub async fn find_prices(pool: &PgPool, query: &PriceQuery) -> Result<Vec<Price>> {
    let rows = sqlx::query_as::<_, PriceRow>(
        r#"
        SELECT
            p.id::bigint AS id,
            p.scheme_id::bigint AS scheme_id,
            p.scenario_id::bigint AS scenario_id,
            p.fee_type_id::bigint AS fee_type_id,
            p.unit_id,
            p.advocate_type_id,
            p.offence_class_id,
            p.fixed_fee,
            p.fee_per_unit,
            p.limit_from::int AS limit_from,
            p.limit_to::int AS limit_to
        FROM calculator_price p
        WHERE p.scheme_id = $1
            AND p.fee_type_id = $2
            AND p.scenario_id = $3
            AND p.unit_id = $4
            AND (p.advocate_type_id = $5 OR p.advocate_type_id IS NULL)
            AND (p.offence_class_id = $6 OR p.offence_class_id IS NULL)
        ORDER BY p.id
        "#
    )
    .bind(query.scheme_id)
    .bind(query.fee_type_id)
    .bind(query.scenario_id)
    .bind(&query.unit_id)
    .bind(query.advocate_type_id.as_deref())
    .bind(query.offence_class_id.as_deref())
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::QueryError)?;

    if rows.is_empty() {
        debug!("No prices matched");
        return Ok(Vec::new());
    }

    let price_ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let mut modifiers = load_price_modifiers(pool, &price_ids).await?;

    let prices: Vec<Price> = rows
        .into_iter()
        .map(|row| {
            let attached = modifiers.remove(&row.id).unwrap_or_default();
            row.into_price(attached)
        })
        .collect();

    debug!(matched = prices.len(), "Loaded prices");
    Ok(prices)
}

/// Load modifiers attached to the given prices, grouped by price id
pub async fn load_price_modifiers(
    pool: &PgPool,
    price_ids: &[i64],
) -> Result<HashMap<i64, Vec<Modifier>>> {
    let rows = sqlx::query_as::<_, PriceModifierRow>(
        r#"
        SELECT
            pm.price_id::bigint AS price_id,
            m.id::bigint AS id,
            m.modifier_type_id::bigint AS modifier_type_id,
            m.limit_from::int AS limit_from,
            m.limit_to::int AS limit_to,
            m.fixed_percent,
            m.percent_per_unit,
            m.required,
            m.priority::smallint AS priority,
            m.strict_range
        FROM calculator_price_modifiers pm
        JOIN calculator_modifier m ON m.id = pm.modifier_id
        WHERE pm.price_id = ANY($1)
        ORDER BY pm.price_id, m.id
        "#
    )
    .bind(price_ids)
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::QueryError)?;

    Ok(group_modifiers_by_price(rows))
}

/// Group joined modifier rows by their owning price, keeping row order
pub fn group_modifiers_by_price(rows: Vec<PriceModifierRow>) -> HashMap<i64, Vec<Modifier>> {
    let mut grouped: HashMap<i64, Vec<Modifier>> = HashMap::new();
    for row in rows {
        grouped.entry(row.price_id).or_default().push(row.into());
    }
    grouped
}
