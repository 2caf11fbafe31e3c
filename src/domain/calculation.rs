use futures::future::try_join_all;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::db::PriceResolver;
use crate::domain::modifiers::ModifierQuantity;
use crate::domain::pricing::AmountOverflow;
use crate::models::{AggregationType, FeeType, Price, PriceQuery};
use super::DomainError;

/// A supplied (unit, quantity) measurement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitQuantity {
    pub unit_id: String,
    pub quantity: Decimal,
}

impl UnitQuantity {
    pub fn new(unit_id: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            unit_id: unit_id.into(),
            quantity,
        }
    }
}

/// Already-validated inputs for one fee calculation
#[derive(Debug, Clone)]
pub struct CalculationRequest {
    pub scheme_id: i64,
    pub scenario_id: i64,
    pub fee_type: FeeType,
    pub offence_class_id: Option<String>,
    pub advocate_type_id: Option<String>,
    pub unit_quantities: Vec<UnitQuantity>,
    pub modifier_quantities: Vec<ModifierQuantity>,
}

impl CalculationRequest {
    fn price_query(&self, unit_id: &str) -> PriceQuery {
        PriceQuery {
            scheme_id: self.scheme_id,
            fee_type_id: self.fee_type.id,
            scenario_id: self.scenario_id,
            unit_id: unit_id.to_string(),
            advocate_type_id: self.advocate_type_id.clone(),
            offence_class_id: self.offence_class_id.clone(),
        }
    }
}

/// Calculate the fee for a request
///
/// Prices for every unit are resolved concurrently; the per-unit amounts are
/// combined in the order the units were supplied.
#[tracing::instrument(
    skip(resolver, request),
    fields(
        scheme_id = request.scheme_id,
        scenario_id = request.scenario_id,
        fee_type = %request.fee_type.code,
        units = request.unit_quantities.len()
    )
)]
pub async fn calculate_total<R>(
    resolver: &R,
    request: &CalculationRequest,
) -> Result<Decimal, DomainError>
where
    R: PriceResolver + ?Sized,
{
    let queries: Vec<PriceQuery> = request
        .unit_quantities
        .iter()
        .map(|uq| request.price_query(&uq.unit_id))
        .collect();

    let resolved = try_join_all(queries.iter().map(|query| resolver.resolve_prices(query))).await?;

    let mut amounts: Vec<Decimal> = Vec::with_capacity(resolved.len());
    for (uq, prices) in request.unit_quantities.iter().zip(resolved.iter()) {
        let amount = unit_amount(prices, uq.quantity, &request.modifier_quantities)?;
        debug!(unit = %uq.unit_id, quantity = %uq.quantity, prices = prices.len(), amount = ?amount, "Unit priced");
        amounts.extend(amount);
    }

    let total = aggregate(request.fee_type.aggregation, &amounts)?;
    info!(
        aggregation = %request.fee_type.aggregation,
        priced_units = amounts.len(),
        %total,
        "Fee calculated"
    );

    Ok(total)
}

/// Sum of every matched price's total for one unit, `None` when nothing matched
///
/// Overlapping prices (e.g. a wildcard and a scoped price) are all counted.
pub fn unit_amount(
    prices: &[Price],
    unit_quantity: Decimal,
    modifier_quantities: &[ModifierQuantity],
) -> Result<Option<Decimal>, AmountOverflow> {
    if prices.is_empty() {
        return Ok(None);
    }

    prices
        .iter()
        .try_fold(Decimal::ZERO, |sum, price| {
            let amount = price.calculate_total(unit_quantity, modifier_quantities).amount()?;
            sum.checked_add(amount).ok_or(AmountOverflow)
        })
        .map(Some)
}

/// Combine per-unit amounts with the fee type's aggregation policy
pub fn aggregate(aggregation: AggregationType, amounts: &[Decimal]) -> Result<Decimal, AmountOverflow> {
    match aggregation {
        AggregationType::Sum => amounts
            .iter()
            .try_fold(Decimal::ZERO, |sum, amount| sum.checked_add(*amount))
            .ok_or(AmountOverflow),
        AggregationType::Max => Ok(amounts.iter().copied().max().unwrap_or(Decimal::ZERO)),
    }
}
