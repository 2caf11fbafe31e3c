//! Shared request-boundary helpers for API handlers

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{ModifierQuantity, UnitQuantity};
use crate::models::{ModifierType, Unit};

/// Upper bound on a supplied quantity, the range of the tariff band limits
const MAX_QUANTITY: Decimal = Decimal::from_parts(i32::MAX as u32, 0, 0, false, 0);

/// Parse a non-negative quantity supplied for `field`
pub fn parse_quantity(field: &str, value: &str) -> ApiResult<Decimal> {
    let quantity = Decimal::from_str(value.trim())
        .map_err(|_| ApiError::invalid_value(value, field))?;

    if (quantity.is_sign_negative() && !quantity.is_zero()) || quantity > MAX_QUANTITY {
        return Err(ApiError::invalid_value(value, field));
    }
    Ok(quantity)
}

/// Split free-form measurement parameters into unit and modifier quantities.
///
/// Names are matched case-insensitively, first against unit ids, then
/// against modifier type names. Parameter order is preserved.
pub fn classify_measurements(
    params: &[(String, String)],
    units: &[Unit],
    modifier_types: &[ModifierType],
) -> ApiResult<(Vec<UnitQuantity>, Vec<ModifierQuantity>)> {
    let mut unit_quantities = Vec::new();
    let mut modifier_quantities = Vec::new();

    for (name, value) in params {
        if let Some(unit) = units.iter().find(|u| u.id.eq_ignore_ascii_case(name)) {
            let quantity = parse_quantity(name, value)?;
            unit_quantities.push(UnitQuantity::new(unit.id.clone(), quantity));
        } else if let Some(modifier_type) = modifier_types
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
        {
            let quantity = parse_quantity(name, value)?;
            modifier_quantities.push(ModifierQuantity::new(modifier_type.id, quantity));
        } else {
            return Err(ApiError::BadRequest(format!(
                "'{}' is not a valid `unit` or `modifier_type`",
                name
            )));
        }
    }

    Ok((unit_quantities, modifier_quantities))
}
