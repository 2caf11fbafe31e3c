use rust_decimal::Decimal;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::coverage::coverage;
use crate::domain::modifiers::ModifierQuantity;
use crate::models::{Modifier, Price};

/// Outcome of pricing a single matched price record
#[derive(Debug, Clone, PartialEq)]
pub enum PriceTotal {
    /// Fixed fee, per-unit fee and modifier cascade combined
    Amount(Decimal),
    /// Unit quantity is below the price's lower limit
    BandNotReached,
    /// A required modifier found no satisfying measurement; the price is inapplicable
    RequiredModifierMissing { modifier_id: i64 },
    /// The total does not fit in a `Decimal`
    Overflow,
}

/// A calculated amount exceeded the representable money range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Calculated amount is out of range")]
pub struct AmountOverflow;

impl PriceTotal {
    /// Monetary value of the outcome; inapplicable prices are worth zero
    pub fn amount(&self) -> Result<Decimal, AmountOverflow> {
        match self {
            PriceTotal::Amount(amount) => Ok(*amount),
            PriceTotal::BandNotReached | PriceTotal::RequiredModifierMissing { .. } => Ok(Decimal::ZERO),
            PriceTotal::Overflow => Err(AmountOverflow),
        }
    }
}

/// One modifier triggered by one supplied measurement
#[derive(Debug, Clone, Copy)]
pub struct AppliedModifier<'a> {
    pub modifier: &'a Modifier,
    pub quantity: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingRequiredModifier {
    pub modifier_id: i64,
}

impl Price {
    pub fn is_applicable(&self, unit_quantity: Decimal) -> bool {
        unit_quantity >= Decimal::from(self.limit_from)
    }

    /// Number of billable units of `unit_quantity` inside this price's band
    pub fn applicable_unit_count(&self, unit_quantity: Decimal) -> Decimal {
        coverage(unit_quantity, self.limit_from, self.limit_to)
    }

    /// Every (modifier, measurement) pair that triggers, ordered by priority.
    ///
    /// A modifier is tested against every measurement, so duplicate
    /// measurements of one modifier type apply it more than once.
    pub fn applicable_modifiers(
        &self,
        modifier_quantities: &[ModifierQuantity],
    ) -> Result<Vec<AppliedModifier<'_>>, MissingRequiredModifier> {
        let mut applied = Vec::new();

        for modifier in &self.modifiers {
            let before = applied.len();
            applied.extend(
                modifier_quantities
                    .iter()
                    .filter(|mq| modifier.is_applicable(mq.modifier_type_id, mq.quantity))
                    .map(|mq| AppliedModifier {
                        modifier,
                        quantity: mq.quantity,
                    }),
            );

            if modifier.required && applied.len() == before {
                return Err(MissingRequiredModifier {
                    modifier_id: modifier.id,
                });
            }
        }

        // Stable sort keeps attachment order inside a priority tier
        applied.sort_by_key(|a| a.modifier.priority);
        Ok(applied)
    }

    /// Total for this price given the unit quantity and supplied modifier measurements
    pub fn calculate_total(
        &self,
        unit_quantity: Decimal,
        modifier_quantities: &[ModifierQuantity],
    ) -> PriceTotal {
        if !self.is_applicable(unit_quantity) {
            debug!(price_id = self.id, %unit_quantity, limit_from = self.limit_from, "Price band not reached");
            return PriceTotal::BandNotReached;
        }

        let applied = match self.applicable_modifiers(modifier_quantities) {
            Ok(applied) => applied,
            Err(MissingRequiredModifier { modifier_id }) => {
                warn!(price_id = self.id, modifier_id, "Required modifier missing, price is inapplicable");
                return PriceTotal::RequiredModifierMissing { modifier_id };
            }
        };

        let total = self
            .applicable_unit_count(unit_quantity)
            .checked_mul(self.fee_per_unit)
            .and_then(|per_unit| self.fixed_fee.checked_add(per_unit))
            .and_then(|base_total| {
                debug!(price_id = self.id, %base_total, "Calculated base total");
                apply_modifier_tiers(base_total, applied)
            });

        match total {
            Some(total) => {
                debug!(price_id = self.id, %total, "Calculated price total");
                PriceTotal::Amount(total)
            }
            None => {
                warn!(price_id = self.id, %unit_quantity, "Price total out of range");
                PriceTotal::Overflow
            }
        }
    }
}

/// Fold priority tiers into the running total, `None` on overflow.
///
/// Every contribution in a tier is computed against the total as it stood
/// before the tier; the tier's sum is added before the next tier starts.
fn apply_modifier_tiers(base_total: Decimal, applied: Vec<AppliedModifier<'_>>) -> Option<Decimal> {
    let mut tiers: BTreeMap<i16, Vec<AppliedModifier<'_>>> = BTreeMap::new();
    for instance in applied {
        tiers.entry(instance.modifier.priority).or_default().push(instance);
    }

    tiers.into_values().try_fold(base_total, |total, tier| {
        let contribution = tier.iter().try_fold(Decimal::ZERO, |sum, instance| {
            let value = instance.modifier.apply(instance.quantity, total)?;
            debug!(modifier = %instance.modifier, quantity = %instance.quantity, %value, "Applied modifier");
            sum.checked_add(value)
        })?;
        total.checked_add(contribution)
    })
}
