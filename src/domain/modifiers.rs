use rust_decimal::Decimal;

use crate::domain::coverage::coverage;
use crate::models::Modifier;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A supplied (modifier type, quantity) measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifierQuantity {
    pub modifier_type_id: i64,
    pub quantity: Decimal,
}

impl ModifierQuantity {
    pub fn new(modifier_type_id: i64, quantity: Decimal) -> Self {
        Self {
            modifier_type_id,
            quantity,
        }
    }
}

impl Modifier {
    /// Whether this modifier is triggered by `quantity` of `modifier_type_id`
    ///
    /// Strict-range modifiers need the quantity inside `[limit_from, limit_to]`,
    /// the others only enforce the lower bound.
    pub fn is_applicable(&self, modifier_type_id: i64, quantity: Decimal) -> bool {
        if self.modifier_type_id != modifier_type_id {
            return false;
        }

        let above_lower = quantity >= Decimal::from(self.limit_from);
        if self.strict_range {
            above_lower
                && self
                    .limit_to
                    .map_or(true, |limit_to| quantity <= Decimal::from(limit_to))
        } else {
            above_lower
        }
    }

    /// Number of units of `quantity` inside this modifier's band
    pub fn applicable_unit_count(&self, quantity: Decimal) -> Decimal {
        coverage(quantity, self.limit_from, self.limit_to)
    }

    /// Contribution of this modifier against `running_total`, `None` on overflow
    pub fn apply(&self, quantity: Decimal, running_total: Decimal) -> Option<Decimal> {
        let fixed = running_total
            .checked_mul(self.fixed_percent)?
            .checked_div(ONE_HUNDRED)?;
        let per_unit = running_total
            .checked_mul(self.percent_per_unit.checked_div(ONE_HUNDRED)?)?
            .checked_mul(self.applicable_unit_count(quantity))?;
        fixed.checked_add(per_unit)
    }
}
