use rust_decimal::Decimal;

/// Portion of `value` that falls inside the inclusive band `[limit_from, limit_to]`
///
/// The first unit at `limit_from` counts as 1, anything above `limit_to`
/// is cut off, and the result never goes below zero.
pub fn coverage(value: Decimal, limit_from: i32, limit_to: Option<i32>) -> Decimal {
    let limit_from = Decimal::from(limit_from);
    if value < limit_from {
        return Decimal::ZERO;
    }

    let covered = match limit_to.map(Decimal::from) {
        Some(limit_to) if value > limit_to => limit_to - limit_from + Decimal::ONE,
        _ => value.saturating_sub(limit_from - Decimal::ONE),
    };

    covered.max(Decimal::ZERO)
}
