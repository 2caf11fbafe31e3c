use chrono::NaiveDate;

use crate::models::{Scheme, SupplierBaseType};

/// Pick the scheme that applies to a case of `supplier_type` dated `case_date`
///
/// When validity windows overlap the most recently started scheme wins.
pub fn select_scheme<'a>(
    schemes: &'a [Scheme],
    supplier_type: SupplierBaseType,
    case_date: NaiveDate,
) -> Option<&'a Scheme> {
    schemes
        .iter()
        .filter(|scheme| scheme.supplier_type() == supplier_type && scheme.is_valid_on(case_date))
        .max_by_key(|scheme| (scheme.start_date, scheme.id))
}
