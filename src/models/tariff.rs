use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How per-unit totals of a fee type combine into the final amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationType {
    #[default]
    Sum,
    Max,
}

impl AggregationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationType::Sum => "sum",
            AggregationType::Max => "max",
        }
    }
}

impl FromStr for AggregationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sum" => Ok(AggregationType::Sum),
            "max" => Ok(AggregationType::Max),
            other => Err(format!("unknown aggregation type: {}", other)),
        }
    }
}

impl fmt::Display for AggregationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supplier category a scheme is published for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplierBaseType {
    Advocate,
    Solicitor,
}

impl SupplierBaseType {
    /// Stored integer code (1 = advocate, 2 = solicitor)
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(SupplierBaseType::Advocate),
            2 => Some(SupplierBaseType::Solicitor),
            _ => None,
        }
    }

    pub fn code(&self) -> i16 {
        match self {
            SupplierBaseType::Advocate => 1,
            SupplierBaseType::Solicitor => 2,
        }
    }
}

/// A tariff version valid over a date range for one supplier category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub id: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub base_type: SupplierBaseType,
    pub description: String,
}

impl Scheme {
    pub fn supplier_type(&self) -> SupplierBaseType {
        self.base_type
    }

    /// Whether `date` falls inside the scheme's validity window (both ends inclusive)
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && self.end_date.map_or(true, |end| date <= end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeType {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub is_basic: bool,
    #[serde(default)]
    pub aggregation: AggregationType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvocateType {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffenceClass {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierType {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub unit_id: String,
}

/// Conditional percentage adjustment attached to one or more prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub id: i64,
    pub modifier_type_id: i64,
    pub limit_from: i32,
    pub limit_to: Option<i32>,
    pub fixed_percent: Decimal,
    pub percent_per_unit: Decimal,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub priority: i16,
    #[serde(default)]
    pub strict_range: bool,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let limit_to = self
            .limit_to
            .map(|to| to.to_string())
            .unwrap_or_else(|| "None".to_string());
        write!(
            f,
            "type {}, {}-{}, {}% pu, {}% fixed",
            self.modifier_type_id, self.limit_from, limit_to, self.percent_per_unit, self.fixed_percent
        )
    }
}

/// A priced band for one (scheme, scenario, fee type, unit) combination.
///
/// `advocate_type_id` and `offence_class_id` are wildcards when `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
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
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl Price {
    /// Exact match on scheme, fee type, scenario and unit; wildcard-or-exact
    /// on advocate type and offence class
    pub fn matches(&self, query: &PriceQuery) -> bool {
        self.scheme_id == query.scheme_id
            && self.fee_type_id == query.fee_type_id
            && self.scenario_id == query.scenario_id
            && self.unit_id == query.unit_id
            && axis_matches(self.advocate_type_id.as_deref(), query.advocate_type_id.as_deref())
            && axis_matches(self.offence_class_id.as_deref(), query.offence_class_id.as_deref())
    }
}

fn axis_matches(price_value: Option<&str>, requested: Option<&str>) -> bool {
    match price_value {
        None => true,
        Some(value) => requested == Some(value),
    }
}

/// Axis combination used to resolve candidate prices for one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuery {
    pub scheme_id: i64,
    pub fee_type_id: i64,
    pub scenario_id: i64,
    pub unit_id: String,
    pub advocate_type_id: Option<String>,
    pub offence_class_id: Option<String>,
}
