// Shared tariff fixture for integration tests
#![allow(dead_code)]

use chrono::NaiveDate;
use fee_calculator::models::{
    AdvocateType, AggregationType, FeeType, Modifier, ModifierType, OffenceClass, Price, Scenario,
    Scheme, SupplierBaseType, Unit,
};
use fee_calculator::InMemoryTariffRepository;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const SCHEME_ID: i64 = 1;
pub const SCENARIO_ID: i64 = 2;

pub const BASIC_FEE: i64 = 3;
pub const MAX_FEE: i64 = 4;
pub const CONFERENCE_FEE: i64 = 5;

pub const NUMBER_OF_CASES: i64 = 1;
pub const NUMBER_OF_DEFENDANTS: i64 = 2;

pub fn fee_type(id: i64, code: &str, aggregation: AggregationType) -> FeeType {
    FeeType {
        id,
        name: code.to_lowercase(),
        code: code.to_string(),
        is_basic: id == BASIC_FEE,
        aggregation,
    }
}

pub fn price(id: i64, fee_type_id: i64, unit_id: &str, fixed_fee: Decimal, fee_per_unit: Decimal) -> Price {
    Price {
        id,
        scheme_id: SCHEME_ID,
        scenario_id: SCENARIO_ID,
        fee_type_id,
        unit_id: unit_id.to_string(),
        advocate_type_id: None,
        offence_class_id: None,
        fixed_fee,
        fee_per_unit,
        limit_from: 1,
        limit_to: None,
        modifiers: vec![],
    }
}

pub fn modifier(id: i64, modifier_type_id: i64) -> Modifier {
    Modifier {
        id,
        modifier_type_id,
        limit_from: 1,
        limit_to: None,
        fixed_percent: dec!(0.00),
        percent_per_unit: dec!(0.00),
        required: false,
        priority: 0,
        strict_range: false,
    }
}

/// Small tariff covering wildcard, scoped, banded, MAX-aggregated and
/// required-modifier prices
pub fn create_test_catalog() -> InMemoryTariffRepository {
    // +20% per defendant from the second one
    let extra_defendants = Modifier {
        limit_from: 2,
        percent_per_unit: dec!(20.00),
        ..modifier(1, NUMBER_OF_DEFENDANTS)
    };
    let requires_cases = Modifier {
        required: true,
        ..modifier(2, NUMBER_OF_CASES)
    };

    InMemoryTariffRepository::new()
        .with_scheme(Scheme {
            id: SCHEME_ID,
            start_date: NaiveDate::from_ymd_opt(2012, 4, 1).unwrap(),
            end_date: None,
            base_type: SupplierBaseType::Advocate,
            description: "AGFS Fee Scheme 9".to_string(),
        })
        .with_scenario(Scenario {
            id: SCENARIO_ID,
            name: "Trial".to_string(),
        })
        .with_fee_type(fee_type(BASIC_FEE, "AGFS_FEE", AggregationType::Sum))
        .with_fee_type(fee_type(MAX_FEE, "LGFS_FEE", AggregationType::Max))
        .with_fee_type(fee_type(CONFERENCE_FEE, "AGFS_CONFERENCE", AggregationType::Sum))
        .with_offence_class(OffenceClass {
            id: "A".to_string(),
            name: "A".to_string(),
            description: "Homicide and related grave offences".to_string(),
        })
        .with_offence_class(OffenceClass {
            id: "B".to_string(),
            name: "B".to_string(),
            description: "Offences involving serious violence".to_string(),
        })
        .with_advocate_type(AdvocateType {
            id: "JRALONE".to_string(),
            name: "Junior alone".to_string(),
        })
        .with_advocate_type(AdvocateType {
            id: "QC".to_string(),
            name: "QC".to_string(),
        })
        .with_unit(Unit { id: "DAY".to_string(), name: "Day".to_string() })
        .with_unit(Unit { id: "PPE".to_string(), name: "Pages of prosecution evidence".to_string() })
        .with_modifier_type(ModifierType {
            id: NUMBER_OF_CASES,
            name: "NUMBER_OF_CASES".to_string(),
            description: "Number of cases".to_string(),
            unit_id: "CASE".to_string(),
        })
        .with_modifier_type(ModifierType {
            id: NUMBER_OF_DEFENDANTS,
            name: "NUMBER_OF_DEFENDANTS".to_string(),
            description: "Number of defendants".to_string(),
            unit_id: "DEFENDANT".to_string(),
        })
        .with_price(Price {
            modifiers: vec![extra_defendants],
            ..price(1, BASIC_FEE, "DAY", dec!(100.00000), dec!(10.00000))
        })
        .with_price(Price {
            offence_class_id: Some("A".to_string()),
            limit_from: 51,
            ..price(2, BASIC_FEE, "PPE", dec!(0.00000), dec!(1.50000))
        })
        .with_price(price(3, MAX_FEE, "DAY", dec!(150.00000), dec!(0.00000)))
        .with_price(price(4, MAX_FEE, "PPE", dec!(200.00000), dec!(0.00000)))
        .with_price(Price {
            advocate_type_id: Some("QC".to_string()),
            ..price(5, BASIC_FEE, "DAY", dec!(50.00000), dec!(0.00000))
        })
        .with_price(Price {
            modifiers: vec![requires_cases],
            ..price(6, CONFERENCE_FEE, "DAY", dec!(300.00000), dec!(0.00000))
        })
}
