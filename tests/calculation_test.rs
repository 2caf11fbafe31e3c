mod common;

use common::*;
use fee_calculator::models::{AggregationType, FeeType, Modifier, Price};
use fee_calculator::{
    calculate_total, CalculationRequest, InMemoryTariffRepository, ModifierQuantity, UnitQuantity,
};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn request(fee_type: FeeType, units: &[(&str, rust_decimal::Decimal)]) -> CalculationRequest {
    CalculationRequest {
        scheme_id: SCHEME_ID,
        scenario_id: SCENARIO_ID,
        fee_type,
        offence_class_id: None,
        advocate_type_id: None,
        unit_quantities: units
            .iter()
            .map(|(unit, quantity)| UnitQuantity::new(*unit, *quantity))
            .collect(),
        modifier_quantities: vec![],
    }
}

fn basic_fee() -> FeeType {
    fee_type(BASIC_FEE, "AGFS_FEE", AggregationType::Sum)
}

fn single_price_catalog(price: Price) -> InMemoryTariffRepository {
    InMemoryTariffRepository::new().with_price(price)
}

#[tokio::test]
async fn test_fixed_fee_plus_per_unit() {
    let catalog = single_price_catalog(price(1, BASIC_FEE, "DAY", dec!(100.00000), dec!(10.00000)));

    let total = calculate_total(&catalog, &request(basic_fee(), &[("DAY", dec!(5))]))
        .await
        .unwrap();

    assert_eq!(total, dec!(150.00000));
}

#[tokio::test]
async fn test_fixed_percent_modifier_uplift() {
    let uplift = Modifier {
        fixed_percent: dec!(10.00),
        ..modifier(1, NUMBER_OF_CASES)
    };
    let catalog = single_price_catalog(Price {
        modifiers: vec![uplift],
        ..price(1, BASIC_FEE, "DAY", dec!(100.00000), dec!(10.00000))
    });

    let mut req = request(basic_fee(), &[("DAY", dec!(5))]);
    req.modifier_quantities = vec![ModifierQuantity::new(NUMBER_OF_CASES, dec!(1))];

    let total = calculate_total(&catalog, &req).await.unwrap();

    assert_eq!(total, dec!(165.00000));
}

#[tokio::test]
async fn test_missing_required_modifier_prices_at_zero() {
    let required = Modifier {
        fixed_percent: dec!(10.00),
        required: true,
        ..modifier(1, NUMBER_OF_CASES)
    };
    let catalog = single_price_catalog(Price {
        modifiers: vec![required],
        ..price(1, BASIC_FEE, "DAY", dec!(100.00000), dec!(10.00000))
    });

    let total = calculate_total(&catalog, &request(basic_fee(), &[("DAY", dec!(5))]))
        .await
        .unwrap();

    assert_eq!(total, dec!(0));
}

#[tokio::test]
async fn test_max_aggregation_across_units() {
    let catalog = create_test_catalog();
    let units = [("DAY", dec!(1)), ("PPE", dec!(1))];

    let max_total = calculate_total(
        &catalog,
        &request(fee_type(MAX_FEE, "LGFS_FEE", AggregationType::Max), &units),
    )
    .await
    .unwrap();
    assert_eq!(max_total, dec!(200.00000));

    let sum_total = calculate_total(
        &catalog,
        &request(fee_type(MAX_FEE, "LGFS_FEE", AggregationType::Sum), &units),
    )
    .await
    .unwrap();
    assert_eq!(sum_total, dec!(350.00000));
}

#[tokio::test]
async fn test_wildcard_and_scoped_prices_are_summed() {
    let catalog = create_test_catalog();

    let mut req = request(basic_fee(), &[("DAY", dec!(5))]);
    req.advocate_type_id = Some("QC".to_string());

    // 100 + 5 x 10 from the wildcard price, 50 from the QC price
    let total = calculate_total(&catalog, &req).await.unwrap();

    assert_eq!(total, dec!(200.00000));
}

#[tokio::test]
async fn test_banded_unit_price_and_offence_class_scope() {
    let catalog = create_test_catalog();

    let mut req = request(basic_fee(), &[("DAY", dec!(5)), ("PPE", dec!(100))]);
    req.offence_class_id = Some("A".to_string());
    // PPE band starts at 51: 50 pages x 1.5
    assert_eq!(calculate_total(&catalog, &req).await.unwrap(), dec!(225.00000));

    req.offence_class_id = Some("B".to_string());
    assert_eq!(calculate_total(&catalog, &req).await.unwrap(), dec!(150.00000));
}

#[tokio::test]
async fn test_per_unit_modifier_from_catalog() {
    let catalog = create_test_catalog();

    let mut req = request(basic_fee(), &[("DAY", dec!(5))]);
    req.modifier_quantities = vec![ModifierQuantity::new(NUMBER_OF_DEFENDANTS, dec!(3))];

    // 150 + 150 x 20% x 2 extra defendants
    assert_eq!(calculate_total(&catalog, &req).await.unwrap(), dec!(210.00000));
}

#[tokio::test]
async fn test_no_matching_prices_is_zero() {
    let catalog = create_test_catalog();

    let total = calculate_total(
        &catalog,
        &request(fee_type(99, "UNKNOWN", AggregationType::Max), &[("DAY", dec!(3))]),
    )
    .await
    .unwrap();

    assert_eq!(total, dec!(0));
}
