#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::db::queries::prices::{PriceModifierRow, PriceRow};
    use crate::db::queries::reference::{FeeTypeRow, SchemeRow};
    use crate::models::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn create_test_price(id: i64, advocate_type: Option<&str>, offence_class: Option<&str>) -> Price {
        Price {
            id,
            scheme_id: 1,
            scenario_id: 2,
            fee_type_id: 3,
            unit_id: "DAY".to_string(),
            advocate_type_id: advocate_type.map(str::to_string),
            offence_class_id: offence_class.map(str::to_string),
            fixed_fee: dec!(100),
            fee_per_unit: dec!(0),
            limit_from: 1,
            limit_to: None,
            modifiers: vec![],
        }
    }

    fn create_test_query(advocate_type: &str, offence_class: &str) -> PriceQuery {
        PriceQuery {
            scheme_id: 1,
            fee_type_id: 3,
            scenario_id: 2,
            unit_id: "DAY".to_string(),
            advocate_type_id: Some(advocate_type.to_string()),
            offence_class_id: Some(offence_class.to_string()),
        }
    }

    fn create_modifier_row(price_id: i64, id: i64) -> PriceModifierRow {
        PriceModifierRow {
            price_id,
            id,
            modifier_type_id: 1,
            limit_from: 2,
            limit_to: Some(4),
            fixed_percent: dec!(0.00),
            percent_per_unit: dec!(20.00),
            required: false,
            priority: 0,
            strict_range: true,
        }
    }

    #[tokio::test]
    async fn test_in_memory_resolves_wildcard_and_scoped_prices() {
        let repo = InMemoryTariffRepository::new()
            .with_price(create_test_price(1, None, None))
            .with_price(create_test_price(2, Some("QC"), None))
            .with_price(create_test_price(3, Some("JRALONE"), Some("A")))
            .with_price(create_test_price(4, None, Some("B")));

        let prices = repo.resolve_prices(&create_test_query("JRALONE", "A")).await.unwrap();
        let ids: Vec<i64> = prices.iter().map(|p| p.id).collect();

        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_in_memory_catalog_lookups() {
        let repo = InMemoryTariffRepository::new()
            .with_scheme(Scheme {
                id: 1,
                start_date: NaiveDate::from_ymd_opt(2012, 4, 1).unwrap(),
                end_date: None,
                base_type: SupplierBaseType::Advocate,
                description: "AGFS Fee Scheme 9".to_string(),
            })
            .with_fee_type(FeeType {
                id: 3,
                name: "Basic fee".to_string(),
                code: "AGFS_FEE".to_string(),
                is_basic: true,
                aggregation: AggregationType::Sum,
            })
            .with_advocate_type(AdvocateType {
                id: "QC".to_string(),
                name: "Queen's Counsel".to_string(),
            });

        assert!(repo.scheme(1).await.unwrap().is_some());
        assert!(repo.scheme(2).await.unwrap().is_none());
        assert_eq!(repo.fee_type_by_code("AGFS_FEE").await.unwrap().map(|f| f.id), Some(3));
        assert!(repo.fee_type_by_code("AGFS_BURP").await.unwrap().is_none());
        assert!(repo.advocate_type("QC").await.unwrap().is_some());
        assert!(repo.offence_class("Z").await.unwrap().is_none());

        let scheme = repo
            .find_scheme(SupplierBaseType::Advocate, NaiveDate::from_ymd_opt(2016, 1, 1).unwrap())
            .await
            .unwrap();
        assert_eq!(scheme.map(|s| s.id), Some(1));
    }

    #[test]
    fn test_group_modifiers_by_price_keeps_row_order() {
        let rows = vec![
            create_modifier_row(10, 1),
            create_modifier_row(10, 2),
            create_modifier_row(11, 2),
        ];

        let grouped = queries::group_modifiers_by_price(rows);

        let ids: Vec<i64> = grouped[&10].iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2]);
        // Shared modifiers are attached to every owning price
        assert_eq!(grouped[&11].len(), 1);
        assert_eq!(grouped[&11][0].percent_per_unit, dec!(20.00));
        assert!(grouped[&11][0].strict_range);
    }

    #[test]
    fn test_price_row_into_price() {
        let row = PriceRow {
            id: 5,
            scheme_id: 1,
            scenario_id: 2,
            fee_type_id: 3,
            unit_id: "PPE".to_string(),
            advocate_type_id: None,
            offence_class_id: Some("A".to_string()),
            fixed_fee: dec!(0.00000),
            fee_per_unit: dec!(1.63000),
            limit_from: 51,
            limit_to: Some(10000),
        };

        let price = row.into_price(vec![create_modifier_row(5, 1).into()]);

        assert_eq!(price.unit_id, "PPE");
        assert_eq!(price.limit_from, 51);
        assert_eq!(price.modifiers.len(), 1);
    }

    #[test]
    fn test_fee_type_row_rejects_unknown_aggregation() {
        let row = FeeTypeRow {
            id: 1,
            name: "Basic fee".to_string(),
            code: "AGFS_FEE".to_string(),
            is_basic: true,
            aggregation: "avg".to_string(),
        };

        let err = FeeType::try_from(row).unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidData(_)));
    }

    #[test]
    fn test_scheme_row_conversion() {
        let row = SchemeRow {
            id: 2,
            start_date: NaiveDate::from_ymd_opt(2014, 3, 20).unwrap(),
            end_date: None,
            suty_base_type: 2,
            description: "LGFS Fee Scheme 8".to_string(),
        };
        let scheme = Scheme::try_from(row.clone()).unwrap();
        assert_eq!(scheme.supplier_type(), SupplierBaseType::Solicitor);

        let invalid = SchemeRow { suty_base_type: 9, ..row };
        assert!(matches!(Scheme::try_from(invalid), Err(DatabaseError::InvalidData(_))));
    }

    #[test]
    fn test_transient_errors() {
        assert!(DatabaseError::ConnectionError("down".to_string()).is_transient());
        assert!(DatabaseError::QueryError(sqlx::Error::PoolTimedOut).is_transient());
        assert!(!DatabaseError::QueryError(sqlx::Error::RowNotFound).is_transient());
        assert!(!DatabaseError::InvalidData("bad".to_string()).is_transient());
    }

    // Requires a tariff database: TEST_DATABASE_URL=... cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn test_pg_resolves_prices() {
        let database_url = std::env::var("TEST_DATABASE_URL")
            .expect("TEST_DATABASE_URL must be set for database tests");
        let pool = sqlx::PgPool::connect(&database_url).await.unwrap();
        health_check(&pool).await.unwrap();

        let repo = PgTariffRepository::new(pool);
        let prices = repo.resolve_prices(&create_test_query("JRALONE", "A")).await.unwrap();

        for price in &prices {
            assert!(price.matches(&create_test_query("JRALONE", "A")));
        }
    }
}
