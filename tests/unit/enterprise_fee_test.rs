//! Tests for enterprise fee configuration rules
//!
//! Inheriting a tax category from the product is only possible with a
//! per-item calculator; the validation must block persistence, and a
//! rejected calculator change must leave the stored calculator untouched.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use ordercalc::calculators::{parse_numeric_preference, Calculator};
use ordercalc::core::AppError;
use ordercalc::enterprise_fees::{EnterpriseFee, FeeType};

fn inheriting_per_item_fee() -> EnterpriseFee {
    EnterpriseFee::new(
        "Packing",
        FeeType::Packing,
        Uuid::new_v4(),
        Calculator::PerItem { amount: dec!(1) },
        None,
        true,
    )
    .expect("per-item fee may inherit its tax category")
}

#[test]
fn test_per_order_calculators_cannot_inherit() {
    let per_order_calculators = vec![
        Calculator::None,
        Calculator::FlatRate { amount: dec!(5) },
        Calculator::FlatPercentage { percent: dec!(10) },
        Calculator::Weight { rate: dec!(2) },
        Calculator::FlexibleRate {
            first_item: dec!(2),
            additional_item: dec!(1),
            max_items: 10,
        },
        Calculator::PriceSack {
            minimal_amount: dec!(50),
            normal_amount: dec!(10),
            discount_amount: dec!(5),
        },
    ];

    for calculator in per_order_calculators {
        let result = EnterpriseFee::new(
            "Admin",
            FeeType::Admin,
            Uuid::new_v4(),
            calculator.clone(),
            None,
            true,
        );

        let err = result.expect_err(&format!("{} must not inherit", calculator.name()));
        assert_eq!(
            err.to_string(),
            "Inheriting the tax category requires a per-item calculator."
        );
    }
}

#[test]
fn test_per_item_calculators_may_inherit() {
    for calculator in [
        Calculator::PerItem { amount: dec!(1) },
        Calculator::FlatPercentPerItem { percent: dec!(10) },
    ] {
        assert!(EnterpriseFee::new(
            "Packing",
            FeeType::Packing,
            Uuid::new_v4(),
            calculator,
            None,
            true,
        )
        .is_ok());
    }
}

#[test]
fn test_rejected_calculator_switch_keeps_previous_value() {
    let mut fee = inheriting_per_item_fee();
    let before = fee.calculator().clone();

    let result = fee.update_calculator(Calculator::FlatRate { amount: dec!(5) });

    assert!(matches!(result, Err(AppError::IncompatibleTaxInheritance)));
    assert_eq!(fee.calculator(), &before);
}

#[test]
fn test_dropping_inheritance_unlocks_per_order_calculators() {
    let mut fee = inheriting_per_item_fee();

    fee.update_tax_category(Some(Uuid::new_v4()), false).unwrap();
    fee.update_calculator(Calculator::FlatRate { amount: dec!(5) })
        .unwrap();

    assert_eq!(
        fee.calculator(),
        &Calculator::FlatRate { amount: dec!(5) }
    );
}

#[test]
fn test_explicit_category_and_inheritance_conflict() {
    let result = EnterpriseFee::new(
        "Packing",
        FeeType::Packing,
        Uuid::new_v4(),
        Calculator::PerItem { amount: dec!(1) },
        Some(Uuid::new_v4()),
        true,
    );

    assert!(result.is_err());
}

#[test]
fn test_preference_parsing_accepts_plain_numbers() {
    assert_eq!(parse_numeric_preference("10").unwrap(), dec!(10));
    assert_eq!(parse_numeric_preference("5.5").unwrap(), dec!(5.5));
    assert_eq!(parse_numeric_preference("-20").unwrap(), dec!(-20));
}

#[test]
fn test_preference_parsing_rejects_non_numbers() {
    for input in ["ten", "1,000", "$5", "1e3", ""] {
        let err = parse_numeric_preference(input).expect_err(input);
        assert!(
            err.to_string()
                .contains("Invalid input. Please use only numbers. For example: 10, 5.5, -20"),
            "unexpected message for {:?}: {}",
            input,
            err
        );
    }
}

#[test]
fn test_inherited_category_follows_the_product() {
    let fee = inheriting_per_item_fee();
    let product_category = Uuid::new_v4();

    assert_eq!(
        fee.tax_category_for(Some(product_category)),
        Some(product_category)
    );
    assert_eq!(fee.tax_category_for(None), None);
    assert_eq!(
        fee.compute(dec!(10), 3, Decimal::ZERO),
        dec!(3),
        "per-item fee charges per unit"
    );
}
