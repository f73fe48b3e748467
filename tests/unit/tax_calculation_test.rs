//! Property-based tests for tax portion computation
//!
//! Included rates extract the tax component from a gross amount; added
//! rates charge on top of a net amount. The round-trip property holds to
//! within a cent after presentation rounding.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use ordercalc::core::Currency;
use ordercalc::taxes::TaxRate;

fn rate(amount: Decimal, included: bool) -> TaxRate {
    TaxRate::new("GST", amount, Uuid::new_v4(), Uuid::new_v4(), included)
        .expect("valid tax rate")
}

proptest! {
    #[test]
    fn test_added_tax_matches_rate(
        base_cents in 0u64..100_000_000u64,
        rate_percent in 0u8..=100u8
    ) {
        let base = Decimal::from(base_cents) / dec!(100);
        let fraction = Decimal::from(rate_percent) / dec!(100);

        let tax = rate(fraction, false).tax_portion(base);

        prop_assert_eq!(tax, base * fraction);
    }

    #[test]
    fn test_included_tax_round_trip(
        gross_cents in 1u64..100_000_000u64,
        rate_percent in 1u8..=100u8
    ) {
        let gross = Decimal::from(gross_cents) / dec!(100);
        let fraction = Decimal::from(rate_percent) / dec!(100);

        let tax = rate(fraction, true).tax_portion(gross);
        let net = gross - tax;

        // re-adding the tax to the net reproduces the gross within a cent
        let round_trip = Currency::USD.round(net * (Decimal::ONE + fraction));
        let difference = (round_trip - gross).abs();
        prop_assert!(
            difference <= dec!(0.01),
            "round trip off by {} for gross {} at {}",
            difference,
            gross,
            fraction
        );
    }

    #[test]
    fn test_included_tax_never_exceeds_gross(
        gross_cents in 0u64..100_000_000u64,
        rate_percent in 0u8..=100u8
    ) {
        let gross = Decimal::from(gross_cents) / dec!(100);
        let fraction = Decimal::from(rate_percent) / dec!(100);

        let tax = rate(fraction, true).tax_portion(gross);

        prop_assert!(tax >= Decimal::ZERO);
        prop_assert!(tax <= gross);
    }

    #[test]
    fn test_zero_rate_produces_zero_tax(
        base_cents in 0u64..100_000_000u64,
        included in proptest::bool::ANY
    ) {
        let base = Decimal::from(base_cents) / dec!(100);
        prop_assert_eq!(
            rate(Decimal::ZERO, included).tax_portion(base),
            Decimal::ZERO
        );
    }
}

#[test]
fn test_included_shipping_tax_example() {
    // $100.55 gross shipping at 10% included carries $9.14 of tax
    let gst = rate(dec!(0.10), true);
    let tax = Currency::USD.round(gst.tax_portion(dec!(100.55)));
    assert_eq!(tax, dec!(9.14));
}

#[test]
fn test_added_shipping_tax_example() {
    // the same $100.55 net with the tax added on top charges $10.06
    let gst = rate(dec!(0.10), false);
    let tax = Currency::USD.round(gst.tax_portion(dec!(100.55)));
    assert_eq!(tax, dec!(10.06));
}

#[test]
fn test_rate_validation_bounds() {
    let zone = Uuid::new_v4();
    let category = Uuid::new_v4();

    assert!(TaxRate::new("negative", dec!(-0.1), zone, category, false).is_err());
    assert!(TaxRate::new("over 100%", dec!(1.01), zone, category, false).is_err());
    assert!(TaxRate::new("too precise", dec!(0.12345), zone, category, false).is_err());
    assert!(TaxRate::new("ok", dec!(0.1025), zone, category, false).is_ok());
}
