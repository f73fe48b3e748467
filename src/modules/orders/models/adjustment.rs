use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What produced an adjustment. Manual adjustments are admin-entered and
/// survive recalculation; the rest are engine-owned and rebuilt on every
/// pass while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Originator {
    EnterpriseFee(Uuid),
    ShippingMethod(Uuid),
    TaxRate(Uuid),
    Manual,
}

/// What an adjustment attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Adjustable {
    Order,
    LineItem(Uuid),
    /// Tax sub-adjustment hanging off a fee or shipping adjustment
    Adjustment(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentState {
    /// Recomputed on every recalculation pass
    Open,
    /// Frozen history; the computed values outlive later fee or rate edits
    Closed,
}

/// A computed monetary entry on an order: an enterprise fee, a shipping
/// charge, a tax line or a manual admin entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adjustment {
    pub id: Uuid,
    pub label: String,
    /// Signed contribution to the order total
    pub amount: Decimal,
    pub originator: Originator,
    pub adjustable: Adjustable,
    pub tax_category_id: Option<Uuid>,
    /// Tax already inside `amount`; negative when an included rate reduces
    /// the contribution of a manual entry
    pub included_tax: Decimal,
    /// Whether the adjustment currently counts toward totals
    pub eligible: bool,
    state: AdjustmentState,
}

impl Adjustment {
    pub fn new(
        label: impl Into<String>,
        amount: Decimal,
        originator: Originator,
        adjustable: Adjustable,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            amount,
            originator,
            adjustable,
            tax_category_id: None,
            included_tax: Decimal::ZERO,
            eligible: true,
            state: AdjustmentState::Open,
        }
    }

    pub fn manual(label: impl Into<String>, amount: Decimal) -> Self {
        Self::new(label, amount, Originator::Manual, Adjustable::Order)
    }

    pub fn state(&self) -> AdjustmentState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == AdjustmentState::Open
    }

    /// Freeze the adjustment; closed adjustments are history and never
    /// recalculated
    pub fn close(&mut self) {
        self.state = AdjustmentState::Closed;
    }

    pub fn is_manual(&self) -> bool {
        self.originator == Originator::Manual
    }

    pub fn is_tax(&self) -> bool {
        matches!(self.originator, Originator::TaxRate(_))
    }

    pub fn is_shipping(&self) -> bool {
        matches!(self.originator, Originator::ShippingMethod(_))
    }
}
