use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::calculators::Calculator;

/// A distributor-offered shipping method with its fee calculator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingMethod {
    pub id: Uuid,
    pub name: String,
    pub calculator: Calculator,
    pub tax_category_id: Option<Uuid>,
    /// Distributors this method is offered by
    pub distributor_ids: Vec<Uuid>,
}

impl ShippingMethod {
    pub fn new(
        name: impl Into<String>,
        calculator: Calculator,
        tax_category_id: Option<Uuid>,
        distributor_ids: Vec<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            calculator,
            tax_category_id,
            distributor_ids,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipmentState {
    Pending,
    Ready,
    Shipped,
}

impl std::fmt::Display for ShipmentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShipmentState::Pending => write!(f, "pending"),
            ShipmentState::Ready => write!(f, "ready"),
            ShipmentState::Shipped => write!(f, "shipped"),
        }
    }
}

/// The order's shipment.
///
/// The cost is captured when the method is selected and never re-derived
/// afterwards: a distributor changing its offered methods or rates must not
/// move the cost of an existing selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    pub id: Uuid,
    pub shipping_method_id: Uuid,
    pub cost: Decimal,
    state: ShipmentState,
}

impl Shipment {
    pub fn new(shipping_method_id: Uuid, cost: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            shipping_method_id,
            cost,
            state: ShipmentState::Pending,
        }
    }

    pub fn state(&self) -> ShipmentState {
        self.state
    }

    pub fn is_shipped(&self) -> bool {
        self.state == ShipmentState::Shipped
    }

    pub fn set_state(&mut self, state: ShipmentState) {
        self.state = state;
    }
}
