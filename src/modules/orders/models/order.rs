use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Currency, Result};
use crate::modules::products::{Variant, VariantOverride};
use crate::modules::taxes::TaxRate;

use super::adjustment::{Adjustment, AdjustmentState};
use super::address::Address;
use super::line_item::LineItem;
use super::order_cycle::OrderCycle;
use super::shipment::{Shipment, ShipmentState, ShippingMethod};

/// Order state lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    Cart,
    Address,
    Delivery,
    Payment,
    Complete,
    Canceled,
    /// A canceled order brought back; behaves like complete with the
    /// shipment back to pending
    Resumed,
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderState::Cart => write!(f, "cart"),
            OrderState::Address => write!(f, "address"),
            OrderState::Delivery => write!(f, "delivery"),
            OrderState::Payment => write!(f, "payment"),
            OrderState::Complete => write!(f, "complete"),
            OrderState::Canceled => write!(f, "canceled"),
            OrderState::Resumed => write!(f, "resumed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    BalanceDue,
    Paid,
}

/// Admin choices offered when an order is canceled
#[derive(Debug, Clone, Copy)]
pub struct CancellationOptions {
    pub send_email: bool,
    pub restock: bool,
}

impl Default for CancellationOptions {
    fn default() -> Self {
        Self {
            send_email: true,
            restock: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestockEntry {
    pub variant_id: Uuid,
    pub quantity: i32,
}

/// What a cancellation asks the caller to do: queue the email and apply the
/// restock plan to its catalog. The engine never mutates shared variants.
#[derive(Debug, Clone)]
pub struct CancellationOutcome {
    pub email_queued: bool,
    pub restock_plan: Vec<RestockEntry>,
}

/// The order aggregate the calculation engine operates on.
///
/// Totals are derived state: `update_totals` (or a recalculation pass)
/// refreshes them after any mutation. Amounts keep full precision; rounding
/// happens in the display helpers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub number: String,
    pub currency: Currency,
    state: OrderState,
    pub payment_state: PaymentState,
    pub line_items: Vec<LineItem>,
    pub distributor_id: Option<Uuid>,
    pub order_cycle: Option<OrderCycle>,
    pub ship_address: Option<Address>,
    pub bill_address: Option<Address>,
    shipment: Option<Shipment>,
    pub adjustments: Vec<Adjustment>,
    pub item_total: Decimal,
    pub adjustment_total: Decimal,
    pub shipping_total: Decimal,
    pub included_tax_total: Decimal,
    pub additional_tax_total: Decimal,
    pub total: Decimal,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn new(number: impl Into<String>, currency: Currency) -> Self {
        Self {
            id: Uuid::new_v4(),
            number: number.into(),
            currency,
            state: OrderState::Cart,
            payment_state: PaymentState::BalanceDue,
            line_items: Vec::new(),
            distributor_id: None,
            order_cycle: None,
            ship_address: None,
            bill_address: None,
            shipment: None,
            adjustments: Vec::new(),
            item_total: Decimal::ZERO,
            adjustment_total: Decimal::ZERO,
            shipping_total: Decimal::ZERO,
            included_tax_total: Decimal::ZERO,
            additional_tax_total: Decimal::ZERO,
            total: Decimal::ZERO,
            completed_at: None,
        }
    }

    pub fn state(&self) -> OrderState {
        self.state
    }

    pub fn shipment(&self) -> Option<&Shipment> {
        self.shipment.as_ref()
    }

    pub fn shipment_state(&self) -> Option<ShipmentState> {
        self.shipment.as_ref().map(|s| s.state())
    }

    /// The tax zone resolved from the ship address
    pub fn tax_zone_id(&self) -> Option<Uuid> {
        self.ship_address.as_ref().and_then(|a| a.zone_id)
    }

    /// Step the checkout forward one state
    pub fn advance(&mut self) -> Result<OrderState> {
        self.state = match self.state {
            OrderState::Cart => OrderState::Address,
            OrderState::Address => OrderState::Delivery,
            OrderState::Delivery => OrderState::Payment,
            OrderState::Payment => {
                self.completed_at = Some(Utc::now());
                OrderState::Complete
            }
            state => {
                return Err(AppError::not_editable(format!(
                    "Cannot advance order {} from {} state",
                    self.number, state
                )))
            }
        };

        Ok(self.state)
    }

    pub fn is_canceled(&self) -> bool {
        self.state == OrderState::Canceled
    }

    /// Whether line items may still be edited
    pub fn editable(&self) -> bool {
        !self.is_canceled() && !self.shipment.as_ref().is_some_and(|s| s.is_shipped())
    }

    /// Whether the order is past the point where a shipping method is
    /// required
    pub fn requires_shipping(&self) -> bool {
        !self.line_items.is_empty()
            && matches!(
                self.state,
                OrderState::Delivery
                    | OrderState::Payment
                    | OrderState::Complete
                    | OrderState::Resumed
            )
    }

    /// Add a variant to the order, clamping to the stock the hub can
    /// actually supply.
    ///
    /// Quantities merge into an existing line for the same variant. Returns
    /// the line item id.
    pub fn add_item(
        &mut self,
        variant: &Variant,
        variant_override: Option<&VariantOverride>,
        quantity: i32,
    ) -> Result<Uuid> {
        if !self.editable() {
            return Err(AppError::not_editable(
                "Cannot add item to shipped/canceled order",
            ));
        }

        if quantity <= 0 {
            return Err(AppError::validation(format!(
                "Quantity must be positive, got: {}",
                quantity
            )));
        }

        let available = match variant_override {
            Some(vo) => vo.available_quantity(variant),
            None => variant.available_quantity(),
        };

        let existing_quantity = self
            .line_items
            .iter()
            .find(|li| li.variant_id == variant.id)
            .map(|li| li.quantity)
            .unwrap_or(0);

        let wanted = existing_quantity + quantity;
        let clamped = Self::clamp_to_stock(wanted, available)?;

        let id = if let Some(item) = self
            .line_items
            .iter_mut()
            .find(|li| li.variant_id == variant.id)
        {
            item.set_quantity(clamped)?;
            item.id
        } else {
            let item = LineItem::from_variant(variant, variant_override, clamped)?;
            let id = item.id;
            self.line_items.push(item);
            id
        };

        self.update_totals();
        Ok(id)
    }

    /// Change a line's quantity, clamped against the hub's stock
    pub fn update_item_quantity(
        &mut self,
        line_item_id: Uuid,
        quantity: i32,
        variant: &Variant,
        variant_override: Option<&VariantOverride>,
    ) -> Result<()> {
        if !self.editable() {
            return Err(AppError::not_editable(
                "Cannot edit items on a shipped/canceled order",
            ));
        }

        let available = match variant_override {
            Some(vo) => vo.available_quantity(variant),
            None => variant.available_quantity(),
        };
        let clamped = Self::clamp_to_stock(quantity, available)?;

        let item = self
            .line_items
            .iter_mut()
            .find(|li| li.id == line_item_id)
            .ok_or_else(|| AppError::not_found(format!("Line item {}", line_item_id)))?;

        item.set_quantity(clamped)?;
        self.update_totals();
        Ok(())
    }

    /// Remove a line item. Removing the last one cancels the order and
    /// returns the cancellation outcome.
    pub fn remove_item(
        &mut self,
        line_item_id: Uuid,
        options: CancellationOptions,
    ) -> Result<Option<CancellationOutcome>> {
        if !self.editable() {
            return Err(AppError::not_editable(
                "Cannot edit items on a shipped/canceled order",
            ));
        }

        let position = self
            .line_items
            .iter()
            .position(|li| li.id == line_item_id)
            .ok_or_else(|| AppError::not_found(format!("Line item {}", line_item_id)))?;
        let removed = self.line_items.remove(position);

        if self.line_items.is_empty() {
            let mut outcome = self.cancel(options)?;
            if options.restock {
                outcome.restock_plan.push(RestockEntry {
                    variant_id: removed.variant_id,
                    quantity: removed.quantity,
                });
            }
            return Ok(Some(outcome));
        }

        self.update_totals();
        Ok(None)
    }

    /// Cancel the order: fee-driven open adjustments are dropped, line items
    /// freeze, and the caller receives the email/restock decisions to act on.
    pub fn cancel(&mut self, options: CancellationOptions) -> Result<CancellationOutcome> {
        if self.is_canceled() {
            return Err(AppError::not_editable(format!(
                "Order {} is already canceled",
                self.number
            )));
        }

        self.state = OrderState::Canceled;
        self.adjustments
            .retain(|a| a.state() == AdjustmentState::Closed || a.is_manual());

        let restock_plan = if options.restock {
            self.line_items
                .iter()
                .map(|li| RestockEntry {
                    variant_id: li.variant_id,
                    quantity: li.quantity,
                })
                .collect()
        } else {
            Vec::new()
        };

        self.update_totals();

        Ok(CancellationOutcome {
            email_queued: options.send_email,
            restock_plan,
        })
    }

    /// Bring a canceled order back; the shipment returns to pending
    pub fn resume(&mut self) -> Result<()> {
        if !self.is_canceled() {
            return Err(AppError::not_editable(format!(
                "Order {} is not canceled",
                self.number
            )));
        }

        self.state = OrderState::Resumed;
        if let Some(shipment) = self.shipment.as_mut() {
            shipment.set_state(ShipmentState::Pending);
        }

        Ok(())
    }

    /// Select a shipping method, capturing its cost at selection time.
    ///
    /// The captured cost is the one the order keeps: later changes to the
    /// distributor's offering never move it.
    pub fn select_shipping_method(&mut self, method: &ShippingMethod) -> Result<()> {
        if self.is_canceled() {
            return Err(AppError::not_editable(
                "Cannot change the shipping method of a canceled order",
            ));
        }

        if self.shipment.as_ref().is_some_and(|s| s.is_shipped()) {
            return Err(AppError::not_editable(
                "Cannot change the shipping method of a shipped order",
            ));
        }

        let distributor_id = self
            .distributor_id
            .ok_or_else(|| AppError::validation("The order has no distributor"))?;

        if !method.distributor_ids.contains(&distributor_id) {
            return Err(AppError::validation(format!(
                "Shipping method {} is not offered by the order's distributor",
                method.name
            )));
        }

        let cost = method.calculator.compute(
            self.line_items.iter().map(|li| li.amount()).sum(),
            self.total_quantity(),
            self.total_weight(),
        );

        self.shipment = Some(Shipment::new(method.id, cost));
        Ok(())
    }

    /// Mark the shipment shipped; line items freeze from here on
    pub fn ship(&mut self) -> Result<()> {
        let shipment = self
            .shipment
            .as_mut()
            .ok_or(AppError::MissingShippingMethod)?;
        shipment.set_state(ShipmentState::Shipped);
        Ok(())
    }

    /// Add an admin-entered adjustment, optionally taxed.
    ///
    /// The tax component is extracted from the entered amount
    /// (t = A - A/(1+r)). Under an added rate the entry contributes its full
    /// amount and displays t as its tax; under an included rate the
    /// extraction comes off the contribution and surfaces as a negative tax
    /// line.
    pub fn add_manual_adjustment(
        &mut self,
        label: impl Into<String>,
        amount: Decimal,
        tax_rate: Option<&TaxRate>,
    ) -> Result<Uuid> {
        if self.is_canceled() {
            return Err(AppError::not_editable(
                "Cannot modify adjustments on a canceled order",
            ));
        }

        let label = label.into();
        if label.trim().is_empty() {
            return Err(AppError::validation("Adjustment label cannot be empty"));
        }

        let mut adjustment = Adjustment::manual(label, amount);
        if let Some(rate) = tax_rate {
            let extracted = amount - amount / (Decimal::ONE + rate.amount);
            if rate.included_in_price {
                adjustment.amount = amount - extracted;
                adjustment.included_tax = -extracted;
            } else {
                adjustment.included_tax = extracted;
            }
            adjustment.tax_category_id = Some(rate.tax_category_id);
        }

        let id = adjustment.id;
        self.adjustments.push(adjustment);
        self.update_totals();
        Ok(id)
    }

    /// Close all open adjustments, freezing their computed values as history
    pub fn finalize_adjustments(&mut self) {
        for adjustment in &mut self.adjustments {
            adjustment.close();
        }
    }

    pub fn total_quantity(&self) -> u32 {
        self.line_items.iter().map(|li| li.quantity as u32).sum()
    }

    /// Total shipping weight, kilograms
    pub fn total_weight(&self) -> Decimal {
        self.line_items.iter().map(|li| li.total_weight()).sum()
    }

    /// Refresh the derived totals from line items and adjustments
    pub fn update_totals(&mut self) {
        let item_total: Decimal = self.line_items.iter().map(|li| li.amount()).sum();

        let mut adjustment_total = Decimal::ZERO;
        let mut shipping_total = Decimal::ZERO;
        let mut additional_tax_total = Decimal::ZERO;
        let mut included_tax_total: Decimal =
            self.line_items.iter().map(|li| li.included_tax).sum();

        for adjustment in self.adjustments.iter().filter(|a| a.eligible) {
            adjustment_total += adjustment.amount;
            included_tax_total += adjustment.included_tax;
            if adjustment.is_shipping() {
                shipping_total += adjustment.amount;
            }
            if adjustment.is_tax() {
                additional_tax_total += adjustment.amount;
            }
        }

        self.item_total = item_total;
        self.adjustment_total = adjustment_total;
        self.shipping_total = shipping_total;
        self.additional_tax_total = additional_tax_total;
        self.included_tax_total = included_tax_total;
        self.total = item_total + adjustment_total;
    }

    /// Display strings, rounded half-up to the currency's minor unit
    pub fn display_total(&self) -> String {
        self.currency.format_amount(self.total)
    }

    pub fn display_tax_total(&self) -> String {
        self.currency
            .format_amount(self.included_tax_total + self.additional_tax_total)
    }

    fn clamp_to_stock(quantity: i32, available: Option<i64>) -> Result<i32> {
        match available {
            None => Ok(quantity),
            Some(0) => Err(AppError::validation("Out of stock")),
            Some(count) => Ok(quantity.min(count.min(i32::MAX as i64) as i32)),
        }
    }
}
