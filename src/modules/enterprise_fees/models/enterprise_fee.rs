use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::calculators::Calculator;

/// The purpose a fee is charged for, shown in admin screens and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeType {
    Admin,
    Packing,
    Fundraising,
    Sales,
    Payment,
    Shipping,
}

impl std::fmt::Display for FeeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeeType::Admin => write!(f, "admin"),
            FeeType::Packing => write!(f, "packing"),
            FeeType::Fundraising => write!(f, "fundraising"),
            FeeType::Sales => write!(f, "sales"),
            FeeType::Payment => write!(f, "payment"),
            FeeType::Shipping => write!(f, "shipping"),
        }
    }
}

/// An admin-configured fee owned by an enterprise.
///
/// The fee either names its own tax category, inherits the product's, or
/// attracts no tax. Inheriting is only possible for per-item calculators:
/// a per-order calculator has no single product to inherit from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnterpriseFee {
    pub id: Uuid,
    pub name: String,
    pub fee_type: FeeType,
    pub enterprise_id: Uuid,
    calculator: Calculator,
    tax_category_id: Option<Uuid>,
    inherits_tax_category: bool,
}

impl EnterpriseFee {
    /// Create an enterprise fee with validation
    pub fn new(
        name: impl Into<String>,
        fee_type: FeeType,
        enterprise_id: Uuid,
        calculator: Calculator,
        tax_category_id: Option<Uuid>,
        inherits_tax_category: bool,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AppError::validation("Fee name cannot be empty"));
        }

        calculator.validate()?;
        Self::validate_tax_config(&calculator, tax_category_id, inherits_tax_category)?;

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            fee_type,
            enterprise_id,
            calculator,
            tax_category_id,
            inherits_tax_category,
        })
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn inherits_tax_category(&self) -> bool {
        self.inherits_tax_category
    }

    /// Replace the calculator, re-validating tax inheritance.
    ///
    /// An incompatible change is rejected and the previously persisted
    /// calculator stays in place.
    pub fn update_calculator(&mut self, calculator: Calculator) -> Result<()> {
        calculator.validate()?;
        Self::validate_tax_config(&calculator, self.tax_category_id, self.inherits_tax_category)?;
        self.calculator = calculator;
        Ok(())
    }

    /// Switch between an explicit tax category and inheriting from the product
    pub fn update_tax_category(
        &mut self,
        tax_category_id: Option<Uuid>,
        inherits_tax_category: bool,
    ) -> Result<()> {
        Self::validate_tax_config(&self.calculator, tax_category_id, inherits_tax_category)?;
        self.tax_category_id = tax_category_id;
        self.inherits_tax_category = inherits_tax_category;
        Ok(())
    }

    /// The tax category this fee is taxed under when charged against a line
    /// item of the given product tax category
    pub fn tax_category_for(&self, product_tax_category: Option<Uuid>) -> Option<Uuid> {
        if self.inherits_tax_category {
            product_tax_category
        } else {
            self.tax_category_id
        }
    }

    /// Compute the fee amount for a base, quantity and weight
    pub fn compute(&self, base: Decimal, quantity: u32, weight: Decimal) -> Decimal {
        self.calculator.compute(base, quantity, weight)
    }

    /// Adjustment label, e.g. "packing fee by distributor Green Hub"
    pub fn label(&self, role: &str, enterprise_name: &str) -> String {
        format!("{} fee by {} {}", self.fee_type, role, enterprise_name)
    }

    fn validate_tax_config(
        calculator: &Calculator,
        tax_category_id: Option<Uuid>,
        inherits_tax_category: bool,
    ) -> Result<()> {
        if inherits_tax_category && tax_category_id.is_some() {
            return Err(AppError::validation(
                "A fee cannot both name a tax category and inherit one from the product",
            ));
        }

        if inherits_tax_category && !calculator.is_per_item() {
            return Err(AppError::IncompatibleTaxInheritance);
        }

        Ok(())
    }
}
