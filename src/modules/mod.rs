pub mod calculators;
pub mod enterprise_fees;
pub mod orders;
pub mod products;
pub mod reports;
pub mod subscriptions;
pub mod taxes;
