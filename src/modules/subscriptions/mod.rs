pub mod services;

pub use services::SubscriptionPriceEstimator;
