mod price_estimator;

pub use price_estimator::SubscriptionPriceEstimator;
