mod calculator;

pub use calculator::{parse_numeric_preference, Calculator};
