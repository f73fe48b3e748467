mod variant;
mod variant_override;

pub use variant::{Variant, VariantUnit};
pub use variant_override::VariantOverride;
