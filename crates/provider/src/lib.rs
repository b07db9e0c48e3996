pub mod bedrock;
pub mod common;
pub mod nova;
pub mod titan;

use relay_core::provider::{ModelSchema, Variant};
use std::sync::Arc;

/// The schema for a deployment's variant.
pub fn schema_for(variant: Variant) -> Arc<dyn ModelSchema> {
    match variant {
        Variant::Nova => Arc::new(nova::NovaSchema),
        Variant::Titan => Arc::new(titan::TitanSchema),
    }
}
