mod layer_id;
mod layer_registry;

pub use layer_id::LayerId;
pub use layer_registry::LayerRegistry;
