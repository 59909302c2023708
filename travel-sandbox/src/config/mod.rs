mod default_layers;
mod layer_descriptor;
mod sandbox_config;

pub use layer_descriptor::{
    FillRule, LayerDescriptor, LayerSource, LayerStyle, PopupField, PopupTemplate,
};
pub use sandbox_config::SandboxConfig;
