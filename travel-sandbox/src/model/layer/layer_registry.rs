use std::collections::HashMap;

use super::LayerId;
use crate::{config::LayerDescriptor, model::SandboxError};

/// the static table of toggleable layers plus each layer's current visibility.
#[derive(Debug, Clone)]
pub struct LayerRegistry {
    layers: Vec<LayerDescriptor>,
    visible: HashMap<LayerId, bool>,
}

impl LayerRegistry {
    pub fn new(layers: Vec<LayerDescriptor>) -> Self {
        let visible = layers
            .iter()
            .map(|l| (l.id.clone(), l.default_visible))
            .collect();
        Self { layers, visible }
    }

    pub fn get(&self, layer_id: &LayerId) -> Result<&LayerDescriptor, SandboxError> {
        self.layers
            .iter()
            .find(|l| &l.id == layer_id)
            .ok_or_else(|| SandboxError::UnknownLayer(layer_id.clone()))
    }

    pub fn contains(&self, layer_id: &LayerId) -> bool {
        self.visible.contains_key(layer_id)
    }

    /// unregistered layers report as hidden.
    pub fn is_visible(&self, layer_id: &LayerId) -> bool {
        self.visible.get(layer_id).copied().unwrap_or(false)
    }

    pub fn set_visible(&mut self, layer_id: &LayerId, visible: bool) -> Result<(), SandboxError> {
        match self.visible.get_mut(layer_id) {
            Some(v) => {
                *v = visible;
                Ok(())
            }
            None => Err(SandboxError::UnknownLayer(layer_id.clone())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayerDescriptor> {
        self.layers.iter()
    }

    pub fn visible_layers(&self) -> Vec<&LayerId> {
        self.layers
            .iter()
            .filter(|l| self.is_visible(&l.id))
            .map(|l| &l.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SandboxConfig;

    #[test]
    fn test_defaults_only_schools_visible() {
        let registry = LayerRegistry::new(SandboxConfig::default().layers);
        assert_eq!(registry.visible_layers(), vec![&LayerId::schools()]);
    }

    #[test]
    fn test_unknown_layer() {
        let mut registry = LayerRegistry::new(SandboxConfig::default().layers);
        let missing = LayerId::from("ferries");
        assert!(matches!(
            registry.get(&missing),
            Err(SandboxError::UnknownLayer(_))
        ));
        assert!(registry.set_visible(&missing, true).is_err());
        assert!(!registry.is_visible(&missing));
    }

    #[test]
    fn test_set_visible() {
        let mut registry = LayerRegistry::new(SandboxConfig::default().layers);
        let parks = LayerId::from("parks");
        registry.set_visible(&parks, true).expect("test invariant failed");
        assert!(registry.is_visible(&parks));
        assert_eq!(registry.visible_layers().len(), 2);
    }
}
