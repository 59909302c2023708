use std::collections::BTreeMap;

use crate::model::layer::LayerId;

/// popups or markers grouped by the layer they belong to, so they can follow
/// that layer's visibility.
#[derive(Debug, Clone)]
pub struct OverlayRegistry<Id> {
    by_layer: BTreeMap<LayerId, Vec<Id>>,
}

impl<Id> Default for OverlayRegistry<Id> {
    fn default() -> Self {
        Self {
            by_layer: BTreeMap::new(),
        }
    }
}

impl<Id: Copy + PartialEq> OverlayRegistry<Id> {
    pub fn register(&mut self, layer_id: &LayerId, id: Id) {
        self.by_layer.entry(layer_id.clone()).or_default().push(id);
    }

    /// returns false if the overlay was not registered.
    pub fn unregister(&mut self, id: Id) -> bool {
        let mut found = false;
        for ids in self.by_layer.values_mut() {
            let before = ids.len();
            ids.retain(|i| *i != id);
            found |= before != ids.len();
        }
        self.by_layer.retain(|_, ids| !ids.is_empty());
        found
    }

    pub fn ids_for(&self, layer_id: &LayerId) -> &[Id] {
        self.by_layer
            .get(layer_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::surface::PopupId;

    #[test]
    fn test_register_and_unregister() {
        let mut registry = OverlayRegistry::default();
        let parks = LayerId::from("parks");
        registry.register(&parks, PopupId(1));
        registry.register(&parks, PopupId(2));
        registry.register(&LayerId::schools(), PopupId(3));
        assert_eq!(registry.ids_for(&parks), &[PopupId(1), PopupId(2)]);
        assert_eq!(registry.ids_for(&LayerId::schools()), &[PopupId(3)]);

        assert!(registry.unregister(PopupId(1)));
        assert!(!registry.unregister(PopupId(1)));
        assert!(registry.unregister(PopupId(3)));
        assert!(registry.ids_for(&LayerId::schools()).is_empty());
        assert_eq!(registry.ids_for(&parks), &[PopupId(2)]);
    }
}
