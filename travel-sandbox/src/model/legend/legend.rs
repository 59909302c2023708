use super::LegendItem;
use crate::model::layer::LayerId;

/// ordered list of legend rows for the visible layers. icons come before lines,
/// and rows within each group are alphabetical by layer id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Legend {
    items: Vec<LegendItem>,
}

impl Legend {
    pub fn new() -> Self {
        Self::default()
    }

    /// places the item at its sorted position. returns false if the layer is
    /// already listed.
    pub fn insert(&mut self, item: LegendItem) -> bool {
        if self.contains(&item.layer_id) {
            return false;
        }
        let key = (item.symbol.group_rank(), &item.layer_id);
        let position = self
            .items
            .iter()
            .position(|existing| (existing.symbol.group_rank(), &existing.layer_id) > key)
            .unwrap_or(self.items.len());
        self.items.insert(position, item);
        true
    }

    /// returns false if the layer was not listed.
    pub fn remove(&mut self, layer_id: &LayerId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| &i.layer_id != layer_id);
        before != self.items.len()
    }

    pub fn contains(&self, layer_id: &LayerId) -> bool {
        self.items.iter().any(|i| &i.layer_id == layer_id)
    }

    pub fn items(&self) -> &[LegendItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// CSS display value for the legend container
    pub fn container_display(&self) -> &'static str {
        if self.is_empty() {
            "none"
        } else {
            "block"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SandboxConfig, model::legend::LegendItem};
    use itertools::Itertools;

    fn item(layer: &str) -> LegendItem {
        let config = SandboxConfig::default();
        let descriptor = config
            .layers
            .iter()
            .find(|l| l.id.as_str() == layer)
            .expect("test invariant failed");
        LegendItem::for_layer(descriptor).expect("test invariant failed")
    }

    fn ids(legend: &Legend) -> Vec<&str> {
        legend.items().iter().map(|i| i.layer_id.as_str()).collect()
    }

    #[test]
    fn test_icons_before_lines_in_any_insertion_order() {
        let layers = ["parks", "schools", "cycling-network", "pedestrian-network"];
        for order in layers.iter().permutations(layers.len()) {
            let mut legend = Legend::new();
            for layer in order {
                legend.insert(item(layer));
            }
            assert_eq!(
                ids(&legend),
                vec!["parks", "schools", "cycling-network", "pedestrian-network"]
            );
        }
    }

    #[test]
    fn test_insert_then_remove_restores_prior_state() {
        let mut legend = Legend::new();
        legend.insert(item("schools"));
        legend.insert(item("pedestrian-network"));
        let before = legend.clone();

        for layer in ["parks", "cycling-network", "bike-share-stations", "subway-stations"] {
            assert!(legend.insert(item(layer)));
            assert!(legend.remove(&LayerId::from(layer)));
            assert_eq!(legend, before);
        }
    }

    #[test]
    fn test_duplicate_insert_and_missing_remove_are_no_ops() {
        let mut legend = Legend::new();
        assert!(legend.insert(item("parks")));
        assert!(!legend.insert(item("parks")));
        assert_eq!(legend.items().len(), 1);
        assert!(!legend.remove(&LayerId::from("schools")));
        assert_eq!(legend.items().len(), 1);
    }

    #[test]
    fn test_container_display() {
        let mut legend = Legend::new();
        assert_eq!(legend.container_display(), "none");
        legend.insert(item("schools"));
        assert_eq!(legend.container_display(), "block");
        legend.remove(&LayerId::schools());
        assert_eq!(legend.container_display(), "none");
    }
}
