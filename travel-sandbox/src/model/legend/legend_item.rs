use serde::{Deserialize, Serialize};

use crate::{
    config::{LayerDescriptor, LayerStyle},
    model::layer::LayerId,
};

/// one row of the on-screen key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendItem {
    pub layer_id: LayerId,
    pub label: String,
    pub symbol: LegendSymbol,
}

/// icon rows sort ahead of line rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LegendSymbol {
    Icon { image_path: String },
    Line { color: String },
}

impl LegendSymbol {
    pub fn group_rank(&self) -> u8 {
        match self {
            LegendSymbol::Icon { .. } => 0,
            LegendSymbol::Line { .. } => 1,
        }
    }
}

impl LegendItem {
    /// legend row for a layer. fill layers have no legend row.
    pub fn for_layer(layer: &LayerDescriptor) -> Option<LegendItem> {
        let symbol = match &layer.style {
            LayerStyle::Symbol { .. } => LegendSymbol::Icon {
                image_path: format!("./images/{}.png", layer.id),
            },
            LayerStyle::Line { color, .. } => LegendSymbol::Line {
                color: color.clone(),
            },
            LayerStyle::Fill { .. } => return None,
        };
        Some(LegendItem {
            layer_id: layer.id.clone(),
            label: format_label(layer.id.as_str()),
            symbol,
        })
    }
}

/// `watch-your-speed-program` -> `Watch Your Speed Program`
pub fn format_label(s: &str) -> String {
    s.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SandboxConfig;

    #[test]
    fn test_format_label() {
        assert_eq!(format_label("cycling-network"), "Cycling Network");
        assert_eq!(format_label("parks"), "Parks");
        assert_eq!(format_label("watch-your-speed-program"), "Watch Your Speed Program");
    }

    #[test]
    fn test_items_from_default_layers() {
        let config = SandboxConfig::default();
        let items = config
            .layers
            .iter()
            .filter_map(LegendItem::for_layer)
            .collect::<Vec<_>>();
        assert_eq!(items.len(), config.layers.len());
        let cycling = items
            .iter()
            .find(|i| i.layer_id.as_str() == "cycling-network")
            .expect("test invariant failed");
        assert_eq!(
            cycling.symbol,
            LegendSymbol::Line {
                color: String::from("blue")
            }
        );
        let schools = items
            .iter()
            .find(|i| i.layer_id.is_schools())
            .expect("test invariant failed");
        assert_eq!(
            schools.symbol,
            LegendSymbol::Icon {
                image_path: String::from("./images/schools.png")
            }
        );
        assert!(LegendItem::for_layer(&config.school_buffers_layer()).is_none());
    }
}
