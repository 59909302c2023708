mod legend;
mod legend_item;

pub use legend::Legend;
pub use legend_item::{format_label, LegendItem, LegendSymbol};
