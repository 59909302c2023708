use serde::{Deserialize, Serialize};

use crate::model::{layer::LayerId, legend::LegendItem};

/// page elements outside the map that the sandbox shows, hides or writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageElement {
    Sidebar,
    OpenSidebarButton,
    FocusIndicator,
    FocusIndicatorText,
    BufferControls,
    Legend,
}

/// the document hosting the map.
pub trait PageSurface {
    fn set_display(&mut self, element: PageElement, visible: bool);
    fn set_text(&mut self, element: PageElement, text: &str);
    /// redraws the legend rows in the given order.
    fn render_legend(&mut self, items: &[LegendItem]);
    /// marks a sidebar toggle button as on or off.
    fn set_layer_toggle(&mut self, layer_id: &LayerId, on: bool);
    /// widens the map container when the sidebar is closed.
    fn set_map_content_width(&mut self, full: bool);
    fn download(&mut self, file_name: &str, bytes: &[u8]);
}
