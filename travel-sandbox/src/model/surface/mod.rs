mod map_feature;
mod map_provider;
mod page_surface;
#[cfg(test)]
pub mod recording;

pub use map_feature::{FeatureKey, MapFeature};
pub use map_provider::{Cursor, LayerFilter, MapProvider, MarkerId, PopupId, SourceData};
pub use page_surface::{PageElement, PageSurface};
