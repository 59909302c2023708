mod buffer_engine;
mod buffer_feature_set;
mod buffer_kind;

pub use buffer_engine::BufferEngine;
pub use buffer_feature_set::{BufferFeature, BufferFeatureSet};
pub use buffer_kind::BufferKind;
