use serde::{Deserialize, Serialize};

/// travel mode of a school catchment buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferKind {
    Walking,
    Cycling,
}

impl BufferKind {
    /// feature property the buffer layer styles and filters on
    pub const TYPE_PROPERTY: &'static str = "TYPE";

    /// cycling first so the smaller walking buffer draws on top.
    pub const DRAW_ORDER: [BufferKind; 2] = [BufferKind::Cycling, BufferKind::Walking];

    pub fn type_tag(&self) -> &'static str {
        match self {
            BufferKind::Walking => "WALKING-BUFFER",
            BufferKind::Cycling => "CYCLING-BUFFER",
        }
    }
}

impl std::fmt::Display for BufferKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferKind::Walking => write!(f, "walking"),
            BufferKind::Cycling => write!(f, "cycling"),
        }
    }
}
