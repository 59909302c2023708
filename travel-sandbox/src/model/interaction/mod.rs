mod focus_state;
mod gesture;
mod interaction_controller;
mod overlay_registry;

pub use focus_state::{FocusPhase, FocusState, School};
pub use gesture::{GestureId, GestureTracker, PendingClick};
pub use interaction_controller::InteractionController;
pub use overlay_registry::OverlayRegistry;
