pub mod buffer;
pub mod interaction;
pub mod layer;
pub mod legend;
pub mod route;
mod sandbox_error;
pub mod surface;

pub use sandbox_error::SandboxError;
