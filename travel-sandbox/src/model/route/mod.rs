mod draw;
mod route_estimate;

pub use draw::{DrawMode, DrawnRoute};
pub use route_estimate::RouteEstimate;
