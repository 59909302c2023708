mod cli_coordinates;
pub mod replay;
mod sandbox_cli;

pub use cli_coordinates::{parse_coordinate, parse_lat, parse_lon, parse_route, CliRoute};
pub use sandbox_cli::{SandboxCliArguments, SandboxOperation};
