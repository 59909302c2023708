pub mod download;
mod gbfs_cli;

pub use gbfs_cli::{GbfsCliArguments, GbfsOperation};
