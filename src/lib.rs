pub mod api;
pub mod compat;
pub mod config;
pub mod detect;
pub mod error;
pub mod optimizer;
pub mod pieces;
pub mod raster;

pub use api::{scramble, solve, Solution};
pub use error::{RejigError, RjResult};
