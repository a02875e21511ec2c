//! CLI command implementations.
//!
//! - `pack` - Pack a diameter list and emit SVG, JSON or PNG
//! - `benchmark` - Compare the strategies on random diameters
//! - `strategies` - List available placement strategies (in `main`)

pub mod common;
pub mod config;
pub mod pack;
pub mod benchmark;

pub use pack::cmd_pack;
pub use benchmark::cmd_benchmark;
