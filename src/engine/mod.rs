//! Batch conversion engine
//!
//! This module contains the batch run itself:
//! - Output tree mirroring
//! - Base/mask pair discovery
//! - Vignette construction
//! - Run orchestration and run log lines

mod builder;
mod driver;
mod messages;
mod mirror;
mod pairs;

pub use driver::Driver;
