//! Type definitions

pub mod logsheet;
pub mod plan;

pub use logsheet::*;
pub use plan::*;
