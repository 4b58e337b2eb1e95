//! Layout and paint passes.

pub mod engine;
pub mod paint;

pub use engine::{arrange_children, layout, measure_preferred, run};
pub use paint::{paint, paint_tree};
