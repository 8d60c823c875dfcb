//! Built-in numeric building blocks used by the allocation engine.

// Allocation helpers
pub mod proportional;
