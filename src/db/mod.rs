pub mod appeals;
pub mod clamps;
pub mod fields;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod stats;
