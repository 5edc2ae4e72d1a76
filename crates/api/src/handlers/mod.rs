pub mod preset;
pub mod schedule;
