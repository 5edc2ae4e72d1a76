pub mod health;
pub mod schedule;
