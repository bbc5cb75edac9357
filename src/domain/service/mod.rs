//! Domain services

pub mod cost_estimator;

pub use cost_estimator::estimate_damage_cost;
