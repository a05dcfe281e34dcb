//! Application pages

pub mod analyze;
