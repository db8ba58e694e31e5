//! Business logic services

pub mod hos;
pub mod logsheet;
