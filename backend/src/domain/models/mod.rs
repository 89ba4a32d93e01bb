//! Domain entity models.

pub mod budget;
pub mod transaction;
