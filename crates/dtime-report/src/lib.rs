//! Invoice-basis aggregation for the dtime back office.
//!
//! A report request folds flat, already-fetched contribution rows into
//! a company → project → user tree of exact decimal aggregates
//! ([`basis`]), after validating that the billing-rate configuration
//! of every involved project is sound ([`rates`]). All querying is
//! performed by the surrounding persistence layer.

pub mod basis;
pub mod error;
pub mod rates;

#[cfg(test)]
mod tests;
