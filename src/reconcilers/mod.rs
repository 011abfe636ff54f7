//! Reconciliation logic for watched resources

pub mod binding;
