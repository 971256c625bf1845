//! Utilities for contract introspection.
pub mod erc165;
