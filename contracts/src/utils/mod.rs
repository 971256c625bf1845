//! Common Smart Contracts utilities.
pub mod initializable;
pub mod introspection;
