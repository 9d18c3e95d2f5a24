//! Infrastructure layer implementing the domain's storage contracts.

pub mod persistence;
