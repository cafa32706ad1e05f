// Reconciliation
pub mod install;
pub mod upgrade;

// Inspection
pub mod config;
pub mod info;
