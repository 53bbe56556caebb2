// Market snapshot and provider data types
pub mod market;

// Port interfaces
pub mod ports;

// Repository traits
pub mod repositories;

// Macro sentiment scoring
pub mod scoring;

// Fear & Greed sentiment
pub mod sentiment;

// Technical indicator formulas
pub mod technical;

// Domain-specific error types
pub mod errors;
