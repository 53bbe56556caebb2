// Service wiring
pub mod bootstrap;

// Macro score collection, scoring and daily caching
pub mod macro_score_service;

// Console and JSON output
pub mod reporting;

// Per-coin technical reports
pub mod technical_service;

pub use macro_score_service::MacroScoreService;
pub use reporting::PulseReporter;
pub use technical_service::TechnicalAnalysisService;
