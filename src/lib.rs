// ============================================================================
// YCharts Client - Library
// ============================================================================
// Expose les modules publics pour le binaire de démonstration et les tests
// ============================================================================

pub mod api;       // Client API YCharts
pub mod config;    // Configuration (clé API, URL de base, sortie)
pub mod models;    // Ressources et dates

pub use api::YChartsClient;
pub use config::ClientConfig;
pub use models::CompanyResource;
