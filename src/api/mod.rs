// ============================================================================
// Module : api
// ============================================================================
// Client de l'API YCharts (endpoint /companies)
// ============================================================================

pub mod ycharts;  // Client API YCharts

// Re-export des éléments principaux
pub use ycharts::{build_companies_url, point_params, series_params, YChartsClient, AUTH_HEADER};
