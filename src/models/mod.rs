// ============================================================================
// Module : models
// ============================================================================
// Les quelques types partagés par le client : ressource demandée et dates
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod date;     // Formatage des dates YYYY-MM-DD
pub mod resource; // Ressources /companies (info, points, series)

// Re-export pour simplifier les imports
// On peut faire : use ycharts_client::models::CompanyResource;
pub use date::{api_date, API_DATE_FORMAT};
pub use resource::CompanyResource;
