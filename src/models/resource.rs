// ============================================================================
// Enum : CompanyResource
// ============================================================================
// Les trois "formes" de ressource exposées par /companies sur l'API YCharts
//
// CONCEPTS RUST :
// 1. Enum sans données : chaque variante est une simple étiquette
// 2. Copy : l'enum est copiée implicitement (pas de move)
// 3. Display : permet d'utiliser l'enum directement dans format!
// ============================================================================

use std::fmt;

/// Ressource demandée pour un ensemble de sociétés
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompanyResource {
    /// Informations descriptives (exchange, industry, ...)
    Info,
    /// Valeur d'une métrique à une date donnée
    Points,
    /// Valeurs d'une métrique sur une plage de dates
    Series,
}

impl CompanyResource {
    /// Segment de chemin utilisé dans l'URL
    /// (ex: ".../companies/AAPL/points/price")
    pub fn path_segment(&self) -> &'static str {
        match self {
            CompanyResource::Info => "info",
            CompanyResource::Points => "points",
            CompanyResource::Series => "series",
        }
    }
}

impl fmt::Display for CompanyResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}
