// ============================================================================
// Dates au format API
// ============================================================================
// L'API attend des dates "YYYY-MM-DD". Une chaîne vide signifie "non fournie".
// ============================================================================

use chrono::NaiveDate;

/// Format utilisé par l'API YCharts pour toutes les dates
pub const API_DATE_FORMAT: &str = "%Y-%m-%d";

/// Formatte une date pour l'API (ex: 2016-03-03)
pub fn api_date(date: NaiveDate) -> String {
    date.format(API_DATE_FORMAT).to_string()
}
