// ============================================================================
// API Client : YCharts (/companies)
// ============================================================================
// Construit les URLs des trois ressources /companies (info, points, series),
// ajoute le header d'authentification et renvoie le corps JSON tel quel.
//
// Aucune validation des entrées, aucun parsing de la réponse : c'est à
// l'appelant d'interpréter le JSON (voir https://ycharts.com/api/docs/).
//
// CONCEPTS RUST :
// 1. Génériques avec AsRef<str> : accepte &[&str], &[String], Vec<String>...
// 2. async/await : une seule requête en vol par appel
// 3. anyhow::Context : chaque étape qui peut échouer est décrite
// ============================================================================

use std::fmt;

use anyhow::{Context, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, error, info, instrument};

use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::models::CompanyResource;

/// Header d'authentification attendu par YCharts
pub const AUTH_HEADER: &str = "X-YCHARTSAUTHORIZATION";

// ============================================================================
// Client
// ============================================================================

/// Client de l'API YCharts, limité à l'endpoint /companies
///
/// CONCEPT RUST : état immutable
/// - base_url et api_key ne changent jamais après la construction
/// - reqwest::Client est un pool de connexions partageable (Clone bon marché)
#[derive(Clone)]
pub struct YChartsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for YChartsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YChartsClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl YChartsClient {
    /// Crée un client pointant sur https://ycharts.com/api/v3/
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Crée un client sur une autre URL de base (proxy, serveur de test...)
    ///
    /// Le "/" final est ajouté s'il manque, les chemins étant concaténés
    /// directement derrière.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let http = reqwest::Client::builder()
            .build()
            .context("Échec de la création du client HTTP")?;

        debug!(base_url = %base_url, "Created YCharts client");
        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Crée un client depuis la configuration chargée
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::with_base_url(config.api_key.clone(), config.base_url.clone())
    }

    /// URL de base (toujours terminée par "/")
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL complète d'une ressource /companies, sans query string
    pub fn companies_url<T, F>(&self, resource: CompanyResource, tickers: &[T], fields: &[F]) -> String
    where
        T: AsRef<str>,
        F: AsRef<str>,
    {
        build_companies_url(&self.base_url, resource, tickers, fields)
    }

    // ========================================================================
    // Opérations publiques
    // ========================================================================

    /// Informations descriptives des sociétés
    ///
    /// # Arguments
    /// * `tickers` - Symboles (ex: ["AAPL", "MSFT"])
    /// * `fields` - Champs demandés (ex: ["exchange", "industry"])
    ///
    /// # Retourne
    /// * `Result<String>` - Le JSON brut renvoyé par l'API
    ///
    /// # Exemple
    /// let json = client.get_company_info(&["AAPL", "MSFT"], &["exchange", "industry"]).await?;
    /// // GET .../companies/AAPL,MSFT/info/exchange,industry
    #[instrument(skip_all, fields(resource = "info", tickers = tickers.len()))]
    pub async fn get_company_info<T, F>(&self, tickers: &[T], fields: &[F]) -> Result<String>
    where
        T: AsRef<str>,
        F: AsRef<str>,
    {
        let url = self.companies_url(CompanyResource::Info, tickers, fields);
        self.get_data(&url, "").await
    }

    /// Valeur des métriques à une date donnée
    ///
    /// `date` au format YYYY-MM-DD ; une chaîne vide laisse l'API choisir
    /// la valeur la plus récente (pas de paramètre `date`).
    ///
    /// # Exemple
    /// let json = client.get_company_data_point(&["AAPL"], &["price"], "2016-03-03").await?;
    /// // GET .../companies/AAPL/points/price?date=2016-03-03
    #[instrument(skip_all, fields(resource = "points", tickers = tickers.len(), date = %date))]
    pub async fn get_company_data_point<T, M>(&self, tickers: &[T], metrics: &[M], date: &str) -> Result<String>
    where
        T: AsRef<str>,
        M: AsRef<str>,
    {
        let url = self.companies_url(CompanyResource::Points, tickers, metrics);
        let params = point_params(date);
        self.get_data(&url, &params).await
    }

    /// Série temporelle des métriques entre deux dates
    ///
    /// `start_date` et `end_date` sont chacun optionnels (chaîne vide).
    ///
    /// # Exemple
    /// let json = client
    ///     .get_company_data_timeseries(&["AAPL"], &["price"], "2016-03-03", "2016-03-15")
    ///     .await?;
    /// // GET .../companies/AAPL/series/price?start_date=2016-03-03&end_date=2016-03-15
    #[instrument(
        skip_all,
        fields(resource = "series", tickers = tickers.len(), start_date = %start_date, end_date = %end_date)
    )]
    pub async fn get_company_data_timeseries<T, M>(
        &self,
        tickers: &[T],
        metrics: &[M],
        start_date: &str,
        end_date: &str,
    ) -> Result<String>
    where
        T: AsRef<str>,
        M: AsRef<str>,
    {
        let url = self.companies_url(CompanyResource::Series, tickers, metrics);
        let params = series_params(start_date, end_date);
        self.get_data(&url, &params).await
    }

    /// GET authentifié, renvoie le corps de la réponse sans modification
    ///
    /// `params` est une query string déjà encodée ; elle est ajoutée
    /// derrière "?" seulement si elle n'est pas vide.
    ///
    /// Toute erreur réseau ou statut HTTP hors 2xx remonte à l'appelant,
    /// sans nouvelle tentative.
    pub async fn get_data(&self, url: &str, params: &str) -> Result<String> {
        let url = with_query(url, params);
        debug!(url = %url, "Sending HTTP request to YCharts");

        let response = self
            .http
            .get(&url)
            .header(AUTH_HEADER, self.api_key.as_str())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .context("Échec de la requête HTTP vers YCharts")?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        // Vérifie que la réponse est un succès HTTP (200-299)
        if !status.is_success() {
            error!(status = %status, url = %url, "YCharts returned error status");
            anyhow::bail!("YCharts a retourné une erreur : HTTP {}", status);
        }

        let body = response
            .text()
            .await
            .context("Échec de la lecture de la réponse YCharts")?;

        info!(bytes = body.len(), "Successfully fetched YCharts data");
        Ok(body)
    }
}

// ============================================================================
// Construction des URLs
// ============================================================================
// Fonctions pures : testables sans réseau ni runtime
// ============================================================================

/// Joint une liste par des virgules, dans l'ordre (ex: "AAPL,MSFT")
fn csv<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}

/// Construit `{base}companies/{tickers}/{resource}/{fields}`
///
/// `base_url` doit se terminer par "/".
pub fn build_companies_url<T, F>(base_url: &str, resource: CompanyResource, tickers: &[T], fields: &[F]) -> String
where
    T: AsRef<str>,
    F: AsRef<str>,
{
    format!(
        "{}companies/{}/{}/{}",
        base_url,
        csv(tickers),
        resource,
        csv(fields)
    )
}

/// Caractères laissés tels quels dans une valeur : les "unreserved" de la
/// RFC 3986 (lettres, chiffres, "-", ".", "_", "~"). Tout le reste est
/// encodé en %XX, y compris l'espace (%20).
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Assemble les paires "clé=valeur" non vides, séparées par "&"
///
/// CONCEPT RUST : Iterator::filter + map + collect
/// - Les paires à valeur vide sont omises
/// - join("&") insère le séparateur uniquement entre deux paires
fn query_string(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}={}", key, utf8_percent_encode(value, QUERY_VALUE)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Query string des points : "date=..." ou "" si pas de date
pub fn point_params(date: &str) -> String {
    query_string(&[("date", date)])
}

/// Query string des séries : start_date puis end_date, chacun optionnel
pub fn series_params(start_date: &str, end_date: &str) -> String {
    query_string(&[("start_date", start_date), ("end_date", end_date)])
}

/// Ajoute "?params" à l'URL si params n'est pas vide
fn with_query(url: &str, params: &str) -> String {
    if params.is_empty() {
        url.to_string()
    } else {
        format!("{}?{}", url, params)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
