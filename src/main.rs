// ============================================================================
// YCharts Client - Démonstration
// ============================================================================
// Interroge les trois ressources /companies (info, points, series) pour
// AAPL et MSFT, puis écrit les trois réponses JSON dans un fichier texte,
// une par ligne.
//
// Configuration : ycharts.json ou variables d'environnement
//   YCHARTS_API_KEY=... cargo run
// ============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, error, info};

use ycharts_client::config::ClientConfig;
use ycharts_client::models::api_date;
use ycharts_client::YChartsClient;

// ============================================================================
// Initialisation du logging
// ============================================================================
// Les logs vont dans un fichier pour ne pas se mélanger à la sortie console
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// Les logs sont écrits dans ./logs/ycharts_client.log (rotation quotidienne)
///
/// # Utilisation
/// ```bash
/// # Voir les logs en temps réel
/// tail -f logs/ycharts_client.log.*
///
/// # Contrôler le niveau de log
/// RUST_LOG=ycharts_client=trace cargo run
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = std::path::PathBuf::from("./logs");

    // Crée le répertoire s'il n'existe pas
    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "ycharts_client.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender) // Écrit dans le fichier
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true) // Inclut le module (ex: ycharts_client::api::ycharts)
                .with_line_number(true),
        )
        .with(
            // Par défaut : debug pour ycharts_client, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ycharts_client=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!("YCharts client demo starting up");

    let config = ClientConfig::load();
    let client = YChartsClient::from_config(&config)?;

    // CONCEPT RUST : Async dans sync
    // - tokio::runtime::Runtime : crée un runtime tokio
    // - .block_on() : exécute la future de manière bloquante
    let runtime = tokio::runtime::Runtime::new()?;
    let lines = match runtime.block_on(fetch_demo_data(&client)) {
        Ok(lines) => lines,
        Err(e) => {
            error!(error = ?e, "Demo requests failed");
            return Err(e);
        }
    };

    write_lines(&config.output_path, &lines)?;

    info!(output = %config.output_path.display(), "Demo finished");
    println!("✅ Réponses écrites dans {}", config.output_path.display());
    Ok(())
}

/// Lance les trois requêtes de démonstration, l'une après l'autre
async fn fetch_demo_data(client: &YChartsClient) -> Result<Vec<String>> {
    let tickers = ["AAPL", "MSFT"];

    let start = NaiveDate::from_ymd_opt(2016, 3, 3).context("Date de début invalide")?;
    let end = NaiveDate::from_ymd_opt(2016, 3, 15).context("Date de fin invalide")?;

    debug!("Fetching company info");
    let info_rsp = client
        .get_company_info(&tickers, &["exchange", "industry"])
        .await
        .context("Échec de la requête info")?;

    debug!("Fetching company data points");
    let points_rsp = client
        .get_company_data_point(&tickers, &["price", "pe_ratio"], &api_date(start))
        .await
        .context("Échec de la requête points")?;

    debug!("Fetching company data series");
    let series_rsp = client
        .get_company_data_timeseries(&tickers, &["price"], &api_date(start), &api_date(end))
        .await
        .context("Échec de la requête series")?;

    Ok(vec![info_rsp, points_rsp, series_rsp])
}

/// Écrit chaque réponse sur sa propre ligne
fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }

    std::fs::write(path, content)
        .with_context(|| format!("Échec de l'écriture de {}", path.display()))?;

    debug!(path = %path.display(), lines = lines.len(), "Output file written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_lines_one_response_per_line() {
        let path = std::env::temp_dir().join(format!("ycharts_demo_{}.txt", std::process::id()));
        let lines = vec!["{\"a\":1}".to_string(), "{}".to_string(), "{\"b\":2}".to_string()];

        write_lines(&path, &lines).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(content, "{\"a\":1}\n{}\n{\"b\":2}\n");
        assert_eq!(content.lines().count(), 3);
    }
}
