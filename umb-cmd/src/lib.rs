//! Command implementations for the Umbrella CLI.
//!
//! Provides subcommands for the live rainfall report, the hazard map
//! export and village vulnerability scoring.

use clap::{Args, Subcommand};
use std::{path::PathBuf, time::Duration};
use umb_hazard::{
    catalog::HazardCatalog,
    district::DISTRICTS_JSON,
    fetcher::{FetchConfig, RainfallFetcher, DEFAULT_ENDPOINT, DEFAULT_TIMEZONE},
    lake::LAKES_CSV,
    vulnerability::{Village, VILLAGES_CSV},
};
use umb_layers::visibility::VisibilityMode;

pub mod map;
pub mod rainfall;
pub mod villages;

/// Weather endpoint options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Daily forecast endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Per-district request deadline in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Time zone used to bucket daily totals
    #[arg(long, default_value = DEFAULT_TIMEZONE)]
    pub timezone: String,
}

impl FetchArgs {
    pub fn config(&self) -> FetchConfig {
        FetchConfig {
            endpoint: self.endpoint.clone(),
            timezone: self.timezone.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            ..FetchConfig::default()
        }
    }

    pub fn fetcher(&self) -> RainfallFetcher<umb_hazard::fetcher::OpenMeteoSource> {
        RainfallFetcher::open_meteo(self.config())
    }
}

/// Alternate catalog files; the embedded catalog is used when absent.
#[derive(Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// Glacial lake CSV (id,name,lat,lng,risk,district,warning_time)
    #[arg(long)]
    pub lakes_csv: Option<PathBuf>,

    /// District JSON array with boundaries and rivers
    #[arg(long)]
    pub districts_json: Option<PathBuf>,
}

impl CatalogArgs {
    pub fn load(&self) -> anyhow::Result<HazardCatalog> {
        let lakes = read_or(self.lakes_csv.as_ref(), LAKES_CSV)?;
        let districts = read_or(self.districts_json.as_ref(), DISTRICTS_JSON)?;
        Ok(HazardCatalog::from_sources(&lakes, &districts)?)
    }
}

fn read_or(path: Option<&PathBuf>, embedded: &str) -> anyhow::Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", p.display(), e)),
        None => Ok(embedded.to_string()),
    }
}

pub fn load_villages(path: Option<&PathBuf>) -> anyhow::Result<Vec<Village>> {
    let villages = read_or(path, VILLAGES_CSV)?;
    Ok(Village::parse_village_csv(&villages)?)
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch live 48 hour rainfall for every district and classify it
    Rainfall {
        #[command(flatten)]
        fetch: FetchArgs,

        #[command(flatten)]
        catalog: CatalogArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Build the hazard layers and write the visible ones as GeoJSON
    Map {
        #[command(flatten)]
        fetch: FetchArgs,

        #[command(flatten)]
        catalog: CatalogArgs,

        /// Layers to show: glof, flood or both
        #[arg(short, long, default_value = "glof")]
        mode: VisibilityMode,

        /// Output path for the GeoJSON (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Score village vulnerability using live district rainfall
    Villages {
        #[command(flatten)]
        fetch: FetchArgs,

        #[command(flatten)]
        catalog: CatalogArgs,

        /// Village CSV (name,district,population,travel_time,road_safe,historical_event,threat_type)
        #[arg(long)]
        villages_csv: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Rainfall {
            fetch,
            catalog,
            json,
        } => rainfall::run_rainfall(&fetch, &catalog, json).await,
        Command::Map {
            fetch,
            catalog,
            mode,
            output,
        } => map::run_map(&fetch, &catalog, mode, output.as_deref()).await,
        Command::Villages {
            fetch,
            catalog,
            villages_csv,
            json,
        } => villages::run_villages(&fetch, &catalog, villages_csv.as_ref(), json).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn test_map_defaults() {
        let cli = TestCli::try_parse_from(["umbrella", "map"]).unwrap();
        match cli.command {
            Command::Map {
                fetch, mode, output, ..
            } => {
                assert_eq!(mode, VisibilityMode::Glof);
                assert!(output.is_none());
                assert_eq!(fetch.config(), FetchConfig::default());
            }
            _ => panic!("expected map command"),
        }
    }

    #[test]
    fn test_fetch_overrides() {
        let cli = TestCli::try_parse_from([
            "umbrella",
            "rainfall",
            "--timeout-secs",
            "3",
            "--endpoint",
            "http://localhost:9000/v1/forecast",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Command::Rainfall { fetch, json, .. } => {
                assert!(json);
                let config = fetch.config();
                assert_eq!(config.timeout, Duration::from_secs(3));
                assert_eq!(config.endpoint, "http://localhost:9000/v1/forecast");
                assert_eq!(config.timezone, DEFAULT_TIMEZONE);
            }
            _ => panic!("expected rainfall command"),
        }
    }

    #[test]
    fn test_embedded_catalog_when_no_paths() {
        let catalog = CatalogArgs::default().load().unwrap();
        assert_eq!(catalog.districts.len(), 5);
        assert_eq!(load_villages(None).unwrap().len(), 15);
    }

    #[test]
    fn test_missing_catalog_file_is_an_error() {
        let args = CatalogArgs {
            lakes_csv: Some(PathBuf::from("/nonexistent/lakes.csv")),
            districts_json: None,
        };
        assert!(args.load().is_err());
    }
}
