//! CLI command implementations

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{log_event_with_fields, Event};
use crate::service::StudentService;
use crate::store::{Collection, JsonFileStore, DEFAULT_DATA_FILE};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path of the JSON data file (default "Students.json")
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// HTTP server settings
    #[serde(flatten)]
    pub http: HttpServerConfig,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file, or defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> CliResult<Self> {
        match fs::metadata(path) {
            Ok(_) => Self::load(path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(CliError::config_error(format!("Failed to read config: {}", e))),
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(CliError::config_error("data_file must not be empty"));
        }

        if self.http.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        Ok(())
    }
}

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Create an empty data file.
///
/// Fails if the data file already exists, so existing records are never
/// overwritten.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;
    let store = JsonFileStore::new(&config.data_file);

    if store.exists() {
        return Err(CliError::already_initialized(store.path().display()));
    }

    store.save(&Collection::new())?;

    let path = store.path().display().to_string();
    log_event_with_fields(Event::StorageCreated, &[("path", path.as_str())]);
    Ok(())
}

/// Serve the HTTP API until the process is stopped.
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load_or_default(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }
    config.validate()?;

    let data_file = config.data_file.display().to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("data_file", data_file.as_str())],
    );

    let service = StudentService::new(JsonFileStore::new(&config.data_file));
    let server = HttpServer::with_config(config.http, service);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.data_file, PathBuf::from("Students.json"));
        assert_eq!(config.http.port, 8001);
    }

    #[test]
    fn test_config_flattened_http_fields() {
        let config: Config =
            serde_json::from_str(r#"{"data_file": "/srv/s.json", "host": "0.0.0.0", "port": 9000}"#)
                .unwrap();
        assert_eq!(config.data_file, PathBuf::from("/srv/s.json"));
        assert_eq!(config.http.socket_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("studentdb.json");

        fs::write(&path, r#"{"port": 0}"#).unwrap();
        assert!(Config::load(&path).is_err());

        fs::write(&path, "not json").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(err.message().contains("Invalid config JSON"));
    }

    #[test]
    fn test_init_creates_empty_file_once() {
        let dir = TempDir::new().unwrap();
        let data_file = dir.path().join("Students.json");
        let config_path = dir.path().join("studentdb.json");
        fs::write(
            &config_path,
            serde_json::json!({ "data_file": data_file }).to_string(),
        )
        .unwrap();

        init(&config_path).unwrap();
        assert_eq!(fs::read_to_string(&data_file).unwrap(), "{}");

        let err = init(&config_path).unwrap_err();
        assert_eq!(err.code_str(), "STUDENTDB_CLI_ALREADY_INITIALIZED");
    }
}
