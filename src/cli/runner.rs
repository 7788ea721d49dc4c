//! CLI runner - executes commands

use crate::catalog::Catalog;
use crate::cli::commands::{Cli, Commands};
use crate::config::Config;
use crate::engine::SyncEngine;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::output::{JsonLinesSink, MessageSink};
use crate::pagination::ApiSource;
use crate::state::StateStore;
use crate::streams::{StreamDefinition, StreamRegistry};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
    registry: StreamRegistry,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            registry: StreamRegistry::builtin(),
        }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Sync { streams } => {
                self.sync(streams.as_deref(), JsonLinesSink::stdout())
                    .await
            }
            Commands::Discover => self.discover(),
            Commands::Streams => self.streams(),
        }
    }

    /// Load configuration
    fn load_config(&self) -> Result<Config> {
        // Inline config takes precedence
        if let Some(json_str) = &self.cli.config_json {
            return Config::from_json(json_str);
        }

        if let Some(path) = &self.cli.config {
            return Config::from_file(path);
        }

        Err(Error::config("no configuration given (use --config or --config-json)"))
    }

    /// Load state
    fn load_state(&self) -> Result<StateStore> {
        // Inline state takes precedence; a state path still receives checkpoints
        match (&self.cli.state_json, &self.cli.state) {
            (Some(state_json), Some(path)) => Ok(StateStore::from_json(state_json)?.with_path(path)),
            (Some(state_json), None) => StateStore::from_json(state_json),
            (None, Some(path)) => StateStore::from_file(path),
            (None, None) => Ok(StateStore::in_memory()),
        }
    }

    /// Resolve the streams to sync: catalog, then `--streams`, then everything
    fn select_streams(&self, streams: Option<&str>) -> Result<Vec<StreamDefinition>> {
        if let Some(path) = &self.cli.catalog {
            return Catalog::from_file(path)?.select(&self.registry);
        }

        match streams {
            Some(list) => {
                let ids: Vec<&str> = list
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect();
                if ids.is_empty() {
                    Ok(self.registry.iter().copied().collect())
                } else {
                    self.registry.select(&ids)
                }
            }
            None => Ok(self.registry.iter().copied().collect()),
        }
    }

    /// Sync selected streams
    async fn sync<S: MessageSink>(&self, streams: Option<&str>, sink: S) -> Result<()> {
        let config = self.load_config()?;
        let selected = self.select_streams(streams)?;
        config.check_streams(&selected)?;
        let state = self.load_state()?;

        info!(
            "Syncing {} stream(s) for organization {}",
            selected.len(),
            config.organization_id
        );

        let client = HttpClient::with_config(config.http_config())?;
        let source = ApiSource::new(Arc::new(client), config.endpoint()?)
            .with_throttle(config.throttle())
            .with_vars(config.template_vars());

        let mut engine = SyncEngine::new(source, state, sink, config.sync_config());
        let stats = engine.sync_all(&selected).await?;

        info!(
            "Synced {} records from {} streams",
            stats.records_synced, stats.streams_synced
        );
        Ok(())
    }

    /// Print a catalog of every stream
    fn discover(&self) -> Result<()> {
        let catalog = Catalog::from_registry(&self.registry)?;
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        Ok(())
    }

    /// List stream ids
    fn streams(&self) -> Result<()> {
        println!(
            "{}",
            json!({
                "type": "STREAMS",
                "streams": self.registry.ids(),
            })
        );
        Ok(())
    }
}
