//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{RunOptions, SourceConfig};
use crate::engine::SyncEngine;
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::source::PagedSource;
use crate::state::SnapshotOracle;
use crate::stream::{AlwaysChanged, ChangeOracle};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let source = PagedSource::with_http(self.source_config()?, HttpClientConfig::default())?;

        match &self.cli.command {
            Commands::Count => {
                println!("{}", source.count().await?);
                Ok(())
            }
            Commands::Urls => {
                for url in source.urls().await? {
                    println!("{url}");
                }
                Ok(())
            }
            Commands::Read {
                partial,
                max_items,
                snapshot,
                output,
            } => {
                let mut options = RunOptions::from_env();
                if *partial {
                    options = options.with_partial(true);
                }
                if let Some(max) = max_items {
                    options = options.with_max_items(*max);
                }
                self.read(&source, options, snapshot.as_deref(), output.as_deref())
                    .await
            }
        }
    }

    /// Merge config file, inline JSON and flag overrides
    fn source_config(&self) -> Result<SourceConfig> {
        let mut config = match (&self.cli.config, &self.cli.config_json) {
            (Some(_), Some(_)) => {
                return Err(Error::config(
                    "Use either --config or --config-json, not both",
                ))
            }
            (Some(path), None) => SourceConfig::from_file(path)?,
            (None, Some(json)) => SourceConfig::from_json(json)?,
            (None, None) => SourceConfig::default(),
        };

        if let Some(url) = &self.cli.url {
            config.url = Some(url.clone());
        }
        if let Some(pages) = self.cli.limit_pages {
            config.limit_pages = Some(pages);
        }
        Ok(config)
    }

    async fn read(
        &self,
        source: &PagedSource,
        options: RunOptions,
        snapshot: Option<&Path>,
        output: Option<&Path>,
    ) -> Result<()> {
        let oracle: Box<dyn ChangeOracle> = match snapshot {
            Some(path) => Box::new(SnapshotOracle::from_file(path)?),
            None => Box::new(AlwaysChanged),
        };

        let mut writer: Box<dyn Write> = match output {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(BufWriter::new(io::stdout().lock())),
        };

        let mut stream = source.records(options).await?;
        let stats = SyncEngine::new(oracle)
            .run(&mut stream, |record| {
                serde_json::to_writer(&mut writer, &record)?;
                writer.write_all(b"\n")?;
                Ok(())
            })
            .await?;
        writer.flush()?;

        eprintln!("{}", serde_json::to_string(&stats)?);
        Ok(())
    }
}
