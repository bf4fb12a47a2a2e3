//! CLI runner - executes commands

use crate::catalog::{CatalogSource, FileCatalogSource, HttpCatalogSource};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::FeedConfig;
use crate::error::{Error, Result};
use crate::session::{FeedSession, FetchOutcome, LoadOutcome, SkipReason};
use crate::view::{
    pretty_row, render_json, render_pretty, EndReachedTrigger, Row, Screen, ScrollMetrics,
    LOADING_FOOTER,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// Summary of a browse run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowseReport {
    /// Scroll steps taken
    pub steps: usize,
    /// Rows visible at the end
    pub visible: usize,
    /// Whether the whole catalog was revealed
    pub exhausted: bool,
}

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
        match &self.cli.command {
            Commands::Browse {
                viewport,
                max_steps,
            } => {
                let config = self.load_config()?;
                let session = self.build_session(&config)?;
                self.browse(&session, &config, *viewport, *max_steps)
                    .await
                    .map(|_| ())
            }
            Commands::Fetch => {
                let config = self.load_config()?;
                let session = self.build_session(&config)?;
                self.fetch(&session).await
            }
            Commands::Config => self.show_config(),
        }
    }

    /// Effective configuration: file (or defaults) plus command-line overrides
    pub fn load_config(&self) -> Result<FeedConfig> {
        let mut config = match &self.cli.config {
            Some(path) => FeedConfig::from_file(path)?,
            None => FeedConfig::default(),
        };

        if let Some(endpoint) = &self.cli.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        if self.cli.no_delay {
            config.load_delay_ms = 0;
        }

        config.validate()?;
        Ok(config)
    }

    /// Session over the configured catalog source
    pub fn build_session(&self, config: &FeedConfig) -> Result<FeedSession> {
        let source: Arc<dyn CatalogSource> = match &self.cli.catalog_file {
            Some(path) => Arc::new(FileCatalogSource::new(path)),
            None => Arc::new(HttpCatalogSource::from_config(config)?),
        };
        Ok(FeedSession::from_config(source, config))
    }

    /// Activate the session, then scroll one viewport at a time, asking for
    /// more whenever the end is reached, until the catalog is exhausted.
    pub async fn browse(
        &self,
        session: &FeedSession,
        config: &FeedConfig,
        viewport: u16,
        max_steps: Option<usize>,
    ) -> Result<BrowseReport> {
        session.activate().await;

        let screen = Screen::from_snapshot(&session.snapshot().await);
        match &screen {
            Screen::Error { message } => {
                self.output_screen(&screen)?;
                return Err(Error::Other(format!("Catalog fetch failed: {message}")));
            }
            Screen::Empty => {
                self.output_screen(&screen)?;
                return Ok(BrowseReport {
                    steps: 0,
                    visible: 0,
                    exhausted: true,
                });
            }
            Screen::List { rows, .. } => self.output_rows(rows),
        }

        let trigger = EndReachedTrigger::new(config.end_reached_threshold);
        let viewport = f64::from(viewport);
        let mut shown = screen.rows().len();
        let mut offset = 0.0_f64;
        let mut steps = 0;

        loop {
            if max_steps.is_some_and(|max| steps >= max) {
                debug!("Stopping after {steps} scroll steps");
                break;
            }
            steps += 1;

            let content = shown as f64;
            offset = (offset + viewport).min((content - viewport).max(0.0));
            let metrics = ScrollMetrics::new(offset, viewport, content);

            let (outcome, ()) = tokio::join!(trigger.on_scroll(&metrics, session), async {
                if session.is_loading().await {
                    self.output_loading();
                }
            });

            match outcome {
                None | Some(LoadOutcome::Skipped { reason: SkipReason::InFlight }) => {}
                Some(LoadOutcome::Appended { .. }) => {
                    let snapshot = session.snapshot().await;
                    let rows: Vec<Row> = snapshot.visible[shown..].iter().map(Row::from).collect();
                    self.output_rows(&rows);
                    shown = snapshot.visible.len();
                }
                Some(LoadOutcome::Exhausted | LoadOutcome::Skipped { .. }) => {
                    self.output_end(shown);
                    break;
                }
            }
        }

        Ok(BrowseReport {
            steps,
            visible: shown,
            exhausted: session.is_exhausted().await,
        })
    }

    /// Activate the session and print what came back
    pub async fn fetch(&self, session: &FeedSession) -> Result<()> {
        let outcome = session.activate().await;
        let snapshot = session.snapshot().await;

        if let FetchOutcome::Failed { message } = &outcome {
            self.output_screen(&Screen::from_snapshot(&snapshot))?;
            return Err(Error::Other(format!("Catalog fetch failed: {message}")));
        }

        let summary = json!({
            "source": session.source_description(),
            "result": outcome,
            "fetched_at": snapshot.fetched_at,
        });
        self.output_message(&summary);
        Ok(())
    }

    /// Print the effective configuration as YAML
    fn show_config(&self) -> Result<()> {
        let config = self.load_config()?;
        print!("{}", config.to_yaml()?);
        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }

    /// Output a whole screen
    fn output_screen(&self, screen: &Screen) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => println!("{}", render_json(screen)?),
            OutputFormat::Pretty => println!("{}", render_pretty(screen)),
        }
        Ok(())
    }

    /// Output newly revealed rows
    fn output_rows(&self, rows: &[Row]) {
        for row in rows {
            match self.cli.format {
                OutputFormat::Json => {
                    let event = json!({"event": "row", "row": row});
                    println!("{event}");
                }
                OutputFormat::Pretty => println!("{}", pretty_row(row)),
            }
        }
    }

    /// Output the loading footer
    fn output_loading(&self) {
        match self.cli.format {
            OutputFormat::Json => println!("{}", json!({"event": "loading"})),
            OutputFormat::Pretty => println!("{LOADING_FOOTER}"),
        }
    }

    /// Output the end-of-list marker
    fn output_end(&self, visible: usize) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", json!({"event": "exhausted", "visible": visible}));
            }
            OutputFormat::Pretty => println!("-- end of catalog ({visible} products) --"),
        }
    }
}
