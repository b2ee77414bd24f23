use std::{mem, path::PathBuf, sync::Arc};

use log::{info, warn};
use playlist_rs::{Playlist, RuleSet, SourceDocument, merge, sentinel_position, strip_header, transform};

use crate::{Config, SourceConfig, errors::PipelineError, fetching::Fetcher, output::write_playlist};

mod auxiliary;
pub use auxiliary::*;

/// What a run did, for the final log line.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Names of the sources that made it into the playlist
    pub succeeded: Vec<String>,
    /// Recoverable problems met on the way
    pub warnings: Vec<PipelineError>,
    pub output_path: PathBuf,
    pub lines: usize,
}

/// Fetch → rewrite → strip → merge → append → write, one source after another.
pub struct Pipeline<F: Fetcher> {
    config: Arc<Config>,
    fetcher: F,
    rule_sets: Vec<RuleSet>,
}

impl<F: Fetcher> Pipeline<F> {
    pub fn new(config: Arc<Config>, fetcher: F) -> Result<Self, PipelineError> {
        let rule_sets = config
            .sources
            .iter()
            .map(|source| {
                source
                    .rule_set(&config.attribute_key)
                    .map_err(|error| PipelineError::InvalidRules {
                        name: source.name.clone(),
                        error,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            config,
            fetcher,
            rule_sets,
        })
    }

    async fn process_source(
        &self,
        source: &SourceConfig,
        rules: &RuleSet,
    ) -> Result<SourceDocument, PipelineError> {
        info!(
            "Fetching and processing {} M3U from {}...",
            source.name, source.url
        );
        let text = self
            .fetcher
            .fetch(&source.url)
            .await
            .ok_or_else(|| PipelineError::FetchFailure {
                name: source.name.clone(),
                url: source.url.clone(),
            })?;
        let mut document = transform(text, rules);

        if let Some(sentinel) = &source.strip_sentinel {
            if sentinel_position(&document.lines, sentinel).is_some() {
                document.lines = strip_header(mem::take(&mut document.lines), sentinel);
            } else {
                warn!(
                    "Sentinel '{}' not found in {}, keeping the whole document",
                    sentinel, source.name
                );
            }
        }

        if document.is_empty() {
            return Err(PipelineError::EmptySource {
                name: source.name.clone(),
                url: source.url.clone(),
            });
        }

        Ok(document)
    }

    /// Adds the auxiliary content, either after its insertion marker or at the end.
    fn apply_auxiliary(
        &self,
        playlist: &mut Playlist,
        summary: &mut RunSummary,
    ) -> Result<(), PipelineError> {
        let Some(auxiliary) = &self.config.auxiliary else {
            return Ok(());
        };

        let content = match load_auxiliary(&auxiliary.path) {
            Ok(content) => content,
            Err(e) if !e.is_fatal() => {
                warn!("{}, nothing appended", e);
                summary.warnings.push(e);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        if content.is_empty() {
            warn!("{} is empty, nothing appended", auxiliary.path.display());
            return Ok(());
        }
        info!("Content to insert loaded from {}", auxiliary.path.display());

        let Some(marker) = &auxiliary.insert_after else {
            playlist.append(&content);
            return Ok(());
        };

        if playlist.insert_after(marker, &content) {
            info!("Content inserted after marker");
        } else {
            warn!(
                "Insertion marker '{}' not found, appending content to end",
                marker
            );
            playlist.append(&content);
        }

        Ok(())
    }

    /// Builds the merged playlist without writing it.
    pub async fn build(&self) -> Result<(Playlist, RunSummary), PipelineError> {
        let mut summary = RunSummary::default();
        let mut documents = Vec::with_capacity(self.config.sources.len());

        for (source, rules) in self.config.sources.iter().zip(self.rule_sets.iter()) {
            match self.process_source(source, rules).await {
                Ok(document) => {
                    summary.succeeded.push(source.name.clone());
                    documents.push(document);
                }
                Err(e) if !e.is_fatal() => {
                    warn!("{}, skipping", e);
                    summary.warnings.push(e);
                }
                Err(e) => return Err(e),
            }
        }

        if documents.is_empty() {
            return Err(PipelineError::AllSourcesFailed);
        }

        let mut playlist = merge(documents.iter());
        self.apply_auxiliary(&mut playlist, &mut summary)?;

        Ok((playlist, summary))
    }

    pub async fn run(&self) -> Result<RunSummary, PipelineError> {
        let (playlist, mut summary) = self.build().await?;

        summary.output_path = self.config.output_path();
        write_playlist(&summary.output_path, &playlist)?;
        summary.lines = playlist.len();

        info!(
            "Successfully merged {} source(s) and saved to {}",
            summary.succeeded.len(),
            summary.output_path.display()
        );
        Ok(summary)
    }
}
