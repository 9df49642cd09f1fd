//! Two-phase alias build over a source directory.

use std::path::Path;
use std::sync::Arc;

use rw_alias::{AliasConfig, AliasPlugin, BuildSummary, Page};
use rw_storage_fs::{FsSource, SourceDocument};

use crate::error::CliError;

/// Result of running the pipeline.
#[derive(Debug)]
pub(crate) struct PipelineReport {
    pub summary: BuildSummary,
    /// Number of documents scanned.
    pub documents: usize,
    /// Number of documents written, zero for a dry run.
    pub written: usize,
}

/// Collect aliases from every document under `source_dir`, then rewrite each
/// document.
///
/// Rewritten documents are written under `output_dir` when one is given.
/// The alias export, if enabled, goes to `project_dir`.
pub(crate) fn run(
    config: &AliasConfig,
    source_dir: &Path,
    output_dir: Option<&Path>,
    project_dir: &Path,
) -> Result<PipelineReport, CliError> {
    let documents = FsSource::new(source_dir).scan()?;
    let pages: Vec<Arc<Page>> = documents.iter().map(page_for).collect();

    let mut collector = AliasPlugin::new(config.clone()).start_build();
    for (page, doc) in pages.iter().zip(&documents) {
        collector.on_page_metadata(Arc::clone(page), &doc.metadata);
    }

    let mut rewriter = collector.finish();
    tracing::debug!(
        documents = documents.len(),
        aliases = rewriter.registry().len(),
        "Rewriting documents"
    );
    let mut written = 0;
    for (page, doc) in pages.iter().zip(&documents) {
        let rewrite = rewriter.on_page_content(page, &doc.body);
        if let Some(output_dir) = output_dir {
            FsSource::write(output_dir, &doc.url, &doc.with_body(&rewrite.content))?;
            written += 1;
        }
    }

    let summary = rewriter.finish(project_dir)?;
    Ok(PipelineReport {
        summary,
        documents: documents.len(),
        written,
    })
}

fn page_for(doc: &SourceDocument) -> Arc<Page> {
    Arc::new(Page::from_source(
        doc.url.as_str(),
        doc.url.as_str(),
        &doc.metadata,
        &doc.body,
    ))
}
