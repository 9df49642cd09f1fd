//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod check;

use std::path::PathBuf;

use clap::Args;
use rw_alias::BuildSummary;
use rw_config::CliSettings;

use crate::error::CliError;
use crate::output::Output;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;

/// Options shared by `build` and `check`.
#[derive(Args)]
pub(crate) struct AliasArgs {
    /// Path to configuration file (default: auto-discover rw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Log every alias and replacement, and write .rw/aliases.tsv.
    #[arg(short, long)]
    verbose: bool,

    /// Use heading text as link text for `[[alias#anchor]]`.
    #[arg(long)]
    use_anchor_titles: bool,

    /// Prefix link text with the target page icon.
    #[arg(long)]
    use_page_icon: bool,

    /// Fail when any alias warning is reported.
    #[arg(long)]
    strict: bool,
}

impl AliasArgs {
    /// Build CLI settings from args; unset flags keep config file values.
    fn cli_settings(&self, output_dir: Option<PathBuf>) -> CliSettings {
        CliSettings {
            source_dir: self.source_dir.clone(),
            output_dir,
            verbose: self.verbose.then_some(true),
            use_anchor_titles: self.use_anchor_titles.then_some(true),
            use_page_icon: self.use_page_icon.then_some(true),
        }
    }

    /// Print the build summary and apply `--strict`.
    ///
    /// Individual warnings are already logged as they occur.
    fn report(&self, output: &Output, summary: &BuildSummary) -> Result<(), CliError> {
        for line in summary_lines(summary) {
            output.info(&line);
        }

        if self.strict && summary.has_warnings() {
            return Err(CliError::Strict(summary.warnings.len()));
        }
        Ok(())
    }
}

/// Count lines for a finished build.
fn summary_lines(summary: &BuildSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "{} alias(es), {} link(s) resolved, {} unresolved",
        summary.aliases, summary.references_resolved, summary.references_unresolved
    )];
    if let Some(path) = &summary.export_path {
        lines.push(format!("Alias export: {}", path.display()));
    }
    lines
}
