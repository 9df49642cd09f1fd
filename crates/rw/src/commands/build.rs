//! `rw-alias build` command implementation.

use std::path::PathBuf;

use clap::Args;
use rw_config::Config;

use super::AliasArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::pipeline;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    alias: AliasArgs,

    /// Output directory for rewritten pages (default: .rw/build/).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, reading, or writing fails, or if
    /// `--strict` is set and warnings were reported.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = self.alias.cli_settings(self.output_dir.clone());
        let config = Config::load(self.alias.config.as_deref(), Some(&cli_settings))?;
        crate::init_tracing(config.alias.verbose);

        let docs = &config.docs_resolved;
        output.info(&format!("Source: {}", docs.source_dir.display()));
        output.info(&format!("Output: {}", docs.output_dir.display()));

        let report = pipeline::run(
            &config.alias,
            &docs.source_dir,
            Some(&docs.output_dir),
            &docs.project_dir,
        )?;

        self.alias.report(&output, &report.summary)?;
        output.success(&format!(
            "Wrote {} page(s) to {}",
            report.written,
            docs.output_dir.display()
        ));
        Ok(())
    }
}
