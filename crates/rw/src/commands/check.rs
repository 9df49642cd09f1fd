//! `rw-alias check` command implementation.

use clap::Args;
use rw_config::Config;

use super::AliasArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::pipeline;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    alias: AliasArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or reading fails, or if `--strict`
    /// is set and warnings were reported.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = self.alias.cli_settings(None);
        let config = Config::load(self.alias.config.as_deref(), Some(&cli_settings))?;
        crate::init_tracing(config.alias.verbose);

        let docs = &config.docs_resolved;
        output.highlight(&format!("Checking {}", docs.source_dir.display()));

        let report = pipeline::run(&config.alias, &docs.source_dir, None, &docs.project_dir)?;

        self.alias.report(&output, &report.summary)?;
        if report.summary.has_warnings() {
            output.warning(&format!(
                "{} document(s) checked with {} warning(s)",
                report.documents,
                report.summary.warnings.len()
            ));
        } else {
            output.success(&format!("{} document(s) checked, no problems", report.documents));
        }
        Ok(())
    }
}
