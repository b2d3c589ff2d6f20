use clap::Parser;
use count_proteins::core::ConfigProvider;
use count_proteins::utils::{logger, validation::Validate};
use count_proteins::{
    write_outcome, CliConfig, ReportRunner, Result, TomlConfig, ToolServiceCmd,
};

#[tokio::main]
async fn main() {
    // a missing connection name exits here, before anything is spawned
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ Report failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(mut config: CliConfig) -> Result<()> {
    if let Some(path) = config.config.clone() {
        let file = TomlConfig::from_file(&path)?;
        file.validate()?;
        config.merge_file(&file);
    }
    config.validate()?;

    let format = config.output_format();
    let source = ToolServiceCmd::new(config.timeout());
    let runner = ReportRunner::new(source, config);

    let outcome = runner.run().await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_outcome(&mut out, &outcome, format)?;
    Ok(())
}
