mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    // Logs go to stderr so redirected stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Commands::Redact {
            input,
            output,
            role,
            config,
            entities,
            save_tokens,
        } => commands::redact::handle(
            &input,
            &output,
            &role,
            config.as_deref(),
            entities.as_deref(),
            save_tokens.as_deref(),
        ),
        cli::Commands::Restore {
            input,
            tokens,
            output,
            role,
            config,
        } => commands::restore::handle(&input, &tokens, &output, &role, config.as_deref()),
        cli::Commands::ListRoles { config } => commands::roles::list(config.as_deref()),
        cli::Commands::GenerateConfig { output } => commands::config::generate(&output),
        cli::Commands::Completions { shell } => {
            commands::completions(shell);
            Ok(())
        }
    }
}
