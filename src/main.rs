use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use dpv::app::App;
use dpv::config::Config;
use dpv::error::{AppError, AppResult};
use dpv::logging::{init_logging, install_panic_hook};
use dpv::presenter::PresenterKind;
use dpv::viewer::DocumentVariant;

#[derive(Parser, Debug)]
#[command(name = "dpv", about = "Terminal viewer for a full and a condensed PDF")]
#[command(version)]
struct Cli {
    /// Full variant of the document
    full: Option<PathBuf>,

    /// Condensed variant of the document
    condensed: Option<PathBuf>,

    /// Variant shown first (full or condensed)
    #[arg(long, value_parser = parse_variant)]
    variant: Option<DocumentVariant>,

    /// Config file to use instead of the default lookup
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let log_path = init_logging(&config.log, cli.verbose)?;
    install_panic_hook();
    info!(
        log = %log_path.display(),
        full = %config.documents.full.display(),
        condensed = %config.documents.condensed.display(),
        "starting dpv"
    );

    let mut app = App::new_with_config(PresenterKind::RatatuiImage, config)?;
    app.run().await
}

fn resolve_config(cli: &Cli) -> AppResult<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    apply_cli_overrides(&mut config, cli);
    Ok(config)
}

fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(full) = &cli.full {
        config.documents.full = full.clone();
    }
    if let Some(condensed) = &cli.condensed {
        config.documents.condensed = condensed.clone();
    }
    if let Some(variant) = cli.variant {
        config.documents.initial = variant;
    }
    if let Some(log_file) = &cli.log_file {
        config.log.file = Some(log_file.clone());
    }
}

fn parse_variant(value: &str) -> AppResult<DocumentVariant> {
    DocumentVariant::parse(value).ok_or_else(|| {
        AppError::invalid_argument(format!(
            "unknown variant `{value}` (expected full or condensed)"
        ))
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use dpv::config::Config;
    use dpv::viewer::DocumentVariant;

    use super::{Cli, apply_cli_overrides};

    #[test]
    fn positional_paths_and_variant_override_config() {
        let cli = Cli::try_parse_from([
            "dpv",
            "cv.pdf",
            "cv_short.pdf",
            "--variant",
            "condensed",
            "--log-file",
            "/tmp/dpv-test.log",
        ])
        .expect("arguments should parse");
        let mut config = Config::default();
        apply_cli_overrides(&mut config, &cli);

        assert_eq!(config.documents.full, PathBuf::from("cv.pdf"));
        assert_eq!(config.documents.condensed, PathBuf::from("cv_short.pdf"));
        assert_eq!(config.documents.initial, DocumentVariant::Condensed);
        assert_eq!(config.log.file, Some(PathBuf::from("/tmp/dpv-test.log")));
    }

    #[test]
    fn missing_arguments_keep_config_values() {
        let cli = Cli::try_parse_from(["dpv", "-v"]).expect("arguments should parse");
        let mut config = Config::default();
        apply_cli_overrides(&mut config, &cli);

        assert!(cli.verbose);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn unknown_variant_is_rejected() {
        assert!(Cli::try_parse_from(["dpv", "--variant", "tiny"]).is_err());
    }
}
