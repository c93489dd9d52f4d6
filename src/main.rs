//! scenario-report CLI entry point.
//!
//! This binary provides the command-line interface for scenario-report.

use clap::Parser;
use scenario_report::cli::{Cli, Commands};
use scenario_report::config::DEFAULT_CONFIG_FILES;
use scenario_report::reporter::{write_image_assets, Reporter};
use scenario_report::{Config, ReportError, ReportLoader};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            eprintln!("Error: {e}");

            // Print error chain (cause chain)
            let mut chain = e.chain().skip(1).peekable();
            if chain.peek().is_some() {
                eprintln!("\nCaused by:");
                for (i, cause) in chain.enumerate() {
                    eprintln!("  {i}: {cause}");
                }
            }

            let code = e
                .downcast_ref::<ReportError>()
                .map_or(1, ReportError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        // RUST_LOG wins over the verbose flag
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let base_level = match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            };
            // scenario_report at the requested level, everything else at warn
            EnvFilter::new(format!("warn,scenario_report={base_level}"))
        })
    };

    // stdout may carry the rendered report
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Render(args) => {
            tracing::debug!("Executing render command");
            let mut config = load_config(cli.config.as_deref())?;
            config.merge_cli_args(&args);

            let loaded = ReportLoader::new().load(&args.paths, args.run_results.as_deref())?;
            let reporter = Reporter::new(&config)?;
            let html = reporter.render_html(&loaded.features, &loaded.run_results)?;

            if let Some(output_path) = args.output {
                if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                // The report is only written once every image asset decoded
                if config.output.write_images {
                    let base = output_path.parent().unwrap_or_else(|| Path::new(""));
                    write_image_assets(&loaded.features, &base.join(&config.output.images_dir))?;
                }

                std::fs::write(&output_path, &html)?;
                tracing::info!(path = %output_path.display(), "Report written");

                if !cli.quiet {
                    let summary = loaded.summary();
                    println!(
                        "Report written to {} ({} features, {} scenarios)",
                        output_path.display(),
                        summary.features,
                        summary.scenarios
                    );
                }
            } else {
                if config.output.write_images {
                    tracing::debug!("Report written to stdout, skipping image assets");
                }
                println!("{html}");
            }

            Ok(ExitCode::SUCCESS)
        }

        Commands::Summary(args) => {
            tracing::debug!("Executing summary command");
            let config = load_config(cli.config.as_deref())?;
            let loaded = ReportLoader::new().load(&args.paths, args.run_results.as_deref())?;
            let reporter = Reporter::new(&config)?;

            if !cli.quiet {
                println!("{}", reporter.render_text(&loaded.features, &loaded.run_results));
            }

            // Exit 2 when any feature failed
            if loaded.summary().has_failures() {
                Ok(ExitCode::from(2))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }

        Commands::Init => {
            let config_path = Path::new(DEFAULT_CONFIG_FILES[0]);
            if config_path.exists() {
                anyhow::bail!("Configuration file already exists: {}", config_path.display());
            }

            std::fs::write(config_path, Config::example_yaml())?;
            println!("Created example configuration: {}", config_path.display());
            Ok(ExitCode::SUCCESS)
        }

        Commands::Validate(args) => {
            let config_content = std::fs::read_to_string(&args.file)?;
            match Config::from_yaml(&config_content) {
                Ok(_) => {
                    println!("Configuration is valid: {}", args.file.display());
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("Configuration error: {e}");
                    Ok(ExitCode::from(1))
                }
            }
        }
    }
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    tracing::debug!("Loading configuration");
    if let Some(config_path) = explicit {
        tracing::debug!(path = %config_path.display(), "Loading configuration from explicit path");
        let content = std::fs::read_to_string(config_path)?;
        return Ok(Config::from_yaml(&content)?);
    }

    tracing::debug!("Searching for default configuration files");
    for path in DEFAULT_CONFIG_FILES {
        if Path::new(path).exists() {
            tracing::debug!(path = %path, "Found configuration file");
            let content = std::fs::read_to_string(path)?;
            return Ok(Config::from_yaml(&content)?);
        }
    }

    tracing::debug!("No configuration file found, using default configuration");
    Ok(Config::default())
}
