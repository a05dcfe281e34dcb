use anyhow::Context;
use rival::{
    AppState, Pipeline, RivalConfig,
    api::routes::build_app,
    cli::{Cli, Commands, analyze, config as config_cmd, output::Output},
    utils::toml_config::{LogFormat, load_dotenv},
};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match run(cli, &output).await {
        Ok(code) => code,
        Err(e) => {
            output.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, output: &Output) -> anyhow::Result<ExitCode> {
    let dotenv = load_dotenv(&cli.config);

    let config = RivalConfig::load(&cli.config)
        .with_context(|| format!("Failed to load configuration from {:?}", cli.config))?;

    init_tracing(&config, cli.verbose);
    match &dotenv {
        Some(path) => info!("Loaded environment from {:?}", path),
        None => warn!("No .env file found, using process environment"),
    }

    match cli.effective_command() {
        Commands::Serve => {
            output.banner();
            serve(config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Analyze { topic, json } => {
            let pipeline = Pipeline::from_config(&config).await?;
            let run = pipeline.run_with_report(topic.as_str()).await;

            if *json {
                println!("{}", analyze::state_json(&run)?);
            } else {
                analyze::print_run(&run, output);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config { validate } => {
            let warnings = config.validate_with_warnings()?;
            if !validate {
                config_cmd::print_config(&config, output);
                output.newline();
            }
            config_cmd::print_warnings(&warnings, output);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Log level comes from `RUST_LOG`, else the configured level (`RIVAL_LOG`
/// is already folded into it); `--verbose` forces debug.
fn init_tracing(config: &RivalConfig, verbose: bool) {
    let fallback = if verbose {
        "debug".to_string()
    } else {
        config.server.log_level.clone()
    };

    let env_filter = if verbose {
        EnvFilter::new(&fallback)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&fallback))
    };

    // stderr keeps `analyze --json` output clean
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    match config.server.log_format {
        LogFormat::Pretty => builder.with_target(false).init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn serve(config: RivalConfig) -> anyhow::Result<()> {
    info!(
        search = ?config.search.provider,
        search_key = if config.search_api_key().is_some() { "set" } else { "unset" },
        llm = ?config.llm.provider,
        llm_key = if config.llm_api_key().is_some() { "set" } else { "unset" },
        model = %config.llm.model,
        "Starting rival server"
    );
    for warning in config.validate_with_warnings()? {
        warn!("{}", warning);
    }

    let pipeline = Pipeline::from_config(&config).await?;
    let address = config.server.address();
    let app = build_app(AppState::new(config, pipeline));

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
