use anyhow::Context;
use chrono::Datelike;
use clap::Parser;
use saju_reader::app::loading::{LoadingTicker, ROTATE_INTERVAL};
use saju_reader::app::report::{render_error_panel, render_report, Style};
use saju_reader::utils::{logger, validation::Validate};
use saju_reader::{AnalysisOrchestrator, AnalysisSession, AppConfig, CliArgs, GeminiClient, SessionState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }
    tracing::info!("Starting saju-reader");
    tracing::debug!("CLI args: {:?}", args);

    let config = match args.config_path() {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            AppConfig::from_file(&path)
                .with_context(|| format!("failed to load config file '{}'", path.display()))?
        }
        None => AppConfig::default(),
    };

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let input = args.to_user_input(chrono::Local::now().year());
    if let Err(e) = input.validate() {
        tracing::error!("Input validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    // Read once. The orchestrator rejects a missing key before the client is
    // ever called, so the client's empty placeholder never reaches the wire.
    let api_key = config.resolve_api_key();
    let client = GeminiClient::new(
        config.api.base_url.clone(),
        api_key.as_deref().unwrap_or_default(),
        config.request_timeout(),
    )?;
    let orchestrator =
        AnalysisOrchestrator::new(client, api_key).with_model(config.api.model.clone());
    let session = AnalysisSession::new(orchestrator);

    let style = Style::for_topic(input.topic, config.output.color && !args.no_color);
    let topic = input.topic;

    let ticker = config
        .output
        .loading_messages
        .then(|| LoadingTicker::spawn(ROTATE_INTERVAL, |message| eprintln!("⏳ {}", message)));
    let outcome = session.submit(input).await;
    drop(ticker);

    match session.state().await {
        SessionState::Ready(result) => {
            tracing::info!(
                "Analysis completed ({} monthly records)",
                result.monthly_luck.len()
            );
            println!("{}", render_report(&result, topic, &style));
            Ok(())
        }
        SessionState::Failed(message) => {
            eprintln!("{}", render_error_panel(&message, &style));
            tracing::debug!("Submission outcome: {:?}", outcome);
            std::process::exit(session.error_exit_code().await.unwrap_or(1));
        }
        SessionState::Idle | SessionState::Loading => {
            tracing::warn!("Analysis finished without a result ({:?})", outcome);
            Ok(())
        }
    }
}
