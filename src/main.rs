use clap::Parser;
use rural_advisor::core::ConfigProvider;
use rural_advisor::utils::error::{AdvisorError, ErrorSeverity};
use rural_advisor::utils::{logger, validation::Validate};
use rural_advisor::{AppState, CliConfig, TomlConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 檔不存在時直接略過
    dotenv::dotenv().ok();

    let cli = CliConfig::parse();

    let result = match cli.config.clone() {
        Some(path) => {
            let config = match TomlConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            };
            init_logging(cli.json_logs || config.json_logs(), cli.verbose);
            tracing::info!("📁 Loaded configuration from: {}", path);
            run(config).await
        }
        None => {
            init_logging(cli.json_logs, cli.verbose);
            run(cli).await
        }
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Advisor server failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low | ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

fn init_logging(json: bool, verbose: bool) {
    if json {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }
}

async fn run<C: ConfigProvider + Validate>(config: C) -> Result<(), AdvisorError> {
    tracing::info!("Starting rural-advisor");

    config.validate()?;
    tracing::info!(
        model = config.model(),
        api_base = config.api_base(),
        "✅ Configuration validated"
    );

    let state = AppState::from_config(&config)?;
    let listener = TcpListener::bind(config.server_addr()).await?;
    rural_advisor::api::serve(listener, state).await
}
