use chrono::{Local, NaiveDate};
use clap::Parser;
use sakinah::config::Command;
use sakinah::core::quotes;
use sakinah::domain::maturity::{classify, PersonInput};
use sakinah::domain::model::ApiResponse;
use sakinah::utils::error::{AppError, ErrorSeverity};
use sakinah::utils::logger::{self, LogFormat};
use sakinah::utils::validation::Validate;
use sakinah::{AppConfig, CliConfig, LocalStorage, RemoteDatabase, SetupService, StatsService};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(cli.verbose, LogFormat::from_flag(cli.json_logs));
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: CliConfig) -> Result<(), AppError> {
    match cli.command {
        Command::Classify {
            birth_date,
            role,
            today,
        } => {
            let today = match today {
                Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|e| {
                    AppError::ValidationError {
                        message: format!("--today must be YYYY-MM-DD: {}", e),
                    }
                })?,
                None => Local::now().date_naive(),
            };
            let input = PersonInput {
                birth_date,
                role: role.into(),
            };
            let result = classify(&input, today);
            tracing::debug!("Classified {:?} as {}", input, result.level);
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Command::NormalizeQuotes { input, output } => {
            let output = output.unwrap_or_else(|| input.clone());
            let (read, written) = quotes::normalize_file(&input, &output).await?;
            println!("✅ {} quotes read, {} written to {}", read, written, output.display());
            Ok(())
        }
        Command::Stats { record_view } => {
            tracing::info!("📁 Loading configuration from: {}", cli.config);
            let config = AppConfig::from_file(&cli.config)?;
            config.validate_stats()?;
            let service = StatsService::new(LocalStorage::new(config.stats_dir()));
            let stats = if record_view {
                service.record_view().await?
            } else {
                service.load().await?
            };
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(())
        }
        Command::PushSchema => print_response(&setup_service(&cli.config)?.push_schema().await),
        Command::SeedQuotes => print_response(&setup_service(&cli.config)?.seed_quotes().await),
        Command::ClearQuotes => print_response(&setup_service(&cli.config)?.clear_quotes().await),
        Command::InitDb => print_response(&setup_service(&cli.config)?.init_database().await),
        Command::CopyLogos => print_response(&setup_service(&cli.config)?.copy_logos().await),
    }
}

fn load_config(path: &str) -> Result<AppConfig, AppError> {
    tracing::info!("📁 Loading configuration from: {}", path);
    let config = AppConfig::from_file(path)?;
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");
    Ok(config)
}

fn setup_service(path: &str) -> Result<SetupService<RemoteDatabase>, AppError> {
    let config = load_config(path)?;
    let db = RemoteDatabase::new(
        &config.database.url,
        config.database.auth_token.clone(),
        config.timeout(),
    )?;
    tracing::debug!("🗄️ Remote database: {}", db.pipeline_url());

    Ok(SetupService::new(
        db,
        LocalStorage::new("."),
        config.quotes_file(),
        config.asset_settings(),
    ))
}

fn print_response(response: &ApiResponse) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(response)?);
    if response.success {
        Ok(())
    } else {
        // 錯誤已經記錄過，這裡只需要非零退出碼
        std::process::exit(1);
    }
}
