use clap::Parser;
use garage_catalog::adapters::terminal::{TextOverlay, TextSurface};
use garage_catalog::core::Storage;
use garage_catalog::utils::error::{CatalogError, ErrorSeverity};
use garage_catalog::utils::{logger, validation::Validate};
use garage_catalog::{
    source_from_config, CatalogLoader, CatalogSettings, CliConfig, GarageSession, LoadOutcome,
    LocalStorage, TomlConfig,
};

fn report_and_exit(e: &CatalogError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚗 Starting garage-catalog");
    tracing::debug!("CLI config: {:?}", cli);

    let file_config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let config = TomlConfig::from_file(path).unwrap_or_else(|e| report_and_exit(&e));
            if let Err(e) = config.validate() {
                report_and_exit(&e);
            }
            Some(config)
        }
        None => None,
    };

    // 驗證配置
    let settings = CatalogSettings::from_cli(&cli, file_config.as_ref())
        .and_then(|settings| settings.validate().map(|_| settings))
        .unwrap_or_else(|e| report_and_exit(&e));

    let source = source_from_config(&settings).unwrap_or_else(|e| report_and_exit(&e));
    let loader = CatalogLoader::from_config(source, &settings);

    let mut session = GarageSession::new();
    match session.load_from(&loader).await {
        Ok(LoadOutcome::Applied { warehouses, skipped }) => {
            tracing::info!("✅ Loaded {} warehouses", warehouses);
            if skipped > 0 {
                eprintln!("⚠️  Skipped {} malformed vehicle records", skipped);
            }
        }
        Ok(LoadOutcome::Discarded) => {
            tracing::warn!("Load result discarded");
            return Ok(());
        }
        Err(e) => report_and_exit(&e),
    }

    if let Some(spec) = settings.sort {
        let tabs: Vec<usize> = match settings.tab {
            Some(tab) => vec![tab],
            None => (0..session.warehouses().len()).collect(),
        };
        for tab in tabs {
            if let Err(e) = session.apply_spec(tab, spec) {
                report_and_exit(&e);
            }
        }
    }

    if let Some(vehicle_id) = &cli.details {
        let tab = settings.tab.unwrap_or(0);
        let mut overlay = TextOverlay::default();
        if let Err(e) = session.open_details(tab, vehicle_id, &mut overlay) {
            report_and_exit(&e);
        }
        if let Some(content) = overlay.content() {
            println!("{}", content);
        }
        session.close_details(&mut overlay);
        return Ok(());
    }

    let mut surface = TextSurface::new(settings.format);
    session.render(&mut surface);
    let rendered = surface.take_output().unwrap_or_else(|e| report_and_exit(&e));

    match &settings.output {
        Some(path) => {
            let storage = LocalStorage::new(String::new());
            if let Err(e) = storage.write_file(path, rendered.as_bytes()).await {
                report_and_exit(&e);
            }
            tracing::info!("📁 Output saved to: {}", path);
            println!("📁 Output saved to: {}", path);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
