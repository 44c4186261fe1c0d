use clap::Parser;
use form_gate::config::cli::parse_input_line;
use form_gate::utils::{logger, validation::Validate};
use form_gate::{
    CliConfig, FieldStatus, FormConfig, FormObserver, FormSession, FormState, RegistrationForm,
    Registration,
};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

/// 把表單狀態印到 stdout
struct ConsoleObserver {
    json: bool,
}

impl FormObserver for ConsoleObserver {
    fn on_form_state_changed(&mut self, state: &FormState) {
        if self.json {
            match serde_json::to_string(state) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::error!("❌ Failed to serialize form state: {}", e),
            }
        } else {
            let mut fields: Vec<_> = state.fields.iter().collect();
            fields.sort();
            println!("valid={} fields={:?}", state.is_valid, fields);
        }

        if let Some(registration) = Registration::from_state(state) {
            tracing::info!("✅ Registration fields have validated: {:?}", registration);
        }
    }

    fn on_field_status(&mut self, field: &str, status: FieldStatus) {
        tracing::debug!("🔎 {} -> {:?}", field, status);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match FormConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 {}", e.recovery_suggestion());
                    std::process::exit(1);
                }
            }
        }
        None => FormConfig::registration(),
    };

    // 應用命令列覆蓋設定
    if let Some(debounce_ms) = args.debounce_ms {
        config.form.debounce_ms = Some(debounce_ms);
        tracing::info!("🔧 Debounce overridden to: {}ms", debounce_ms);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if args.dry_run {
        display_config_summary(&config);
        return Ok(());
    }

    let form = RegistrationForm::new(&config)?;
    let handle = FormSession::spawn(form, ConsoleObserver { json: args.json });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        match parse_input_line(line) {
            Some((field, text)) => {
                if let Err(e) = handle.text_changed(field, text) {
                    eprintln!("❌ {}", e.user_friendly_message());
                }
            }
            None => eprintln!("⚠️ Expected `Field=value`, got: {}", line),
        }
    }

    // 輸入結束：等最後一個去抖動計時器觸發後再關閉
    tokio::time::sleep(config.debounce_interval() + Duration::from_millis(50)).await;
    handle.shutdown().await?;

    Ok(())
}

fn display_config_summary(config: &FormConfig) {
    println!("📋 Form: {}", config.form.name);
    println!("⏱️ Debounce: {:?}", config.debounce_interval());
    println!("🌱 Emit initial: {}", config.emit_initial());
    for field in &config.fields {
        println!("  • {} => {}", field.name, field.pattern);
    }
}
