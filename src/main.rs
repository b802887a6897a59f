use clap::Parser;
use std::io::{BufWriter, Write};
use timestream::config::range_file::render_point;
use timestream::utils::{logger, validation::Validate};
use timestream::{CliConfig, Result, TimeStreamError};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting timestream CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match run(&config) {
        Ok(count) => {
            tracing::info!("✅ Printed {} points", count);
        }
        Err(e) => {
            tracing::error!("❌ timestream failed: {} (Category: {:?})", e, e.category());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(config: &CliConfig) -> Result<usize> {
    config.validate()?;

    let file = config.to_range_file()?;
    file.validate()?;

    let range = file.to_builder()?.build();
    let output = file.output();

    // 無邊界的範圍必須指定上限，否則會永遠輸出
    if !range.is_bounded() && output.limit.is_none() {
        return Err(TimeStreamError::InvalidConfigValue {
            field: "limit".to_string(),
            value: "none".to_string(),
            reason: "An unbounded range needs --limit".to_string(),
        });
    }

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut count = 0;
    for point in range.iter().take(output.limit.unwrap_or(usize::MAX)) {
        if output.json.unwrap_or(false) {
            writeln!(out, "{}", serde_json::to_string(&point)?)?;
        } else if let Some(format) = &output.format {
            writeln!(out, "{}", render_point("format", format, &point)?)?;
        } else {
            writeln!(out, "{}", point)?;
        }
        count += 1;
    }
    out.flush()?;

    Ok(count)
}
