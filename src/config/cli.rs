use crate::config::range_file::{
    validate_format, BoundaryConfig, RangeFile, RangeSection, StepConfig,
};
use crate::core::{BoundaryPolicy, Unit};
use crate::utils::error::{Result, TimeStreamError};
use crate::utils::validation::{validate_positive_number, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "timestream")]
#[command(about = "Print a lazily generated range of date-time points")]
pub struct CliConfig {
    /// Path to a TOML range file; output flags given here override the file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Start instant (ISO-8601 local date-time) or "now"
    #[arg(long, conflicts_with = "config")]
    pub from: Option<String>,

    /// Inclusive end instant
    #[arg(long, conflicts_with_all = ["config", "until", "to_offset", "until_offset"])]
    pub to: Option<String>,

    /// Exclusive end instant
    #[arg(long, conflicts_with_all = ["config", "to_offset", "until_offset"])]
    pub until: Option<String>,

    /// Inclusive end as an offset from the start, in --offset-unit
    #[arg(long, allow_hyphen_values = true, conflicts_with_all = ["config", "until_offset"])]
    pub to_offset: Option<i64>,

    /// Exclusive end as an offset from the start, in --offset-unit
    #[arg(long, allow_hyphen_values = true, conflicts_with = "config")]
    pub until_offset: Option<i64>,

    /// Unit of --to-offset / --until-offset
    #[arg(long, conflicts_with = "config")]
    pub offset_unit: Option<Unit>,

    /// Step amount; its sign is ignored
    #[arg(long, allow_hyphen_values = true, conflicts_with_all = ["config", "every_ms"])]
    pub every: Option<i64>,

    #[arg(long, default_value = "seconds", conflicts_with = "config")]
    pub every_unit: Unit,

    /// Step as a duration in milliseconds
    #[arg(long, allow_hyphen_values = true, conflicts_with = "config")]
    pub every_ms: Option<i64>,

    /// Stop after this many points (required for unbounded ranges)
    #[arg(long)]
    pub limit: Option<usize>,

    /// strftime format for each point
    #[arg(long)]
    pub format: Option<String>,

    /// Print each point as a JSON string
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// 將命令列參數轉成範圍配置；有 --config 時範圍只來自檔案，輸出旗標仍可覆寫
    pub fn to_range_file(&self) -> Result<RangeFile> {
        let mut file = match &self.config {
            Some(path) => {
                tracing::debug!("Loading range configuration from: {}", path);
                RangeFile::from_file(path)?
            }
            None => RangeFile {
                range: self.range_section(),
                output: None,
            },
        };

        let mut output = file.output();
        if self.limit.is_some() {
            output.limit = self.limit;
        }
        if self.format.is_some() {
            output.format = self.format.clone();
        }
        if self.json {
            output.json = Some(true);
        }
        file.output = Some(output);
        Ok(file)
    }

    fn range_section(&self) -> RangeSection {
        RangeSection {
            from: Some(self.from.clone().unwrap_or_else(|| "now".to_string())),
            boundary: self.boundary(),
            every: self.step(),
        }
    }

    fn boundary(&self) -> Option<BoundaryConfig> {
        let (policy, at, amount) = if let Some(to) = &self.to {
            (BoundaryPolicy::Inclusive, Some(to.clone()), None)
        } else if let Some(until) = &self.until {
            (BoundaryPolicy::Exclusive, Some(until.clone()), None)
        } else if let Some(amount) = self.to_offset {
            (BoundaryPolicy::Inclusive, None, Some(amount))
        } else if let Some(amount) = self.until_offset {
            (BoundaryPolicy::Exclusive, None, Some(amount))
        } else {
            return None;
        };
        Some(BoundaryConfig {
            policy: Some(policy),
            at,
            amount,
            unit: self.offset_unit,
        })
    }

    fn step(&self) -> Option<StepConfig> {
        if let Some(amount) = self.every {
            Some(StepConfig {
                amount: Some(amount),
                unit: Some(self.every_unit),
                duration_ms: None,
            })
        } else {
            self.every_ms.map(|ms| StepConfig {
                amount: None,
                unit: None,
                duration_ms: Some(ms),
            })
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(limit) = self.limit {
            validate_positive_number("limit", limit, 1)?;
        }
        if let Some(format) = &self.format {
            validate_format("format", format)?;
        }
        // 只有偏移量邊界會用到 --offset-unit
        if let Some(unit) = self.offset_unit {
            if self.to_offset.is_none() && self.until_offset.is_none() {
                return Err(TimeStreamError::InvalidConfigValue {
                    field: "offset_unit".to_string(),
                    value: unit.to_string(),
                    reason: "--offset-unit only applies to --to-offset or --until-offset"
                        .to_string(),
                });
            }
        }
        Ok(())
    }
}
