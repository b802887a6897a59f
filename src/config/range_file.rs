use crate::core::{BoundaryPolicy, RangeBuilder, Unit};
use crate::utils::error::{Result, TimeStreamError};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_required_field, Validate,
};
use chrono::format::{Item, StrftimeItems};
use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::Path;

/// 以 TOML 描述的時間範圍
///
/// ```toml
/// [range]
/// from = "2024-01-01T00:00:00"
///
/// [range.boundary]
/// policy = "exclusive"
/// amount = 3
/// unit = "seconds"
///
/// [range.every]
/// duration_ms = 1500
///
/// [output]
/// limit = 10
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RangeFile {
    #[serde(default)]
    pub range: RangeSection,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RangeSection {
    /// ISO-8601 本地時間，或 "now"
    pub from: Option<String>,
    pub boundary: Option<BoundaryConfig>,
    pub every: Option<StepConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoundaryConfig {
    pub policy: Option<BoundaryPolicy>, // 預設 inclusive
    pub at: Option<String>,
    pub amount: Option<i64>,
    pub unit: Option<Unit>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepConfig {
    pub amount: Option<i64>,
    pub unit: Option<Unit>,
    pub duration_ms: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub limit: Option<usize>,
    pub format: Option<String>, // strftime 格式
    pub json: Option<bool>,
}

impl RangeFile {
    /// 從 TOML 檔案載入範圍配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析範圍配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TimeStreamError::ConfigParse {
            message: format!("Range TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${START_AT})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TimeStreamError::ConfigParse {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 依配置建立 builder，所有檢查都在這裡同步完成
    pub fn to_builder(&self) -> Result<RangeBuilder<NaiveDateTime>> {
        let from = validate_required_field("range.from", &self.range.from)?;
        let mut builder = RangeBuilder::new(parse_instant("range.from", from)?);

        if let Some(boundary) = &self.range.boundary {
            builder = boundary.apply(builder)?;
        }
        if let Some(every) = &self.range.every {
            builder = every.apply(builder)?;
        }
        Ok(builder)
    }

    pub fn output(&self) -> OutputConfig {
        self.output.clone().unwrap_or_default()
    }
}

impl BoundaryConfig {
    fn apply(&self, builder: RangeBuilder<NaiveDateTime>) -> Result<RangeBuilder<NaiveDateTime>> {
        let policy = self.policy.unwrap_or(BoundaryPolicy::Inclusive);
        match (&self.at, self.amount) {
            (Some(at), None) => {
                let end = parse_instant("range.boundary.at", at)?;
                Ok(match policy {
                    BoundaryPolicy::Inclusive => builder.to(end),
                    BoundaryPolicy::Exclusive => builder.until(end),
                })
            }
            (None, Some(amount)) => match policy {
                BoundaryPolicy::Inclusive => builder.to_offset_checked(amount, self.unit),
                BoundaryPolicy::Exclusive => builder.until_offset_checked(amount, self.unit),
            },
            (Some(at), Some(amount)) => Err(TimeStreamError::InvalidConfigValue {
                field: "range.boundary".to_string(),
                value: format!("at = {}, amount = {}", at, amount),
                reason: "Use either 'at' or 'amount', not both".to_string(),
            }),
            (None, None) => Err(TimeStreamError::missing("range.boundary.at")),
        }
    }
}

impl StepConfig {
    fn apply(&self, builder: RangeBuilder<NaiveDateTime>) -> Result<RangeBuilder<NaiveDateTime>> {
        match (self.amount, self.duration_ms) {
            (Some(amount), None) => builder.every_checked(amount, self.unit),
            (None, Some(ms)) => {
                let delta = TimeDelta::try_milliseconds(ms).ok_or_else(|| {
                    TimeStreamError::InvalidConfigValue {
                        field: "range.every.duration_ms".to_string(),
                        value: ms.to_string(),
                        reason: "Duration is out of range".to_string(),
                    }
                })?;
                builder.every_duration(delta)
            }
            (Some(amount), Some(ms)) => Err(TimeStreamError::InvalidConfigValue {
                field: "range.every".to_string(),
                value: format!("amount = {}, duration_ms = {}", amount, ms),
                reason: "Use either 'amount' or 'duration_ms', not both".to_string(),
            }),
            (None, None) => Err(TimeStreamError::missing("range.every.amount")),
        }
    }
}

/// 解析 ISO-8601 本地時間；只有日期時視為當天零點
pub fn parse_instant(field_name: &str, text: &str) -> Result<NaiveDateTime> {
    validate_non_empty_string(field_name, text)?;
    let text = text.trim();
    if text.eq_ignore_ascii_case("now") {
        return Ok(Local::now().naive_local());
    }
    if let Ok(instant) = text.parse::<NaiveDateTime>() {
        return Ok(instant);
    }
    text.parse::<NaiveDate>()
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
        .map_err(|e| TimeStreamError::InvalidConfigValue {
            field: field_name.to_string(),
            value: text.to_string(),
            reason: format!("Expected an ISO-8601 date-time or 'now': {}", e),
        })
}

pub fn validate_format(field_name: &str, format: &str) -> Result<()> {
    validate_non_empty_string(field_name, format)?;
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(TimeStreamError::InvalidConfigValue {
            field: field_name.to_string(),
            value: format.to_string(),
            reason: "Invalid strftime format".to_string(),
        });
    }
    // 時區欄位 (%z、%Z) 對本地時間沒有意義，實際渲染一次才會發現
    render_point(field_name, format, &NaiveDateTime::default())?;
    Ok(())
}

/// 以 strftime 格式輸出單一時間點，格式無法套用時回傳錯誤而非 panic
pub fn render_point(field_name: &str, format: &str, point: &NaiveDateTime) -> Result<String> {
    let mut rendered = String::new();
    write!(rendered, "{}", point.format(format)).map_err(|_| {
        TimeStreamError::InvalidConfigValue {
            field: field_name.to_string(),
            value: format.to_string(),
            reason: "Format cannot be applied to a local date-time".to_string(),
        }
    })?;
    Ok(rendered)
}

impl Validate for RangeFile {
    fn validate(&self) -> Result<()> {
        let output = self.output();
        if let Some(limit) = output.limit {
            validate_positive_number("output.limit", limit, 1)?;
        }
        if let Some(format) = &output.format {
            validate_format("output.format", format)?;
        }
        Ok(())
    }
}
