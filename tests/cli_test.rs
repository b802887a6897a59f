use anyhow::Result;
use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

fn timestream(args: &[&str]) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_timestream"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()?;
    Ok(output)
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_bounded_range_prints_points() -> Result<()> {
    let output = timestream(&[
        "--from",
        "2024-01-01T00:00:00",
        "--to-offset",
        "2",
        "--offset-unit",
        "seconds",
    ])?;

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec![
            "2024-01-01 00:00:00",
            "2024-01-01 00:00:01",
            "2024-01-01 00:00:02",
        ]
    );
    Ok(())
}

#[test]
fn test_backward_range_with_format() -> Result<()> {
    let output = timestream(&[
        "--from",
        "2024-01-01T00:00:00",
        "--until",
        "2023-12-31T23:59:56",
        "--every",
        "2",
        "--format",
        "%H:%M:%S",
    ])?;

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["00:00:00", "23:59:58"]);
    Ok(())
}

#[test]
fn test_json_output_quotes_points() -> Result<()> {
    let output = timestream(&[
        "--from",
        "2024-01-01T00:00:00",
        "--every-ms",
        "1500",
        "--limit",
        "2",
        "--json",
    ])?;

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["\"2024-01-01T00:00:00\"", "\"2024-01-01T00:00:01.500\""]
    );
    Ok(())
}

#[test]
fn test_unbounded_without_limit_is_refused() -> Result<()> {
    let output = timestream(&["--from", "2024-01-01T00:00:00"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn test_zero_step_exits_with_range_error() -> Result<()> {
    let output = timestream(&["--from", "2024-01-01T00:00:00", "--every", "0", "--limit", "3"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn test_offset_format_is_rejected() -> Result<()> {
    let output = timestream(&[
        "--from",
        "2024-01-01T00:00:00",
        "--to-offset",
        "1",
        "--offset-unit",
        "seconds",
        "--format",
        "%H:%M %z",
    ])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn test_config_file_with_output_override() -> Result<()> {
    let mut config = NamedTempFile::new()?;
    config.write_all(
        br#"
[range]
from = "2024-01-01T00:00:00"

[range.every]
amount = 1
unit = "days"

[output]
limit = 10
format = "%Y-%m-%d"
"#,
    )?;
    config.flush()?;

    let path = config.path().to_string_lossy().to_string();
    let output = timestream(&["--config", &path, "--limit", "2"])?;

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["2024-01-01", "2024-01-02"]);
    Ok(())
}

#[test]
fn test_range_flags_with_config_file_are_rejected() -> Result<()> {
    let output = timestream(&["--config", "range.toml", "--every", "5"])?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    Ok(())
}
