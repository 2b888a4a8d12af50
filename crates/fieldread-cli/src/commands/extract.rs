//! Extract command - infer one field from a single OCR text file.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use fieldread_core::extract::{detect_distance_unit, has_valid_check_digit, DistanceUnit};
use fieldread_core::models::config::OutputConfig;
use fieldread_core::{extract, Candidate, ConfidenceTier, FieldKind, FieldValue, FieldreadConfig};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input text file, or "-" for stdin
    #[arg(default_value = "-")]
    input: String,

    /// Field to extract (default: from config)
    #[arg(short, long, value_enum)]
    kind: Option<KindArg>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Fail when the result needs verification
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum KindArg {
    /// Vehicle Identification Number
    Vin,
    /// Odometer reading
    Mileage,
}

impl From<KindArg> for FieldKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Vin => FieldKind::Vin,
            KindArg::Mileage => FieldKind::Mileage,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

/// What the CLI reports for one piece of OCR text.
#[derive(Debug, Clone, Serialize)]
pub struct FieldReport {
    pub kind: FieldKind,
    pub value: Option<FieldValue>,
    pub confidence: ConfidenceTier,
    pub needs_verification: bool,

    /// VIN only: whether position 9 matches the computed check digit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_digit_valid: Option<bool>,

    /// Mileage only: unit mentioned in the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<DistanceUnit>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_text: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<Candidate>,
}

impl FieldReport {
    /// Run the extraction and collect the report fields the config asks for.
    pub fn build(raw_text: &str, kind: FieldKind, output: &OutputConfig) -> Self {
        let result = extract(raw_text, kind);
        let needs_verification = result.needs_verification(output.verify_below);

        let check_digit_valid = match &result.value {
            Some(FieldValue::Vin(vin)) => Some(has_valid_check_digit(vin)),
            _ => None,
        };
        let unit = match kind {
            FieldKind::Mileage if result.value.is_some() => detect_distance_unit(raw_text),
            _ => None,
        };

        Self {
            kind,
            value: result.value,
            confidence: result.confidence,
            needs_verification,
            check_digit_valid,
            unit,
            normalized_text: output.include_normalized_text.then_some(result.normalized_text),
            candidates: if output.include_candidates {
                result.candidates
            } else {
                Vec::new()
            },
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let kind = resolve_kind(args.kind, &config);

    let text = read_input(&args.input).await?;
    info!("Extracting {} from {} characters of text", kind, text.len());

    let report = FieldReport::build(&text, kind, &config.output);
    let output = format_report(&report, args.format)?;

    if let Some(output_path) = &args.output {
        tokio::fs::write(output_path, &output).await?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    if args.strict && report.needs_verification {
        anyhow::bail!(
            "{} needs verification (confidence: {})",
            kind,
            report.confidence
        );
    }

    Ok(())
}

/// Field kind from the command line, else from config.
pub fn resolve_kind(kind: Option<KindArg>, config: &FieldreadConfig) -> FieldKind {
    kind.map(FieldKind::from)
        .unwrap_or(config.extraction.default_kind)
}

async fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        return Ok(text);
    }

    let path = PathBuf::from(input);
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    Ok(tokio::fs::read_to_string(&path).await?)
}

pub fn format_report(report: &FieldReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_csv(report: &FieldReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "kind",
        "value",
        "confidence",
        "needs_verification",
        "check_digit_valid",
        "unit",
        "candidates",
    ])?;

    wtr.write_record([
        report.kind.as_str(),
        &report.value.as_ref().map(|v| v.to_string()).unwrap_or_default(),
        report.confidence.as_str(),
        &report.needs_verification.to_string(),
        &report.check_digit_valid.map(|v| v.to_string()).unwrap_or_default(),
        report.unit.map(|u| u.symbol()).unwrap_or_default(),
        &report
            .candidates
            .iter()
            .map(Candidate::as_str)
            .collect::<Vec<_>>()
            .join(" "),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &FieldReport) -> String {
    let mut output = String::new();

    let value = report
        .value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "(none)".to_string());

    match report.unit {
        Some(unit) => output.push_str(&format!("{}: {} {}\n", report.kind, value, unit)),
        None => output.push_str(&format!("{}: {}\n", report.kind, value)),
    }
    output.push_str(&format!("Confidence: {}\n", report.confidence));

    if let Some(valid) = report.check_digit_valid {
        let status = if valid { "valid" } else { "invalid" };
        output.push_str(&format!("Check digit: {}\n", status));
    }

    if report.needs_verification {
        output.push_str("Please verify this value or re-capture the image.\n");
    }

    if let Some(text) = &report.normalized_text {
        output.push_str(&format!("Normalized text: {}\n", text));
    }

    if !report.candidates.is_empty() {
        output.push_str("\nCandidates:\n");
        for candidate in &report.candidates {
            output.push_str(&format!("  {}\n", candidate));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vin_report_includes_check_digit() {
        let report = FieldReport::build(
            "VIN 1HGBH41JXMN109186",
            FieldKind::Vin,
            &OutputConfig::default(),
        );

        assert_eq!(report.value, Some(FieldValue::Vin("1HGBH41JXMN109186".into())));
        assert_eq!(report.check_digit_valid, Some(true));
        assert!(!report.needs_verification);
        assert_eq!(report.unit, None);
    }

    #[test]
    fn test_mileage_report_includes_unit() {
        let report = FieldReport::build(
            "Odometer: 123,456 mi",
            FieldKind::Mileage,
            &OutputConfig::default(),
        );

        assert_eq!(report.value, Some(FieldValue::Mileage(123_456)));
        assert_eq!(report.unit, Some(DistanceUnit::Miles));
        assert_eq!(report.check_digit_valid, None);
    }

    #[test]
    fn test_report_respects_output_config() {
        let output = OutputConfig {
            include_candidates: false,
            include_normalized_text: true,
            verify_below: ConfidenceTier::Medium,
        };
        let report = FieldReport::build("99", FieldKind::Mileage, &output);

        assert!(report.candidates.is_empty());
        assert_eq!(report.normalized_text.as_deref(), Some("99"));
        assert!(report.needs_verification);
    }

    #[test]
    fn test_csv_has_header_and_row() {
        let report = FieldReport::build("1 60648 km", FieldKind::Mileage, &OutputConfig::default());
        let csv = format_csv(&report).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("kind,value,confidence"));
        assert_eq!(lines[1], "mileage,160648,high,false,,km,160648");
    }

    #[test]
    fn test_text_format_flags_verification() {
        let report = FieldReport::build("", FieldKind::Vin, &OutputConfig::default());
        let text = format_text(&report);

        assert!(text.contains("vin: (none)"));
        assert!(text.contains("Please verify"));
    }
}
