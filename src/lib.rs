pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod generator;
pub mod stats;
pub mod ui;

// Public API re-exports
pub use cli::{derive_output_path, Cli, ParseOutcome};
pub use config::{Config, ExtractConfig, GenerateConfig, OutputConfig};
pub use error::{DtExtractError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{DtExtractor, Extraction};
pub use generator::HeaderGenerator;
pub use stats::DtStatistics;
pub use ui::{OutputFormatter, OutputMode};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Summary of one successful conversion.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub input_file: String,
    pub output_file: String,
    pub lines_scanned: usize,
    pub statistics: DtStatistics,
    pub generated_at: DateTime<Utc>,
    pub duration: Duration,
}

/// Main library interface: log in, header out.
pub struct DtExtract {
    extractor: DtExtractor,
    generator: HeaderGenerator,
    output_formatter: OutputFormatter,
}

impl DtExtract {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let extractor = DtExtractor::with_marker(config.extract.marker.clone())?;
        let generator = HeaderGenerator::from_config(&config.generate);
        let output_formatter = OutputFormatter::new(
            OutputMode::from_string(&config.output.mode),
            config.output.verbose,
        );

        Ok(Self {
            extractor,
            generator,
            output_formatter,
        })
    }

    /// Extract values from `log_file`, print statistics and write the header
    /// next to it. Nothing is written when the log holds no values.
    pub fn run(&self, log_file: &str) -> Result<RunReport> {
        let start_time = Instant::now();

        self.output_formatter.start_operation(&format!(
            "Extracting {} values from {}...",
            self.extractor.marker().to_lowercase(),
            log_file
        ));

        let extraction = self.extractor.scan_file(log_file)?;
        self.output_formatter.debug(&format!(
            "Scanned {} lines ({} without a value)",
            extraction.lines_scanned,
            extraction.lines_skipped()
        ));

        let statistics =
            DtStatistics::from_values(&extraction.values).ok_or_else(|| {
                DtExtractError::NoValuesFound {
                    path: log_file.to_string(),
                    marker: self.extractor.marker().to_string(),
                }
            })?;

        self.output_formatter
            .info(&format!("Found {} impulses", statistics.count));
        self.output_formatter.print_statistics(&statistics);

        let output_file = derive_output_path(log_file);
        if output_file == log_file {
            self.output_formatter.warning(&format!(
                "{} has no .log suffix; it will be overwritten by the header",
                log_file
            ));
        }

        self.output_formatter
            .start_operation(&format!("Generating {}...", output_file));
        self.generator.write_to(&output_file, &extraction.values)?;

        Ok(RunReport {
            input_file: log_file.to_string(),
            output_file,
            lines_scanned: extraction.lines_scanned,
            statistics,
            generated_at: Utc::now(),
            duration: start_time.elapsed(),
        })
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &DtExtractError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn quiet_app() -> DtExtract {
        let mut config = Config::default();
        config.output.verbose = 0;
        DtExtract::new(config).unwrap()
    }

    fn path_str(path: &std::path::Path) -> String {
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_run_writes_header_next_to_log() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("sample.log");
        fs::write(&log_path, "DT,0.018456\nnoise\nDT,0.020000\n").unwrap();

        let report = quiet_app().run(&path_str(&log_path)).unwrap();

        let header_path = temp_dir.path().join("sample_test_data.h");
        assert_eq!(report.output_file, path_str(&header_path));
        assert_eq!(report.lines_scanned, 3);
        assert_eq!(report.statistics.count, 2);
        assert_eq!(report.statistics.min, 0.018456);
        assert_eq!(report.statistics.max, 0.02);

        let header = fs::read_to_string(header_path).unwrap();
        assert!(header.contains("const size_t test_dt_count = 2;"));
        assert!(header.contains("    0.018456, 0.020000,\n"));
    }

    #[test]
    fn test_run_without_values_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("empty.log");
        fs::write(&log_path, "boot\nno data here\n").unwrap();

        let err = quiet_app().run(&path_str(&log_path)).unwrap_err();

        assert!(matches!(err, DtExtractError::NoValuesFound { .. }));
        assert!(!temp_dir.path().join("empty_test_data.h").exists());
    }

    #[test]
    fn test_run_missing_log() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("missing.log");

        let err = quiet_app().run(&path_str(&log_path)).unwrap_err();
        assert!(matches!(err, DtExtractError::FileAccess { .. }));
    }

    #[test]
    fn test_run_without_log_suffix_overwrites_input() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("capture.txt");
        fs::write(&log_path, "DT,0.5\n").unwrap();

        let report = quiet_app().run(&path_str(&log_path)).unwrap();
        assert_eq!(report.output_file, path_str(&log_path));

        let content = fs::read_to_string(&log_path).unwrap();
        assert!(content.starts_with("// Auto-generated test data\n"));
    }

    #[test]
    fn test_configured_names_reach_header() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("row.log");
        fs::write(&log_path, "TICK,1.25\nDT,9.0\n").unwrap();

        let mut config = Config::default();
        config.output.verbose = 0;
        config.extract.marker = "TICK".to_string();
        config.generate.array_name = "tick_values".to_string();
        config.generate.count_name = "tick_count".to_string();

        let app = DtExtract::new(config).unwrap();
        app.run(&path_str(&log_path)).unwrap();

        let header = fs::read_to_string(temp_dir.path().join("row_test_data.h")).unwrap();
        assert!(header.contains("const double tick_values[] = {\n    1.250000,\n};"));
        assert!(header.contains("const size_t tick_count = 1;"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = Config::default();
        config.generate.values_per_row = 0;
        assert!(matches!(
            DtExtract::new(config),
            Err(DtExtractError::Config { .. })
        ));
    }

    #[test]
    fn test_run_report_serializes() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("json.log");
        fs::write(&log_path, "DT,0.1\nDT,0.3\n").unwrap();

        let report = quiet_app().run(&path_str(&log_path)).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["statistics"]["count"], 2);
        assert!(json["output_file"]
            .as_str()
            .unwrap()
            .ends_with("json_test_data.h"));
    }
}
