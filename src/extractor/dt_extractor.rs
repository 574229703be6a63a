use crate::error::{DtExtractError, Result};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const DEFAULT_MARKER: &str = "DT";

/// Values pulled from one log, plus bookkeeping for diagnostics.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub values: Vec<f64>,
    pub lines_scanned: usize,
}

impl Extraction {
    fn new() -> Self {
        Self {
            values: Vec::new(),
            lines_scanned: 0,
        }
    }

    pub fn lines_skipped(&self) -> usize {
        self.lines_scanned - self.values.len()
    }
}

/// Finds `<marker>,<decimal>` records in log lines.
///
/// Only the first match on a line counts. Lines without a match are skipped
/// silently, including lines where the marker is followed by something that
/// is not a number.
#[derive(Debug, Clone)]
pub struct DtExtractor {
    marker: String,
    pattern: Regex,
}

impl DtExtractor {
    pub fn new() -> Result<Self> {
        Self::with_marker(DEFAULT_MARKER)
    }

    pub fn with_marker<S: Into<String>>(marker: S) -> Result<Self> {
        let marker = marker.into();
        // ASCII digits with at most one decimal point: "12", "12.", "12.5", ".5"
        let pattern = Regex::new(&format!(
            r"{},([0-9]+(?:\.[0-9]*)?|\.[0-9]+)",
            regex::escape(&marker)
        ))?;

        Ok(Self { marker, pattern })
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn extract_line(&self, line: &str) -> Option<f64> {
        let captures = self.pattern.captures(line)?;
        captures.get(1)?.as_str().parse().ok()
    }

    pub fn scan<R: BufRead>(&self, reader: R) -> std::io::Result<Extraction> {
        let mut extraction = Extraction::new();

        for line in reader.lines() {
            let line = line?;
            extraction.lines_scanned += 1;

            if let Some(value) = self.extract_line(&line) {
                extraction.values.push(value);
            }
        }

        Ok(extraction)
    }

    pub fn extract_from_reader<R: BufRead>(&self, reader: R) -> std::io::Result<Vec<f64>> {
        Ok(self.scan(reader)?.values)
    }

    pub fn scan_file<P: AsRef<Path>>(&self, path: P) -> Result<Extraction> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DtExtractError::file_access(path, e))?;

        self.scan(BufReader::new(file))
            .map_err(|e| DtExtractError::file_access(path, e))
    }

    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<f64>> {
        Ok(self.scan_file(path)?.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_extract_simple_line() {
        let extractor = DtExtractor::new().unwrap();
        assert_eq!(extractor.extract_line("DT,0.018456"), Some(0.018456));
        assert_eq!(extractor.extract_line("[12:00:01] DT,0.020000 rpm=22"), Some(0.02));
        assert_eq!(extractor.extract_line("DT,42"), Some(42.0));
    }

    #[test]
    fn test_lines_without_marker_are_skipped() {
        let extractor = DtExtractor::new().unwrap();
        assert_eq!(extractor.extract_line("noise"), None);
        assert_eq!(extractor.extract_line(""), None);
        assert_eq!(extractor.extract_line("0.018456"), None);
        assert_eq!(extractor.extract_line("dt,0.5"), None);
        assert_eq!(extractor.extract_line("DT 0.5"), None);
    }

    #[test]
    fn test_marker_without_number_is_skipped() {
        let extractor = DtExtractor::new().unwrap();
        assert_eq!(extractor.extract_line("DT,"), None);
        assert_eq!(extractor.extract_line("DT,abc"), None);
        assert_eq!(extractor.extract_line("DT,."), None);
        assert_eq!(extractor.extract_line("DT,-1.0"), None);
    }

    #[test]
    fn test_first_match_per_line() {
        let extractor = DtExtractor::new().unwrap();
        assert_eq!(extractor.extract_line("DT,1.5 then DT,2.5"), Some(1.5));
    }

    #[test]
    fn test_at_most_one_decimal_point() {
        let extractor = DtExtractor::new().unwrap();
        assert_eq!(extractor.extract_line("DT,1.2.3"), Some(1.2));
        assert_eq!(extractor.extract_line("DT,.25"), Some(0.25));
        assert_eq!(extractor.extract_line("DT,7."), Some(7.0));
    }

    #[test]
    fn test_scan_preserves_order_and_duplicates() {
        let extractor = DtExtractor::new().unwrap();
        let input = "DT,0.3\nnoise\nDT,0.1\nDT,0.3\n\nDT,\n";

        let extraction = extractor.scan(Cursor::new(input)).unwrap();
        assert_eq!(extraction.values, vec![0.3, 0.1, 0.3]);
        assert_eq!(extraction.lines_scanned, 6);
        assert_eq!(extraction.lines_skipped(), 3);
    }

    #[test]
    fn test_only_ascii_digits_count() {
        let extractor = DtExtractor::new().unwrap();
        assert_eq!(extractor.extract_line("DT,\u{0661}\u{0662}"), None);
        assert_eq!(extractor.extract_line("DT,\u{FF11}"), None);
        assert_eq!(extractor.extract_line("DT,1\u{0662} DT,2.5"), Some(1.0));
        assert_eq!(extractor.extract_line("DT,\u{0661} DT,2.5"), Some(2.5));
    }

    #[test]
    fn test_no_false_positives() {
        let extractor = DtExtractor::new().unwrap();
        let input = "rpm,0.5\nDTX,1.0\nD,T,2.0\nstroke 3.0\n";

        let values = extractor.extract_from_reader(Cursor::new(input)).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_custom_marker_is_literal() {
        let extractor = DtExtractor::with_marker("T.X").unwrap();
        assert_eq!(extractor.marker(), "T.X");
        assert_eq!(extractor.extract_line("T.X,3.5"), Some(3.5));
        assert_eq!(extractor.extract_line("TaX,3.5"), None);
    }

    #[test]
    fn test_extract_file() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("sample.log");
        fs::write(&log_path, "DT,0.018456\nnoise\nDT,0.020000\n").unwrap();

        let values = DtExtractor::new().unwrap().extract_file(&log_path).unwrap();
        assert_eq!(values, vec![0.018456, 0.02]);
    }

    #[test]
    fn test_extract_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = DtExtractor::new().unwrap()
            .extract_file(temp_dir.path().join("missing.log"))
            .unwrap_err();

        assert!(matches!(err, DtExtractError::FileAccess { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_a_read_failure() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("binary.log");
        fs::write(&log_path, b"DT,0.5\n\xff\xfe\n").unwrap();

        let err = DtExtractor::new().unwrap().extract_file(&log_path).unwrap_err();
        assert!(matches!(err, DtExtractError::FileAccess { .. }));
    }

    #[test]
    fn test_empty_file_yields_empty_sequence() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("empty.log");
        fs::write(&log_path, "").unwrap();

        assert!(DtExtractor::new().unwrap().extract_file(&log_path).unwrap().is_empty());
    }
}
