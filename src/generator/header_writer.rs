use crate::config::GenerateConfig;
use crate::error::{DtExtractError, Result};
use std::fs;
use std::path::Path;

/// Digits after the decimal point for every array value. Downstream firmware
/// tests compare against this exact text, so it is not configurable.
pub const VALUE_PRECISION: usize = 6;

/// Renders a DT sequence as a C++ header:
///
/// ```text
/// // Auto-generated test data
/// // Total impulses: 2
///
/// #pragma once
///
/// const double test_dt_values[] = {
///     0.018456, 0.020000,
/// };
///
/// const size_t test_dt_count = 2;
/// ```
#[derive(Debug, Clone)]
pub struct HeaderGenerator {
    array_name: String,
    count_name: String,
    values_per_row: usize,
}

impl HeaderGenerator {
    pub fn new() -> Self {
        Self::from_config(&GenerateConfig::default())
    }

    pub fn from_config(config: &GenerateConfig) -> Self {
        Self {
            array_name: config.array_name.clone(),
            count_name: config.count_name.clone(),
            values_per_row: config.values_per_row.max(1),
        }
    }

    pub fn render(&self, values: &[f64]) -> String {
        let mut out = String::new();

        out.push_str("// Auto-generated test data\n");
        out.push_str(&format!("// Total impulses: {}\n\n", values.len()));
        out.push_str("#pragma once\n\n");

        out.push_str(&format!("const double {}[] = {{\n", self.array_name));
        for row in values.chunks(self.values_per_row) {
            out.push_str(&format_row(row));
            out.push('\n');
        }
        out.push_str("};\n\n");

        out.push_str(&format!(
            "const size_t {} = {};\n",
            self.count_name,
            values.len()
        ));

        out
    }

    /// Overwrites `path` with the rendered header.
    pub fn write_to<P: AsRef<Path>>(&self, path: P, values: &[f64]) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.render(values)).map_err(|e| DtExtractError::file_access(path, e))
    }
}

fn format_row(row: &[f64]) -> String {
    let values: Vec<String> = row
        .iter()
        .map(|v| format!("{:.*}", VALUE_PRECISION, v))
        .collect();
    format!("    {},", values.join(", "))
}
