use serde::{Deserialize, Serialize};

/// Summary of an extracted DT sequence, all values in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DtStatistics {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
}

impl DtStatistics {
    /// Returns `None` for an empty sequence.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let (&first, rest) = values.split_first()?;

        let mut stats = Self {
            count: values.len(),
            mean: 0.0,
            min: first,
            max: first,
            sum: first,
        };

        for &value in rest {
            stats.sum += value;
            stats.min = stats.min.min(value);
            stats.max = stats.max.max(value);
        }

        stats.mean = stats.sum / stats.count as f64;
        Some(stats)
    }
}
