use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Quick-select values offered on the amount and interest screens.
/// Loaded from an optional `presets.json`; defaults match the built-in
/// pickers (₫500k–₫6M amounts, ₫30k–₫60k monthly fees).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Presets {
    pub amounts: Vec<u64>,
    pub flat_interests: Vec<u64>,
    pub rates: Vec<f64>,
}

impl Default for Presets {
    fn default() -> Self {
        Self {
            amounts: (1..=12).map(|i| i * 500_000).collect(),
            flat_interests: vec![30_000, 40_000, 50_000, 60_000],
            rates: vec![1.0, 2.0, 3.0, 5.0],
        }
    }
}

impl Presets {
    pub fn load() -> Result<Self> {
        Self::load_from("presets.json")
    }

    fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    /// Values for the interest screen in its current mode, rendered the way
    /// the picker shows them.
    pub fn interest_labels(&self, use_percent: bool) -> Vec<String> {
        if use_percent {
            self.rates.iter().map(|r| format!("{}%", r)).collect()
        } else {
            self.flat_interests
                .iter()
                .map(|v| format!("{}đ", crate::format::group(*v)))
                .collect()
        }
    }

    /// The raw digit string the field receives when a preset is picked.
    pub fn interest_value(&self, use_percent: bool, index: usize) -> Option<String> {
        if use_percent {
            self.rates.get(index).map(|r| r.to_string())
        } else {
            self.flat_interests.get(index).map(|v| v.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_amount_ladder() {
        let p = Presets::default();
        assert_eq!(p.amounts.first(), Some(&500_000));
        assert_eq!(p.amounts.last(), Some(&6_000_000));
        assert_eq!(p.amounts.len(), 12);
        assert_eq!(p.flat_interests, vec![30_000, 40_000, 50_000, 60_000]);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let p = Presets::load_from("definitely-not-here.json").unwrap();
        assert_eq!(p.amounts.len(), 12);
    }

    #[test]
    fn labels_follow_mode() {
        let p = Presets::default();
        assert_eq!(p.interest_labels(false)[1], "40.000đ");
        assert_eq!(p.interest_labels(true)[3], "5%");
        assert_eq!(p.interest_value(false, 1).as_deref(), Some("40000"));
        assert_eq!(p.interest_value(true, 3).as_deref(), Some("5"));
    }
}
