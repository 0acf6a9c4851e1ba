//! The audit side channel: named values pushed during synthesis.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ReportValue {
    Num { value: f64 },
    Text { value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportEntry {
    pub key: String,
    pub value: ReportValue,
}

/// Ordered key/value log of what the synthesis computed. Insertion
/// order is preserved so the audit reads in pass order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SynthesisReport {
    #[serde(default)]
    pub entries: Vec<ReportEntry>,
}

impl SynthesisReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_num(&mut self, key: impl Into<String>, value: f64) {
        self.entries.push(ReportEntry {
            key: key.into(),
            value: ReportValue::Num { value },
        });
    }

    pub fn push_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push(ReportEntry {
            key: key.into(),
            value: ReportValue::Text {
                value: value.into(),
            },
        });
    }

    pub fn get(&self, key: &str) -> Option<&ReportValue> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_insertion_order() {
        let mut report = SynthesisReport::new();
        report.push_num("num_units", 10.0);
        report.push_text("applicability", "applicable");
        report.push_num("supply_length_ft", 120.5);

        let keys: Vec<&str> = report.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["num_units", "applicability", "supply_length_ft"]);
    }

    #[test]
    fn get_finds_by_key() {
        let mut report = SynthesisReport::new();
        report.push_num("swing_tank_volume_gal", 80.0);

        match report.get("swing_tank_volume_gal") {
            Some(ReportValue::Num { value }) => assert_eq!(*value, 80.0),
            other => panic!("unexpected entry: {other:?}"),
        }
        assert!(report.get("absent").is_none());
    }
}
