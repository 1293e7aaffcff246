use serde::Serialize;
use std::collections::BTreeMap;

/// Occurrence count per outcome label. Only labels that were actually drawn
/// are stored; lookups of other labels report zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    counts: BTreeMap<String, u64>,
}

impl FrequencyTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, label: &str) {
        match self.counts.get_mut(label) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(label.to_string(), 1);
            }
        }
    }

    pub fn count(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(label, count)| (label.as_str(), *count))
    }
}

/// Share of `count` in `total`, in percent. A zero total yields a non-finite
/// value; callers validate the event count before displaying.
pub fn percent(count: u64, total: u64) -> f64 {
    100.0 * count as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::{FrequencyTable, percent};

    #[test]
    fn missing_labels_count_as_zero() {
        let mut table = FrequencyTable::new();
        table.record("Heads");
        table.record("Heads");
        assert_eq!(table.count("Heads"), 2);
        assert_eq!(table.count("Tails"), 0);
        assert_eq!(table.len(), 1);
        assert_eq!(table.total(), 2);
    }

    #[test]
    fn percent_of_total() {
        assert_eq!(percent(1, 4), 25.0);
        assert_eq!(percent(0, 7), 0.0);
        assert!(!percent(0, 0).is_finite());
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut table = FrequencyTable::new();
        table.record("Tails");
        table.record("Heads");
        let json = serde_json::to_string(&table).expect("table serializes");
        assert_eq!(json, r#"{"Heads":1,"Tails":1}"#);
    }
}
