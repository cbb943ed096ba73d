use crate::models::Metric;

pub const SAMPLE_ID_COLUMN: &str = "sample_id";
pub const FOLD_CHANGE_COLUMN: &str = "fold_change";
pub const LOG2_FOLD_CHANGE_COLUMN: &str = "log2_fold_change";
pub const ABOVE_CUTOFF_COLUMN: &str = "above_cut_off";

///
/// Outcome of comparing one interval pair within one sample.
///
/// Created once by the comparator and never mutated afterwards.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub sample_id: String,
    pub metric: Metric,
    pub region1_label: String,
    pub region1_value: f64,
    pub region2_label: String,
    pub region2_value: f64,
    pub fold_change: f64,
    pub log2_fold_change: f64,
    pub above_cutoff: bool,
}

impl ComparisonResult {
    /// Value of the metric for `label`, if it is one of the two compared regions.
    pub fn value_for(&self, label: &str) -> Option<f64> {
        if label == self.region1_label {
            Some(self.region1_value)
        } else if label == self.region2_label {
            Some(self.region2_value)
        } else {
            None
        }
    }
}

///
/// All comparison rows of one sample, i.e. the content of one result artifact.
///
/// Region labels are collected when the table is built, in interval spec order,
/// and keep that order after the rows are sorted.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonTable {
    pub rows: Vec<ComparisonResult>,
    labels: Vec<String>,
}

impl ComparisonTable {
    pub fn new(rows: Vec<ComparisonResult>) -> Self {
        let mut labels: Vec<String> = Vec::new();
        for row in &rows {
            for label in [&row.region1_label, &row.region2_label] {
                if !labels.contains(label) {
                    labels.push(label.clone());
                }
            }
        }
        ComparisonTable { rows, labels }
    }

    ///
    /// Sort rows descending by `(fold_change, sample_id)`. The sort is stable,
    /// so rows that tie keep their interval spec order.
    ///
    pub fn sort_by_fold_change(&mut self) {
        self.rows.sort_by(|a, b| {
            b.fold_change
                .total_cmp(&a.fold_change)
                .then_with(|| b.sample_id.cmp(&a.sample_id))
        });
    }

    /// Region label columns in order of first appearance.
    pub fn labels(&self) -> Vec<&str> {
        self.labels.iter().map(|l| l.as_str()).collect()
    }

    ///
    /// Output header: `sample_id`, the labels of the first pair, the three
    /// computed columns, then every label introduced by later pairs.
    ///
    pub fn columns(&self) -> Vec<String> {
        let labels = self.labels();
        let (leading, trailing) = labels.split_at(labels.len().min(2));

        let mut columns = vec![SAMPLE_ID_COLUMN.to_string()];
        columns.extend(leading.iter().map(|l| l.to_string()));
        columns.extend(
            [FOLD_CHANGE_COLUMN, LOG2_FOLD_CHANGE_COLUMN, ABOVE_CUTOFF_COLUMN]
                .iter()
                .map(|c| c.to_string()),
        );
        columns.extend(trailing.iter().map(|l| l.to_string()));
        columns
    }
}
