use crate::dataset::Slot;
use serde::Serialize;
use std::collections::BTreeMap;

/// Score statistics for one evaluation slot kind
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlotStats {
    /// Number of evaluations scored
    pub scored: usize,
    /// Sum of the stored scores
    pub score_sum: f64,
}

impl SlotStats {
    pub fn record(&mut self, score: f64) {
        self.scored += 1;
        self.score_sum += score;
    }

    /// Mean stored score, 0 when nothing was scored
    pub fn mean(&self) -> f64 {
        if self.scored == 0 {
            0.0
        } else {
            self.score_sum / self.scored as f64
        }
    }
}

/// Counters accumulated over one annotation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnnotationSummary {
    /// Tasks in the dataset
    pub total_tasks: usize,
    /// Model entries visited
    pub total_models: usize,
    /// Scores written onto evaluations
    pub scores_added: usize,
    /// Whether dimension labels were normalized
    pub dimensions_normalized: bool,
    /// Criteria whose dimension label was rewritten
    pub dimensions_renamed: usize,
    /// Per-slot statistics
    pub slots: BTreeMap<Slot, SlotStats>,
}

impl AnnotationSummary {
    pub fn record_score(&mut self, slot: Slot, score: f64) {
        self.scores_added += 1;
        self.slots.entry(slot).or_default().record(score);
    }

    /// Save the summary to a JSON file
    pub fn save_json(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Generate the human-readable summary block
    pub fn generate_report(&self) -> String {
        let mut report = String::new();

        report.push_str(&format!("{}\n", "=".repeat(60)));
        report.push_str("Summary:\n");
        report.push_str(&format!("  Total tasks processed: {}\n", self.total_tasks));
        report.push_str(&format!("  Total models processed: {}\n", self.total_models));
        report.push_str(&format!("  Total scores added: {}\n", self.scores_added));
        if self.dimensions_normalized {
            report.push_str(&format!(
                "  Total dimensions renamed: {}\n",
                self.dimensions_renamed
            ));
        }
        for (slot, stats) in &self.slots {
            report.push_str(&format!(
                "  {} mean score: {:.2} ({} scored)\n",
                slot,
                stats.mean(),
                stats.scored
            ));
        }
        report.push_str(&"=".repeat(60));

        report
    }
}
