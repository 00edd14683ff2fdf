//! Scoring pass over a loaded dataset
//!
//! Walks tasks -> models -> {thinking_trace, model_resp}, optionally renames
//! rubric dimensions, and attaches a `score` to every evaluation that has a
//! non-empty rubric list. The dataset is only mutated in memory; writing it
//! back is left to the caller.

use crate::dataset::{Slot, Task};
use crate::eval::AnnotationSummary;
use crate::scoring::{self, DimensionMap, ScoreError};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnotateError {
    #[error("Task {task_id}, model {model}, {slot}: {source}")]
    Score {
        task_id: String,
        model: String,
        slot: Slot,
        #[source]
        source: ScoreError,
    },
}

/// Options for an annotation pass
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotateOptions<'a> {
    /// Rename table applied to rubric dimensions before scoring; `None` skips renaming
    pub dimension_map: Option<&'a DimensionMap>,
}

/// Score every evaluation in `tasks`, overwriting existing scores
pub fn annotate(
    tasks: &mut [Task],
    options: &AnnotateOptions<'_>,
) -> Result<AnnotationSummary, AnnotateError> {
    let mut summary = AnnotationSummary {
        total_tasks: tasks.len(),
        dimensions_normalized: options.dimension_map.is_some(),
        ..Default::default()
    };

    for (task_idx, task) in tasks.iter_mut().enumerate() {
        let task_id = task.task_id().to_string();
        info!(
            "Processing task {}/{} (ID: {})",
            task_idx + 1,
            summary.total_tasks,
            task_id
        );

        for mut model in task.models_mut() {
            summary.total_models += 1;
            let model_name = model.display_name().to_string();
            info!("  Processing model: {}", model_name);

            for slot in Slot::ALL {
                let Some(mut evaluation) = model.evaluation_mut(slot) else {
                    continue;
                };
                let Some(rubrics) = evaluation.rubrics_mut().filter(|r| !r.is_empty()) else {
                    continue;
                };

                if let Some(map) = options.dimension_map {
                    let renamed = map.normalize(rubrics);
                    if renamed > 0 {
                        debug!("    Renamed {} {} dimensions", renamed, slot);
                    }
                    summary.dimensions_renamed += renamed;
                }

                let totals = scoring::breakdown(rubrics).map_err(|source| AnnotateError::Score {
                    task_id: task_id.clone(),
                    model: model_name.clone(),
                    slot,
                    source,
                })?;
                let score = totals.score();
                debug!(
                    "    {}: {}/{} criteria satisfied, {} of {} weight",
                    slot, totals.satisfied, totals.total, totals.achieved, totals.max
                );

                evaluation.set_score(score);
                summary.record_score(slot, score);
                info!("    Added {} score: {:.2}", slot, score);
            }
        }
    }

    Ok(summary)
}
