use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Structural problems found while loading a task record
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("task {task}: missing {path}")]
    Missing { task: String, path: String },

    #[error("task {task}: {path} must be {expected}")]
    WrongType {
        task: String,
        path: String,
        expected: &'static str,
    },
}

/// One task record of the comparison dataset.
///
/// The record is kept as the JSON object it was read from, so keys this tool
/// does not interpret, key order, number formatting and explicit nulls all
/// survive a rewrite. Only `score` and `dimension` values are ever changed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Task {
    task_id: String,
    fields: Map<String, Value>,
}

impl Serialize for Task {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl TryFrom<Map<String, Value>> for Task {
    type Error = ShapeError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let task_id = match fields.get("metadata").and_then(|m| m.get("task_id")) {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Null) | None => {
                return Err(ShapeError::Missing {
                    task: "<unknown>".to_string(),
                    path: "metadata.task_id".to_string(),
                })
            }
            Some(other) => other.to_string(),
        };

        let wrong_type = |path: String, expected| ShapeError::WrongType {
            task: task_id.clone(),
            path,
            expected,
        };

        let models = match fields.get("models") {
            Some(Value::Array(models)) => models,
            Some(_) => return Err(wrong_type("models".to_string(), "an array")),
            None => {
                return Err(ShapeError::Missing {
                    task: task_id.clone(),
                    path: "models".to_string(),
                })
            }
        };

        for (m, model) in models.iter().enumerate() {
            let model = model
                .as_object()
                .ok_or_else(|| wrong_type(format!("models[{}]", m), "an object"))?;

            for slot in Slot::ALL {
                let evaluation = match model.get(slot.key()) {
                    Some(Value::Object(evaluation)) => evaluation,
                    Some(Value::Null) | None => continue,
                    Some(_) => {
                        return Err(wrong_type(
                            format!("models[{}].{}", m, slot),
                            "an object or null",
                        ))
                    }
                };

                let rubrics = match evaluation.get("rubrics") {
                    Some(Value::Array(rubrics)) => rubrics,
                    Some(Value::Null) | None => continue,
                    Some(_) => {
                        return Err(wrong_type(
                            format!("models[{}].{}.rubrics", m, slot),
                            "an array or null",
                        ))
                    }
                };

                if let Some(r) = rubrics.iter().position(|c| !c.is_object()) {
                    return Err(wrong_type(
                        format!("models[{}].{}.rubrics[{}]", m, slot, r),
                        "an object",
                    ));
                }
            }
        }

        Ok(Self { task_id, fields })
    }
}

impl Task {
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn model_count(&self) -> usize {
        self.fields
            .get("models")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Model entries, in document order
    pub fn models_mut(&mut self) -> impl Iterator<Item = ModelEntry<'_>> {
        self.fields
            .get_mut("models")
            .and_then(Value::as_array_mut)
            .into_iter()
            .flatten()
            .filter_map(Value::as_object_mut)
            .map(|fields| ModelEntry { fields })
    }
}

/// A single model's output for a task
#[derive(Debug)]
pub struct ModelEntry<'a> {
    fields: &'a mut Map<String, Value>,
}

impl ModelEntry<'_> {
    /// Name used in log lines and error context
    pub fn display_name(&self) -> &str {
        self.fields
            .get("model_name")
            .and_then(Value::as_str)
            .unwrap_or("<unnamed>")
    }

    /// The evaluation in `slot`, if present and not null
    pub fn evaluation_mut(&mut self, slot: Slot) -> Option<Evaluation<'_>> {
        self.fields
            .get_mut(slot.key())
            .and_then(Value::as_object_mut)
            .map(|fields| Evaluation { fields })
    }
}

/// Rubric judgements for one slot, plus the derived score
#[derive(Debug)]
pub struct Evaluation<'a> {
    fields: &'a mut Map<String, Value>,
}

impl Evaluation<'_> {
    /// Rubric entries; every element is a JSON object
    pub fn rubrics_mut(&mut self) -> Option<&mut Vec<Value>> {
        self.fields.get_mut("rubrics").and_then(Value::as_array_mut)
    }

    /// Set `score`, keeping its position when the key already exists
    pub fn set_score(&mut self, score: f64) {
        self.fields.insert("score".to_string(), Value::from(score));
    }
}

/// The two scored facets of a model's output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    ThinkingTrace,
    ModelResp,
}

impl Slot {
    /// Slots in the order they are visited
    pub const ALL: [Slot; 2] = [Slot::ThinkingTrace, Slot::ModelResp];

    pub fn key(&self) -> &'static str {
        match self {
            Slot::ThinkingTrace => "thinking_trace",
            Slot::ModelResp => "model_resp",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
