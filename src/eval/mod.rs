mod annotate;
mod results;

pub use annotate::{annotate, AnnotateOptions};
pub use results::AnnotationSummary;
