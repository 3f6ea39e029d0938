//! Segmentation of a string into maximal same-script runs.
//!
//! A run is the atomic drawing unit: one font, one measured width. Runs
//! partition their source string with no gaps or overlaps, so concatenating
//! the run texts reconstructs the input exactly, and summing the run widths
//! gives the whole-string width under the two-font model.

use crate::fonts::FontTable;
use crate::script::{self, ScriptClass};

#[derive(Debug, Clone, PartialEq)]
pub struct InlineRun {
    pub text: String,
    pub class: ScriptClass,
    pub width: f32,
}

/// Splits `text` into maximal runs of one script class, each annotated with
/// its rendered width at `size` points.
pub fn segment(table: &FontTable, text: &str, size: f32) -> Vec<InlineRun> {
    let mut runs = Vec::new();
    let mut current = String::new();
    let mut current_class = None;
    let mut current_width = 0.0;

    for c in text.chars() {
        let class = script::classify(c);
        if current_class != Some(class) {
            if let Some(class) = current_class {
                runs.push(InlineRun {
                    text: std::mem::take(&mut current),
                    class,
                    width: current_width,
                });
            }
            current_class = Some(class);
            current_width = 0.0;
        }
        current.push(c);
        current_width += table.metrics(class).advance(c, size);
    }

    if let Some(class) = current_class {
        runs.push(InlineRun {
            text: current,
            class,
            width: current_width,
        });
    }
    runs
}

/// Whole-string width at `size` points: the sum of its run widths.
pub fn measure_width(table: &FontTable, text: &str, size: f32) -> f32 {
    text.chars()
        .map(|c| table.metrics(script::classify(c)).advance(c, size))
        .sum()
}
