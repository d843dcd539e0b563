// Batch mode: read a file of sample lines, detect them in one request,
// score the answers against the expected label and keep the raw answer.

use anyhow::{Context, Result};
use log::{info, warn};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::Path;

use crate::api::{Detector, TextItem};
use crate::scorer::{self, LanguageLabel, ScoreReport};
use crate::ui;

/// Provider limit on the number of elements in one request.
pub const MAX_BATCH_SIZE: usize = 100;
/// Provider limit on the total characters of one request.
pub const MAX_CHARACTERS: usize = 50_000;

#[derive(Debug, Clone, PartialEq)]
pub struct PreparedBatch {
    pub items: Vec<TextItem>,
    pub char_count: usize,
}

#[derive(Debug, PartialEq)]
pub enum BatchOutcome {
    UnsupportedLabel,
    MissingFile,
    Completed(ScoreReport),
}

/// Read `path` and turn its first lines into request items.
///
/// Returns `Ok(None)` after printing a message when the file does not exist.
pub fn prepare_lines(path: &Path) -> Result<Option<PreparedBatch>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            println!("File does not exist");
            return Ok(None);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read batch file {}", path.display()))
        }
    };

    let batch = prepare_text(&content);
    println!(
        "This batch contains {} characters distributed on {} lines\n",
        batch.char_count,
        batch.items.len()
    );
    Ok(Some(batch))
}

/// Lines keep their terminator, with `\r\n` folded to `\n`. Only the line cap
/// truncates; going over the character limit is reported and nothing more.
pub fn prepare_text(content: &str) -> PreparedBatch {
    let mut items = Vec::new();
    let mut char_count = 0;
    let mut warned = false;

    for raw_line in content.split_inclusive('\n') {
        let line = match raw_line.strip_suffix("\r\n") {
            Some(stripped) => format!("{}\n", stripped),
            None => raw_line.to_string(),
        };
        char_count += line.chars().count();
        if char_count > MAX_CHARACTERS && !warned {
            warn!("The batch has reached the max characters limit ({})", MAX_CHARACTERS);
            println!("The batch has reached the max characters limit");
            warned = true;
        }

        items.push(TextItem::new(line));

        if items.len() == MAX_BATCH_SIZE {
            break;
        }
    }

    PreparedBatch { items, char_count }
}

/// Write the provider answer as-is, replacing any previous export.
pub fn save_results(path: &Path, raw: &Value) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let json_string = serde_json::to_string(raw).context("Serializing detect results")?;
    fs::write(path, json_string).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Full batch flow for the file at `path` and the expected `label`.
pub fn detect_batch<D: Detector + ?Sized>(
    detector: &D,
    path: &Path,
    label: &str,
    output: &Path,
) -> Result<BatchOutcome> {
    let label: LanguageLabel = match label.parse() {
        Ok(label) => label,
        Err(_) => {
            println!("The provided language label is not supported.");
            println!("Please use any of the following: {}", LanguageLabel::supported_list());
            return Ok(BatchOutcome::UnsupportedLabel);
        }
    };

    println!("\nLet's try to detect \"{}\" sentences.", label);

    let batch = match prepare_lines(path)? {
        Some(batch) => batch,
        None => return Ok(BatchOutcome::MissingFile),
    };

    let spinner = ui::spinner("Detecting languages...");
    let detected = detector.detect(&batch.items);
    spinner.finish_and_clear();
    let raw = detected?;
    info!("Received answer for {} lines", batch.items.len());

    save_results(output, &raw)?;

    let results = scorer::parse_results(&raw)?;
    let report = scorer::score(&results, label)?;
    ui::print_report(&report);

    println!("\n>> The results are saved in {}\n", output.display());
    Ok(BatchOutcome::Completed(report))
}
