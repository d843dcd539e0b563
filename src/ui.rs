// UI layer: the interactive paragraph loop and the terminal rendering of
// batch results. Prompts go through `dialoguer`, spinners through
// `indicatif`.

use crate::api::{detect_one_paragraph, Detector};
use crate::scorer::ScoreReport;
use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Source of user answers for the interactive loop.
pub trait Console {
    fn read_paragraph(&mut self) -> Result<String>;
    fn confirm_another(&mut self) -> Result<bool>;
}

/// Terminal console backed by `dialoguer` prompts.
pub struct TerminalConsole;

impl Console for TerminalConsole {
    fn read_paragraph(&mut self) -> Result<String> {
        println!();
        let text: String = Input::new()
            .with_prompt("Please input your text")
            .allow_empty(true)
            .interact_text()?;
        Ok(text)
    }

    fn confirm_another(&mut self) -> Result<bool> {
        // Anything but an explicit yes ends the session.
        let another = Confirm::new()
            .with_prompt("Detect another paragraph?")
            .default(false)
            .interact()?;
        Ok(another)
    }
}

/// Ask for a paragraph, print the detection answer, repeat while the user
/// wants to.
pub fn input_loop<D, C>(detector: &D, console: &mut C) -> Result<()>
where
    D: Detector + ?Sized,
    C: Console + ?Sized,
{
    loop {
        let input_text = console.read_paragraph()?;

        let spinner = spinner("Detecting language...");
        let result = detect_one_paragraph(detector, &input_text);
        spinner.finish_and_clear();
        println!("ANSWER: {}\n", result?);

        if !console.confirm_another()? {
            break;
        }
    }
    Ok(())
}

/// Spinner shown while waiting on the API.
pub fn spinner(msg: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(msg);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Print the scored rows followed by the batch metrics.
pub fn print_report(report: &ScoreReport) {
    println!("{:>4}  {:<10} {:>8}  {:<5}  isOk", "", "language", "score", "label");
    for (i, row) in report.rows.iter().enumerate() {
        let is_ok = if row.is_ok {
            "true".green()
        } else {
            "false".red()
        };
        println!(
            "{:>4}  {:<10} {:>8.4}  {:<5}  {}",
            i,
            row.language,
            row.score,
            row.label.as_str(),
            is_ok
        );
    }
    println!();

    println!("Average Azure score: {}", report.average_api_score);
    println!("Average local score: {}", report.average_local_score);
    println!("Recall score: {}", report.recall);
}
