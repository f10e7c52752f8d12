use crate::concepts::extract_concepts;
use crate::models::{EvaluationSummary, ModelOutput};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    Plain,
    Json,
}

/// A model output together with the concepts found in it
#[derive(Debug, Serialize)]
struct ModelReport<'a> {
    #[serde(flatten)]
    model: &'a ModelOutput,
    concepts: BTreeSet<String>,
}

/// Print active evaluations in the specified format
pub fn print_evaluations(evaluations: &[EvaluationSummary], format: OutputFormat) {
    match format {
        OutputFormat::Plain => print!("{}", format_evaluations_plain(evaluations)),
        OutputFormat::Json => print_json(&evaluations),
    }
}

/// Print the model outputs of one evaluation in the specified format
pub fn print_models(models: &[ModelOutput], format: OutputFormat) {
    match format {
        OutputFormat::Plain => print!("{}", format_models_plain(models)),
        OutputFormat::Json => {
            let reports: Vec<ModelReport<'_>> = models
                .iter()
                .map(|model| ModelReport {
                    model,
                    concepts: extract_concepts(&model.output),
                })
                .collect();
            print_json(&reports);
        }
    }
}

fn format_evaluations_plain(evaluations: &[EvaluationSummary]) -> String {
    if evaluations.is_empty() {
        return "No active evaluations.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("{:<10} {}\n", "ID", "Title"));
    out.push_str(&format!("{}\n", "-".repeat(40)));
    for evaluation in evaluations {
        out.push_str(&format!("{:<10} {}\n", evaluation.id.to_string(), evaluation.title));
        if !evaluation.description.is_empty() {
            out.push_str(&format!("{:<10} {}\n", "", evaluation.description));
        }
    }
    out
}

fn format_models_plain(models: &[ModelOutput]) -> String {
    let mut out = format!("Models in this evaluation: {}\n", models.len());
    for (i, model) in models.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("#{} {}\n", i + 1, model.heading()));
        out.push_str(&format!("{}\n", "-".repeat(40)));
        out.push_str(&indent(&model.output));
        if let Some(line) = concepts_line(&extract_concepts(&model.output)) {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

/// `🧠 Extracted Concepts: a, b`, or nothing when no concept was found
pub fn concepts_line(concepts: &BTreeSet<String>) -> Option<String> {
    if concepts.is_empty() {
        return None;
    }
    let joined: Vec<&str> = concepts.iter().map(String::as_str).collect();
    Some(format!("🧠 Extracted Concepts: {}", joined.join(", ")))
}

/// Progress bar line shown above every rating page
pub fn progress_line(completed: usize, total: usize) -> String {
    const WIDTH: usize = 20;
    let filled = if total == 0 { 0 } else { completed.min(total) * WIDTH / total };
    format!(
        "[{}{}] Evaluated {} of {}",
        "#".repeat(filled),
        ".".repeat(WIDTH - filled),
        completed,
        total
    )
}

/// Indent every line of a model output by four spaces
pub fn indent(text: &str) -> String {
    let mut out = String::new();
    for line in text.lines() {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing output to JSON: {}", e),
    }
}
