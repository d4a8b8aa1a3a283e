use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use super::summary::CandidateEvaluationSummary;

/// Renders evaluated candidates as CSV, in the order given.
///
/// Header: `Candidate, Overall Score, <criteria...>, Notes`. Every field is
/// double-quoted with embedded quotes doubled; a criterion without a score
/// renders as `0`. Pass ranked summaries for a ranked export.
pub fn export_csv(summaries: &[CandidateEvaluationSummary], criteria: &[String]) -> String {
    let mut header: Vec<&str> = vec!["Candidate", "Overall Score"];
    header.extend(criteria.iter().map(String::as_str));
    header.push("Notes");

    let mut lines = vec![csv_line(header)];

    for summary in summaries.iter().filter(|s| s.is_evaluated()) {
        let overall = summary.overall_score.to_string();
        let scores: Vec<String> = criteria
            .iter()
            .map(|c| summary.score_for(c).to_string())
            .collect();

        let mut row: Vec<&str> = vec![summary.candidate_name.as_str(), overall.as_str()];
        row.extend(scores.iter().map(String::as_str));
        row.push(summary.notes.as_str());

        lines.push(csv_line(row));
    }

    lines.join("\n")
}

fn csv_line(fields: Vec<&str>) -> String {
    fields
        .into_iter()
        .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

/// `comparison_<title>.csv`, with path separators stripped from the title.
pub fn csv_file_name(title: &str) -> String {
    let title = title.trim();
    let title = if title.is_empty() { "candidates" } else { title };
    let safe: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            other => other,
        })
        .collect();
    format!("comparison_{safe}.csv")
}

/// Writes the export into `dir` and returns the file path.
pub fn write_csv(
    dir: &Path,
    title: &str,
    summaries: &[CandidateEvaluationSummary],
    criteria: &[String],
) -> Result<PathBuf> {
    let path = dir.join(csv_file_name(title));
    let content = export_csv(summaries, criteria);

    std::fs::write(&path, content.as_bytes())
        .with_context(|| format!("write comparison export to {}", path.display()))?;

    info!(path = %path.display(), rows = summaries.len(), "comparison exported");
    Ok(path)
}
