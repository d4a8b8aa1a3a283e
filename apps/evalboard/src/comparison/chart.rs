use serde::Serialize;

use super::ranking::RankedCandidate;

const PALETTE: [&str; 8] = [
    "#3b82f6", "#ef4444", "#10b981", "#f59e0b", "#8b5cf6", "#06b6d4", "#f97316", "#84cc16",
];

/// One candidate's line on a radar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub color: &'static str,
    /// One value per criterion, in criteria order; 0 when unscored.
    pub scores: Vec<u8>,
}

/// Colour for the `index`-th series; cycles through a fixed palette.
pub fn series_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

pub fn chart_series(ranked: &[RankedCandidate], criteria: &[String]) -> Vec<ChartSeries> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, entry)| ChartSeries {
            name: entry.summary.candidate_name.clone(),
            color: series_color(i),
            scores: criteria
                .iter()
                .map(|c| entry.summary.score_for(c))
                .collect(),
        })
        .collect()
}
