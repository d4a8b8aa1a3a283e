//! Comparison engine: turns raw per-criterion scores into a ranked,
//! classified, exportable view of a job's candidates.
//!
//! Everything here is a pure transform. Network access lives in
//! [`crate::api_client`]; the two meet only in [`crate::loader`].

pub mod bands;
pub mod chart;
pub mod export;
pub mod ranking;
pub mod status;
pub mod summary;

pub use bands::{classify, ScoreBand, ScoreColor};
pub use chart::{chart_series, series_color, ChartSeries};
pub use export::{csv_file_name, export_csv, write_csv};
pub use ranking::{rank, ComparisonStats, RankedCandidate, Ranking};
pub use status::{candidate_status, CandidateStatus};
pub use summary::{not_evaluated, rounded_mean, summarize, CandidateEvaluationSummary, EvaluationStatus};
