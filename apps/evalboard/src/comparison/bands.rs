use std::fmt;

use serde::{Deserialize, Serialize};

/// Display band for a 0-10 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    Average,
    BelowAverage,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreColor {
    Green,
    Yellow,
    Orange,
    Red,
}

/// Classifies a score. Checks run top-down and the first match wins:
/// ≥9, ≥8, ≥6, ≥4, else the lowest band.
pub fn classify(score: u8) -> ScoreBand {
    if score >= 9 {
        ScoreBand::Excellent
    } else if score >= 8 {
        ScoreBand::Good
    } else if score >= 6 {
        ScoreBand::Average
    } else if score >= 4 {
        ScoreBand::BelowAverage
    } else {
        ScoreBand::Poor
    }
}

impl ScoreBand {
    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::Good => "Good",
            ScoreBand::Average => "Average",
            ScoreBand::BelowAverage => "Below average",
            ScoreBand::Poor => "Poor",
        }
    }

    pub fn color(self) -> ScoreColor {
        match self {
            ScoreBand::Excellent | ScoreBand::Good => ScoreColor::Green,
            ScoreBand::Average => ScoreColor::Yellow,
            ScoreBand::BelowAverage => ScoreColor::Orange,
            ScoreBand::Poor => ScoreColor::Red,
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl ScoreColor {
    pub fn hex(self) -> &'static str {
        match self {
            ScoreColor::Green => "#10b981",
            ScoreColor::Yellow => "#f59e0b",
            ScoreColor::Orange => "#f97316",
            ScoreColor::Red => "#ef4444",
        }
    }
}
