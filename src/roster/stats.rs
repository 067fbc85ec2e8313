use std::fmt;

use crate::error::ValidationError;

/// Default number of matches kept in the rolling window.
pub const DEFAULT_WINDOW: usize = 20;

const MAX_CS_PER_MIN: f64 = 20.0;
const MAX_GOLD_DIFF: i32 = 20_000;
const MAX_KDA: f64 = 100.0;

// Composite score weights and normalization caps
const CS_WEIGHT: f64 = 0.4;
const GOLD_WEIGHT: f64 = 0.3;
const KDA_WEIGHT: f64 = 0.3;
const CS_CAP: f64 = 10.0;
const GOLD_CAP: f64 = 3000.0;
const KDA_CAP: f64 = 10.0;

/// Letter grade derived from a player's average composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            Grade::S
        } else if score >= 6.5 {
            Grade::A
        } else if score >= 5.0 {
            Grade::B
        } else if score >= 3.5 {
            Grade::C
        } else {
            Grade::D
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        };
        f.write_str(s)
    }
}

/// Rolling per-match performance history, oldest entry first.
///
/// The four series always have the same length: `score` is computed from the
/// other three whenever an entry is appended or loaded, never stored on its own.
/// Updates return a new value and leave the receiver untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    cs_per_min: Vec<f64>,
    gold_diff_at_15: Vec<i32>,
    kda: Vec<f64>,
    score: Vec<f64>,
    window: usize,
}

impl Default for Stats {
    fn default() -> Self {
        Stats::with_window(DEFAULT_WINDOW)
    }
}

impl Stats {
    pub fn with_window(window: usize) -> Self {
        Stats {
            cs_per_min: Vec::new(),
            gold_diff_at_15: Vec::new(),
            kda: Vec::new(),
            score: Vec::new(),
            window: window.max(1),
        }
    }

    /// Rebuild a history from stored series.
    ///
    /// `stored_scores` only takes part in the length check; scores are
    /// recomputed from each triple. Mismatched lengths or an out-of-range
    /// entry are rejected so the caller can fall back to an empty history.
    pub fn from_series(
        cs_per_min: Vec<f64>,
        gold_diff_at_15: Vec<i32>,
        kda: Vec<f64>,
        stored_scores: &[f64],
        window: usize,
    ) -> Result<Self, ValidationError> {
        let len = cs_per_min.len();
        if gold_diff_at_15.len() != len || kda.len() != len || stored_scores.len() != len {
            return Err(ValidationError::Stats);
        }

        let mut stats = Stats::with_window(window);
        for ((cs, gold), kda) in cs_per_min.into_iter().zip(gold_diff_at_15).zip(kda) {
            if !Self::is_valid_stats(cs, gold, kda) {
                return Err(ValidationError::Stats);
            }
            stats.push(cs, gold, kda);
        }
        Ok(stats)
    }

    pub fn is_valid_stats(cs_per_min: f64, gold_diff_at_15: i32, kda: f64) -> bool {
        cs_per_min.is_finite()
            && kda.is_finite()
            && (0.0..=MAX_CS_PER_MIN).contains(&cs_per_min)
            && (-MAX_GOLD_DIFF..=MAX_GOLD_DIFF).contains(&gold_diff_at_15)
            && (0.0..=MAX_KDA).contains(&kda)
    }

    /// Composite score on a 0-10 scale, rounded to two decimals.
    pub fn compute_score(cs_per_min: f64, gold_diff_at_15: i32, kda: f64) -> f64 {
        let cs_n = (cs_per_min / CS_CAP).min(1.0);
        let gold_n = (f64::from(gold_diff_at_15).clamp(-GOLD_CAP, GOLD_CAP) + GOLD_CAP) / (2.0 * GOLD_CAP);
        let kda_n = (kda / KDA_CAP).min(1.0);

        let raw = 10.0 * (CS_WEIGHT * cs_n + GOLD_WEIGHT * gold_n + KDA_WEIGHT * kda_n);
        (raw * 100.0).round() / 100.0
    }

    /// Append one match from raw text fields.
    ///
    /// An unparsable or out-of-range triple yields an unchanged copy.
    pub fn add_latest_stats(&self, cs: &str, gold: &str, kda: &str) -> Stats {
        self.try_add_latest_stats(cs, gold, kda)
            .unwrap_or_else(|| self.clone())
    }

    /// Like `add_latest_stats`, but returns `None` when the triple is skipped.
    pub fn try_add_latest_stats(&self, cs: &str, gold: &str, kda: &str) -> Option<Stats> {
        let parsed = (
            cs.trim().parse::<f64>(),
            gold.trim().parse::<i32>(),
            kda.trim().parse::<f64>(),
        );
        let (Ok(cs), Ok(gold), Ok(kda)) = parsed else {
            log::warn!("Skipping stats entry with unparsable fields: {cs:?}, {gold:?}, {kda:?}");
            return None;
        };
        if !Self::is_valid_stats(cs, gold, kda) {
            log::warn!("Skipping out-of-range stats entry: {cs}, {gold}, {kda}");
            return None;
        }

        let mut next = self.clone();
        next.push(cs, gold, kda);
        Some(next)
    }

    fn push(&mut self, cs: f64, gold: i32, kda: f64) {
        if self.len() == self.window {
            self.cs_per_min.remove(0);
            self.gold_diff_at_15.remove(0);
            self.kda.remove(0);
            self.score.remove(0);
        }
        self.cs_per_min.push(cs);
        self.gold_diff_at_15.push(gold);
        self.kda.push(kda);
        self.score.push(Self::compute_score(cs, gold, kda));
    }

    pub fn len(&self) -> usize {
        self.score.len()
    }

    pub fn is_empty(&self) -> bool {
        self.score.is_empty()
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn cs_per_min(&self) -> &[f64] {
        &self.cs_per_min
    }

    pub fn gold_diff_at_15(&self) -> &[i32] {
        &self.gold_diff_at_15
    }

    pub fn kda(&self) -> &[f64] {
        &self.kda
    }

    pub fn score(&self) -> &[f64] {
        &self.score
    }

    pub fn average_score(&self) -> Option<f64> {
        if self.score.is_empty() {
            None
        } else {
            Some(self.score.iter().sum::<f64>() / self.score.len() as f64)
        }
    }

    pub fn grade(&self) -> Option<Grade> {
        self.average_score().map(Grade::from_score)
    }
}
