//! Static conversion-time estimate keyed by page count.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A coarse, human-readable estimate of how long a conversion will take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeEstimate {
    /// Fewer than 10 pages.
    FewSeconds,
    /// 10–49 pages.
    OneToTwoMinutes,
    /// 50–199 pages.
    TwoToFiveMinutes,
    /// 200 pages or more.
    OverFiveMinutes,
}

impl TimeEstimate {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeEstimate::FewSeconds => "a few seconds",
            TimeEstimate::OneToTwoMinutes => "1-2 minutes",
            TimeEstimate::TwoToFiveMinutes => "2-5 minutes",
            TimeEstimate::OverFiveMinutes => "more than 5 minutes",
        }
    }
}

impl fmt::Display for TimeEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket `page_count` into a [`TimeEstimate`].
pub fn estimate_conversion_time(page_count: usize) -> TimeEstimate {
    match page_count {
        0..=9 => TimeEstimate::FewSeconds,
        10..=49 => TimeEstimate::OneToTwoMinutes,
        50..=199 => TimeEstimate::TwoToFiveMinutes,
        _ => TimeEstimate::OverFiveMinutes,
    }
}
