//! Quality rating for analysis results.
//!
//! The rating depends only on how many bugs of each kind were found.

use crate::analyze::{Bug, BugKind, Quality};

/// Thresholds per rating, checked best first.
pub mod thresholds {
    pub const EXCELLENT_MAX_SUGGESTIONS: usize = 1;
    pub const GOOD_MAX_WARNINGS: usize = 2;
    pub const GOOD_MAX_SUGGESTIONS: usize = 3;
    pub const FAIR_MAX_ERRORS: usize = 1;
    pub const FAIR_MAX_WARNINGS: usize = 4;
}

/// Bug counts by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindCounts {
    pub errors: usize,
    pub warnings: usize,
    pub suggestions: usize,
}

impl KindCounts {
    pub fn from_bugs(bugs: &[Bug]) -> Self {
        let mut counts = Self::default();
        for bug in bugs {
            match bug.kind {
                BugKind::Error => counts.errors += 1,
                BugKind::Warning => counts.warnings += 1,
                BugKind::Suggestion => counts.suggestions += 1,
            }
        }
        counts
    }
}

/// Determine the rating from kind counts.
pub fn rate(counts: KindCounts) -> Quality {
    use self::thresholds::*;

    match counts {
        KindCounts {
            errors: 0,
            warnings: 0,
            suggestions,
        } if suggestions <= EXCELLENT_MAX_SUGGESTIONS => Quality::Excellent,
        KindCounts {
            errors: 0,
            warnings,
            suggestions,
        } if warnings <= GOOD_MAX_WARNINGS && suggestions <= GOOD_MAX_SUGGESTIONS => {
            Quality::Good
        }
        KindCounts {
            errors, warnings, ..
        } if errors <= FAIR_MAX_ERRORS && warnings <= FAIR_MAX_WARNINGS => Quality::Fair,
        _ => Quality::Poor,
    }
}

/// Rate a list of bugs.
pub fn calculate(bugs: &[Bug]) -> Quality {
    rate(KindCounts::from_bugs(bugs))
}
