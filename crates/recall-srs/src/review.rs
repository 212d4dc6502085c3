//! SM-2 style grading
//!
//! Produces the next [`SrsState`] after a review. Grades map onto the
//! familiar four answer buttons:
//!
//! * Again: forgotten. Lapse recorded, interval back to one day, ease -0.20
//! * Hard: recalled with effort. Interval x1.2, ease -0.15
//! * Good: recalled. Interval 1 -> 6 -> previous x ease
//! * Easy: effortless. Interval 4 on first review, else previous x ease x1.3, ease +0.15
//!
//! `reps` and `lapses` only ever grow, so a lapsed card never turns back
//! into a new one. Ease stays within the configured bounds and intervals
//! never exceed `max_interval_days`.

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{config::SchedulerConfig, state::SrsState};

const HARD_INTERVAL_MULTIPLIER: f64 = 1.2;
const EASY_BONUS: f64 = 1.3;
const AGAIN_EASE_DELTA: f64 = -0.20;
const HARD_EASE_DELTA: f64 = -0.15;
const EASY_EASE_DELTA: f64 = 0.15;

/// Answer quality for a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Grade {
    /// Failed to recall
    Again,
    /// Recalled with serious difficulty
    Hard,
    /// Recalled
    Good,
    /// Recalled effortlessly
    Easy,
}

impl Grade {
    /// All grades in button order
    pub const ALL: [Self; 4] = [Self::Again, Self::Hard, Self::Good, Self::Easy];
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "again" | "1" => Ok(Self::Again),
            "hard" | "2" => Ok(Self::Hard),
            "good" | "3" => Ok(Self::Good),
            "easy" | "4" => Ok(Self::Easy),
            other => Err(format!(
                "Invalid grade: '{other}'. Must be one of again, hard, good, easy (or 1-4)"
            )),
        }
    }
}

/// Grade a review of `state` answered at `now`
pub fn grade_card(state: &SrsState, grade: Grade, now: DateTime<Utc>) -> SrsState {
    grade_with(&SchedulerConfig::default(), state, grade, now)
}

pub(crate) fn grade_with(
    config: &SchedulerConfig,
    state: &SrsState,
    grade: Grade,
    now: DateTime<Utc>,
) -> SrsState {
    let previous = if state.interval_days.is_finite() {
        state.interval_days.max(1.0)
    } else {
        1.0
    };
    let ease = config.clamp_ease(state.ease_factor);

    let mut next = state.clone();

    match grade {
        Grade::Again => {
            next.lapses = state.lapses.saturating_add(1);
            next.ease_factor = config.clamp_ease(ease + AGAIN_EASE_DELTA);
            next.interval_days = 1.0;
        }
        Grade::Hard => {
            next.reps = state.reps.saturating_add(1);
            next.ease_factor = config.clamp_ease(ease + HARD_EASE_DELTA);
            next.interval_days = if state.is_new() {
                1.0
            } else {
                (previous * HARD_INTERVAL_MULTIPLIER).max(1.0)
            };
        }
        Grade::Good => {
            next.reps = state.reps.saturating_add(1);
            next.ease_factor = ease;
            next.interval_days = match state.reps {
                0 => 1.0,
                1 => 6.0,
                _ => previous * ease,
            };
        }
        Grade::Easy => {
            next.reps = state.reps.saturating_add(1);
            next.ease_factor = config.clamp_ease(ease + EASY_EASE_DELTA);
            next.interval_days = if state.is_new() {
                4.0
            } else {
                previous * next.ease_factor * EASY_BONUS
            };
        }
    }

    // Whole days keep due instants stable across reloads
    next.interval_days = next
        .interval_days
        .round()
        .min(config.max_interval_days)
        .max(1.0);
    next.due_at = days(next.interval_days)
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    tracing::trace!(
        "Graded card {} as {:?}: interval {} -> {} days, ease {:.2}",
        state.card_id,
        grade,
        state.interval_days,
        next.interval_days,
        next.ease_factor
    );

    next
}

/// Interval in days each grade would produce, in [`Grade::ALL`] order
pub fn preview_intervals(state: &SrsState, now: DateTime<Utc>) -> [f64; 4] {
    preview_with(&SchedulerConfig::default(), state, now)
}

pub(crate) fn preview_with(config: &SchedulerConfig, state: &SrsState, now: DateTime<Utc>) -> [f64; 4] {
    Grade::ALL.map(|grade| grade_with(config, state, grade, now).interval_days)
}

/// Format an interval in days as a compact human-readable string
pub fn format_interval(days: f64) -> String {
    let days = days.round() as i64;
    match days {
        d if d <= 0 => "now".to_string(),
        d if d < 7 => format!("{d}d"),
        d if d < 30 => format!("{}w", d / 7),
        d if d < 365 => format!("{}mo", d / 30),
        d => format!("{}y", d / 365),
    }
}

fn days(days: f64) -> Option<Duration> {
    Duration::try_milliseconds((days * 86_400_000.0) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_EASE_FACTOR, MAX_INTERVAL_DAYS, MIN_EASE_FACTOR};

    fn state_with(reps: u32, interval_days: f64, ease_factor: f64) -> SrsState {
        SrsState {
            reps,
            interval_days,
            ease_factor,
            ..SrsState::new("c1", Utc::now())
        }
    }

    #[test]
    fn test_first_review_good() {
        let now = Utc::now();
        let next = grade_card(&state_with(0, 0.0, 2.5), Grade::Good, now);

        assert_eq!(next.reps, 1);
        assert_eq!(next.interval_days, 1.0);
        assert_eq!(next.due_at, now + Duration::days(1));
    }

    #[test]
    fn test_second_review_good() {
        let next = grade_card(&state_with(1, 1.0, 2.5), Grade::Good, Utc::now());
        assert_eq!(next.reps, 2);
        assert_eq!(next.interval_days, 6.0);
    }

    #[test]
    fn test_subsequent_review_good() {
        let next = grade_card(&state_with(5, 10.0, 2.5), Grade::Good, Utc::now());
        // 10 * 2.5 = 25
        assert_eq!(next.interval_days, 25.0);
    }

    #[test]
    fn test_again_records_lapse_without_resetting_reps() {
        let state = SrsState {
            lapses: 1,
            ..state_with(6, 30.0, 2.5)
        };
        let next = grade_card(&state, Grade::Again, Utc::now());

        assert_eq!(next.reps, 6);
        assert_eq!(next.lapses, 2);
        assert_eq!(next.interval_days, 1.0);
        assert!((next.ease_factor - 2.3).abs() < 1e-9);
        assert!(!next.is_new());
    }

    #[test]
    fn test_again_on_new_card_keeps_it_new() {
        let next = grade_card(&state_with(0, 0.0, 2.5), Grade::Again, Utc::now());
        assert!(next.is_new());
        assert_eq!(next.lapses, 1);
    }

    #[test]
    fn test_ease_stays_in_bounds() {
        let now = Utc::now();

        let mut state = state_with(3, 5.0, 1.4);
        for _ in 0..5 {
            state = grade_card(&state, Grade::Again, now);
            assert!(state.ease_factor >= MIN_EASE_FACTOR);
        }

        let mut state = state_with(3, 5.0, 2.9);
        for _ in 0..5 {
            state = grade_card(&state, Grade::Easy, now);
            assert!(state.ease_factor <= MAX_EASE_FACTOR);
        }
    }

    #[test]
    fn test_counters_never_decrease() {
        let now = Utc::now();
        let mut state = state_with(0, 0.0, 2.5);
        for grade in [Grade::Good, Grade::Again, Grade::Hard, Grade::Easy, Grade::Again] {
            let next = grade_card(&state, grade, now);
            assert!(next.reps >= state.reps);
            assert!(next.lapses >= state.lapses);
            assert!(next.due_at > now);
            state = next;
        }
    }

    #[test]
    fn test_repeated_easy_caps_interval() {
        let now = Utc::now();
        let mut state = state_with(1, 1.0, 2.5);
        for _ in 0..40 {
            state = grade_card(&state, Grade::Easy, now);
            assert!(state.interval_days <= MAX_INTERVAL_DAYS);
            assert!(state.due_at > now);
        }

        assert_eq!(state.interval_days, MAX_INTERVAL_DAYS);
        assert_eq!(state.due_at, now + Duration::days(36_500));
    }

    #[test]
    fn test_huge_stored_interval_is_capped() {
        let now = Utc::now();
        let next = grade_card(&state_with(5, 1.0e8, 2.5), Grade::Good, now);

        assert_eq!(next.reps, 6);
        assert_eq!(next.interval_days, MAX_INTERVAL_DAYS);
        assert_eq!(next.due_at, now + Duration::days(36_500));
    }

    #[test]
    fn test_due_at_saturates_past_calendar_range() {
        let config = SchedulerConfig {
            max_interval_days: 1.0e12,
            ..SchedulerConfig::default()
        };
        let next = grade_with(&config, &state_with(5, 1.0e12, 2.5), Grade::Good, Utc::now());

        assert_eq!(next.interval_days, 1.0e12);
        assert_eq!(next.due_at, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_preview_intervals_ordering() {
        let preview = preview_intervals(&state_with(4, 10.0, 2.5), Utc::now());
        assert_eq!(preview[0], 1.0);
        assert!(preview[1] <= preview[2]);
        assert!(preview[2] <= preview[3]);
    }

    #[test]
    fn test_parse_grade() {
        assert_eq!("good".parse::<Grade>(), Ok(Grade::Good));
        assert_eq!("AGAIN".parse::<Grade>(), Ok(Grade::Again));
        assert_eq!("4".parse::<Grade>(), Ok(Grade::Easy));
        assert!("perfect".parse::<Grade>().is_err());
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(0.0), "now");
        assert_eq!(format_interval(1.0), "1d");
        assert_eq!(format_interval(5.0), "5d");
        assert_eq!(format_interval(7.0), "1w");
        assert_eq!(format_interval(14.0), "2w");
        assert_eq!(format_interval(30.0), "1mo");
        assert_eq!(format_interval(90.0), "3mo");
        assert_eq!(format_interval(365.0), "1y");
        assert_eq!(format_interval(730.0), "2y");
    }
}
