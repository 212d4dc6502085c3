//! Scheduling constants and their environment overrides

use serde::Deserialize;

use crate::error::ConfigError;

/// Lowest ease factor grading may produce
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Ease factor assigned to a new card
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Highest ease factor grading may produce
pub const MAX_EASE_FACTOR: f64 = 3.0;

/// Interval (days) at which a card counts as mature
pub const MATURE_THRESHOLD_DAYS: f64 = 21.0;

/// New cards introduced per day when the caller sets no cap
pub const DEFAULT_NEW_CARDS_PER_DAY: u32 = 20;

/// Forgetting-curve decay constant `k`
///
/// Must exceed `ln 2` so a card overdue by one full interval falls below
/// 50% retention.
pub const DECAY_CONSTANT: f64 = 1.0;

/// Longest interval (days) grading may schedule, about a century
pub const MAX_INTERVAL_DAYS: f64 = 36_500.0;

/// Environment variable prefix for [`SchedulerConfig::from_env`]
pub const ENV_PREFIX: &str = "RECALL_";

/// Numeric constants the scheduler works with
///
/// # Environment Variables
/// - `RECALL_DECAY_CONSTANT`
/// - `RECALL_MATURE_THRESHOLD_DAYS`
/// - `RECALL_NEW_CARDS_PER_DAY`
/// - `RECALL_MIN_EASE`, `RECALL_INITIAL_EASE`, `RECALL_MAX_EASE`
/// - `RECALL_MAX_INTERVAL_DAYS`
///
/// Unset variables keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Forgetting-curve decay constant
    pub decay_constant: f64,
    /// Interval in days from which a card is mature
    pub mature_threshold_days: f64,
    /// Default daily cap on new cards
    pub new_cards_per_day: u32,
    /// Lower ease bound
    pub min_ease: f64,
    /// Ease of a never-reviewed card
    pub initial_ease: f64,
    /// Upper ease bound
    pub max_ease: f64,
    /// Cap on the interval grading may produce
    pub max_interval_days: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            decay_constant: DECAY_CONSTANT,
            mature_threshold_days: MATURE_THRESHOLD_DAYS,
            new_cards_per_day: DEFAULT_NEW_CARDS_PER_DAY,
            min_ease: MIN_EASE_FACTOR,
            initial_ease: INITIAL_EASE_FACTOR,
            max_ease: MAX_EASE_FACTOR,
            max_interval_days: MAX_INTERVAL_DAYS,
        }
    }
}

impl SchedulerConfig {
    /// Load overrides from `RECALL_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: Self = envy::prefixed(ENV_PREFIX).from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load overrides from an explicit set of variables
    ///
    /// Keys carry the `RECALL_` prefix, exactly as in the process environment.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the constants describe a usable model
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.decay_constant > std::f64::consts::LN_2 && self.decay_constant.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "decay_constant must be a finite value above ln 2, got {}",
                self.decay_constant
            )));
        }

        if !(self.mature_threshold_days > 0.0 && self.mature_threshold_days.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "mature_threshold_days must be positive, got {}",
                self.mature_threshold_days
            )));
        }

        if !(self.min_ease > 0.0
            && self.min_ease <= self.initial_ease
            && self.initial_ease <= self.max_ease
            && self.max_ease.is_finite())
        {
            return Err(ConfigError::Invalid(format!(
                "ease bounds must satisfy 0 < min <= initial <= max, got {} / {} / {}",
                self.min_ease, self.initial_ease, self.max_ease
            )));
        }

        if !(self.max_interval_days >= 1.0 && self.max_interval_days.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "max_interval_days must be a finite value of at least 1, got {}",
                self.max_interval_days
            )));
        }

        Ok(())
    }

    /// Clamp an ease factor into the configured bounds
    pub fn clamp_ease(&self, ease: f64) -> f64 {
        ease.clamp(self.min_ease, self.max_ease)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = SchedulerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.new_cards_per_day, 20);
        assert_eq!(config.mature_threshold_days, 21.0);
    }

    #[test]
    fn test_from_vars_overrides_and_defaults() {
        let config = SchedulerConfig::from_vars(vars(&[
            ("RECALL_NEW_CARDS_PER_DAY", "5"),
            ("RECALL_MATURE_THRESHOLD_DAYS", "30"),
            ("UNRELATED", "x"),
        ]))
        .unwrap();

        assert_eq!(config.new_cards_per_day, 5);
        assert_eq!(config.mature_threshold_days, 30.0);
        assert_eq!(config.decay_constant, DECAY_CONSTANT);
        assert_eq!(config.max_ease, MAX_EASE_FACTOR);
    }

    #[test]
    fn test_invalid_ease_bounds_rejected() {
        let result = SchedulerConfig::from_vars(vars(&[
            ("RECALL_MIN_EASE", "2.8"),
            ("RECALL_MAX_EASE", "2.0"),
        ]));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_weak_decay_rejected() {
        let config = SchedulerConfig {
            decay_constant: 0.5,
            ..SchedulerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_interval_bounds() {
        let config = SchedulerConfig::from_vars(vars(&[("RECALL_MAX_INTERVAL_DAYS", "365")])).unwrap();
        assert_eq!(config.max_interval_days, 365.0);

        let result = SchedulerConfig::from_vars(vars(&[("RECALL_MAX_INTERVAL_DAYS", "0.5")]));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let config = SchedulerConfig {
            max_interval_days: f64::INFINITY,
            ..SchedulerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unparseable_value_rejected() {
        let result = SchedulerConfig::from_vars(vars(&[("RECALL_NEW_CARDS_PER_DAY", "many")]));
        assert!(matches!(result, Err(ConfigError::Env(_))));
    }

    #[test]
    fn test_clamp_ease() {
        let config = SchedulerConfig::default();
        assert_eq!(config.clamp_ease(0.9), MIN_EASE_FACTOR);
        assert_eq!(config.clamp_ease(2.2), 2.2);
        assert_eq!(config.clamp_ease(4.0), MAX_EASE_FACTOR);
    }
}
