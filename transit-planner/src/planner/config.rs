//! Search configuration for the trip planner.

use chrono::Duration;

/// What to do when the start and destination are the same station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameStationPolicy {
    /// Answer with the trivial zero-cost trip.
    #[default]
    Allow,
    /// Refuse the query.
    Reject,
}

/// A configuration value the search cannot work with.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A negative penalty makes line changes profitable and the search
    /// would cycle forever
    #[error("transfer penalty must be finite and non-negative, got {0}")]
    InvalidTransferPenalty(f64),

    /// Travel time estimates divide by the speed
    #[error("average speed must be finite and positive, got {0}")]
    InvalidAverageSpeed(f64),
}

/// Configuration parameters for trip search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Cost added for every change of line, in kilometers.
    /// Calibrated to roughly 5-10 minutes of travel.
    pub transfer_penalty_km: f64,

    /// Maximum number of queue pops before giving up.
    /// `None` searches until the queue is exhausted.
    pub max_iterations: Option<usize>,

    /// Whether identical endpoints are a valid query.
    pub same_station: SameStationPolicy,

    /// Average vehicle speed used for travel time estimates (km/h).
    pub average_speed_kmh: f64,

    /// How many station names to list in suggestions and errors.
    pub suggestion_limit: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the penalty is negative or not finite, or
    /// the speed is not a finite positive number.
    pub fn new(
        transfer_penalty_km: f64,
        max_iterations: Option<usize>,
        same_station: SameStationPolicy,
        average_speed_kmh: f64,
        suggestion_limit: usize,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            transfer_penalty_km,
            max_iterations,
            same_station,
            average_speed_kmh,
            suggestion_limit,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the numeric fields.
    ///
    /// The fields are public, so the search re-checks before running.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.transfer_penalty_km.is_finite() || self.transfer_penalty_km < 0.0 {
            return Err(ConfigError::InvalidTransferPenalty(self.transfer_penalty_km));
        }
        if !self.average_speed_kmh.is_finite() || self.average_speed_kmh <= 0.0 {
            return Err(ConfigError::InvalidAverageSpeed(self.average_speed_kmh));
        }
        Ok(())
    }

    /// Read overrides from the environment on top of the defaults.
    ///
    /// Recognizes `TRANSFER_PENALTY_KM`, `MAX_SEARCH_ITERATIONS` and
    /// `AVERAGE_SPEED_KMH`. Unset or unparseable values keep the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("TRANSFER_PENALTY_KM").and_then(|v| v.parse::<f64>().ok())
            && v.is_finite()
            && v >= 0.0
        {
            config.transfer_penalty_km = v;
        }
        if let Some(v) = lookup("MAX_SEARCH_ITERATIONS").and_then(|v| v.parse().ok()) {
            config.max_iterations = Some(v);
        }
        if let Some(v) = lookup("AVERAGE_SPEED_KMH").and_then(|v| v.parse::<f64>().ok())
            && v.is_finite()
            && v > 0.0
        {
            config.average_speed_kmh = v;
        }

        config
    }

    pub fn with_transfer_penalty(mut self, km: f64) -> Self {
        self.transfer_penalty_km = km;
        self
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = Some(max);
        self
    }

    pub fn with_same_station(mut self, policy: SameStationPolicy) -> Self {
        self.same_station = policy;
        self
    }

    /// Estimated travel time for a trip with the given cost.
    ///
    /// Rounded to the nearest minute. Saturates at `Duration::MAX` when
    /// the estimate does not fit.
    pub fn travel_time(&self, cost_km: f64) -> Duration {
        let minutes = (cost_km / self.average_speed_kmh * 60.0).round();
        if !minutes.is_finite() || minutes.abs() >= i64::MAX as f64 {
            return Duration::MAX;
        }
        Duration::try_minutes(minutes as i64).unwrap_or(Duration::MAX)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            transfer_penalty_km: 5.0,
            max_iterations: None,
            same_station: SameStationPolicy::Allow,
            average_speed_kmh: 26.0,
            suggestion_limit: 10,
        }
    }
}
