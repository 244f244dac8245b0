use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreshnessState {
    Fresh,
    Stale,
    Offline,
}

#[derive(Debug, Clone)]
pub struct RefreshMetadata {
    pub last_success: Option<DateTime<Utc>>,
    pub last_attempt: Option<DateTime<Utc>>,
    pub state: FreshnessState,
    pub consecutive_failures: u32,
}

impl Default for RefreshMetadata {
    fn default() -> Self {
        Self {
            last_success: None,
            last_attempt: None,
            state: FreshnessState::Stale,
            consecutive_failures: 0,
        }
    }
}

impl RefreshMetadata {
    pub fn mark_success(&mut self, now: DateTime<Utc>) {
        self.last_attempt = Some(now);
        self.last_success = Some(now);
        self.consecutive_failures = 0;
        self.state = FreshnessState::Fresh;
    }

    pub fn mark_failure(&mut self, now: DateTime<Utc>) {
        self.last_attempt = Some(now);
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.reevaluate(now);
    }

    pub fn reevaluate(&mut self, now: DateTime<Utc>) {
        self.state = evaluate_freshness(now, self.last_success, self.consecutive_failures);
    }

    #[must_use]
    pub fn age_minutes(&self, now: DateTime<Utc>) -> Option<i64> {
        self.last_success.map(|ts| (now - ts).num_minutes())
    }
}

const STALE_AFTER_MINUTES: i64 = 10;
const OFFLINE_AFTER_MINUTES: i64 = 30;
const OFFLINE_AFTER_FAILURES: u32 = 3;

#[must_use]
pub fn evaluate_freshness(
    now: DateTime<Utc>,
    last_success: Option<DateTime<Utc>>,
    consecutive_failures: u32,
) -> FreshnessState {
    let Some(last_success) = last_success else {
        return if consecutive_failures >= OFFLINE_AFTER_FAILURES {
            FreshnessState::Offline
        } else {
            FreshnessState::Stale
        };
    };

    let age = now - last_success;

    if age > Duration::minutes(OFFLINE_AFTER_MINUTES)
        || consecutive_failures >= OFFLINE_AFTER_FAILURES
    {
        FreshnessState::Offline
    } else if age > Duration::minutes(STALE_AFTER_MINUTES) || consecutive_failures >= 1 {
        FreshnessState::Stale
    } else {
        FreshnessState::Fresh
    }
}
