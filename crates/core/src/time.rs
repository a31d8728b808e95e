use chrono::{DateTime, Duration, Utc};

/// Source of session timestamps. The engine reads the wall clock through
/// this so tests can pin time.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    /// Current UTC time.
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Returns the current time according to the clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// If this is a fixed clock, advance it by the given duration.
    ///
    /// Has no effect on `Clock::System`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }

    /// Time elapsed since `start`, clamped at zero.
    #[must_use]
    pub fn elapsed_since(&self, start: DateTime<Utc>) -> Duration {
        (self.now() - start).max(Duration::zero())
    }
}

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_measured_from_start() {
        let mut clock = fixed_clock();
        clock.advance(Duration::seconds(90));
        assert_eq!(clock.elapsed_since(fixed_now()), Duration::seconds(90));
    }

    #[test]
    fn system_clock_is_the_default_and_ignores_advance() {
        let mut clock = Clock::default();
        assert!(matches!(clock, Clock::System));

        let before = Utc::now();
        clock.advance(Duration::days(1));
        let now = clock.now();
        assert!(now >= before);
        assert!(now < before + Duration::hours(1));
    }

    #[test]
    fn elapsed_never_goes_negative() {
        let clock = fixed_clock();
        let later = fixed_now() + Duration::minutes(5);
        assert_eq!(clock.elapsed_since(later), Duration::zero());
    }
}
