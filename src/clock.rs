use chrono::{DateTime, Local, NaiveDate};

/// Abstraction over "current time" to make behavior deterministic in tests.
///
/// The report console renders timestamps in its own local time, so the run
/// date used for filtering is local rather than UTC.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

#[derive(Debug, Clone)]
pub struct FixedClock {
    now: DateTime<Local>,
}

impl FixedClock {
    pub fn new(now: DateTime<Local>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.now
    }
}
