//! Time source used to stamp file modification times

use std::fmt::Debug;
use std::time::SystemTime;

/// Supplies the current time to a file system
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> SystemTime;
}

/// The host's wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Always reports the same instant, for tests where time does not matter
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub SystemTime);

impl Default for FixedClock {
    fn default() -> Self {
        FixedClock(SystemTime::UNIX_EPOCH)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        self.0
    }
}
