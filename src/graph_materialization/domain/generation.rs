use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generation value object identifying one materialization run's output
///
/// Downstream readers use the number to tell which set of paths is current;
/// numbers only ever increase for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    number: i64,
    run_id: Uuid,
    created_at: DateTime<Utc>,
}

impl Generation {
    pub fn new(number: i64, run_id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            number,
            run_id,
            created_at,
        }
    }

    /// Starts a new generation at `now`.
    ///
    /// The number is the timestamp in milliseconds, bumped past `previous`
    /// when the clock went backwards between runs.
    pub fn start(now: DateTime<Utc>, previous: Option<&Generation>) -> Self {
        let mut number = now.timestamp_millis();
        if let Some(previous) = previous {
            if number <= previous.number {
                number = previous.number.saturating_add(1);
            }
        }
        Self::new(number, Uuid::new_v4(), now)
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number)
    }
}
