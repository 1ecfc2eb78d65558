//! Time-based record ids: UTC epoch milliseconds as a decimal string,
//! bumped by one when two records are created within the same millisecond.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Seeds the generator past every numeric id already issued.
    pub fn resume_after<'a>(existing: impl IntoIterator<Item = &'a str>) -> Self {
        let last = existing
            .into_iter()
            .filter_map(|id| id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        Self { last }
    }

    pub fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis();
        self.last = millis.max(self.last + 1);
        self.last.to_string()
    }
}
