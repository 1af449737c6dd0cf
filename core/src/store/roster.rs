//! Roster persistence under a single key, as a JSON array of employees.

use super::RosterStore;
use crate::{
    error::{GapError, GapResult},
    roster::{Employee, Roster},
};
use chrono::{DateTime, Utc};

pub const ROSTER_KEY: &str = "employees";

impl RosterStore {
    /// Load the roster. No stored value, or a value that is not a JSON
    /// array, yields an empty roster. Individual records that fail to
    /// parse are skipped.
    pub fn load_roster(&self) -> GapResult<Roster> {
        let Some(raw) = self.get_value(ROSTER_KEY)? else {
            log::debug!("No stored roster, starting empty");
            return Ok(Roster::new());
        };
        let (roster, skipped) = decode_roster(&raw);
        for err in &skipped {
            log::warn!("Skipping stored record: {err}");
        }
        log::debug!("Loaded {} employees", roster.len());
        Ok(roster)
    }

    pub fn save_roster(&self, roster: &Roster) -> GapResult<()> {
        let json = serde_json::to_string(roster)?;
        self.put_value(ROSTER_KEY, &json)?;
        log::info!("Saved roster ({} employees)", roster.len());
        Ok(())
    }

    pub fn roster_saved_at(&self) -> GapResult<Option<DateTime<Utc>>> {
        self.saved_at(ROSTER_KEY)
    }
}

/// Decode a stored roster, tolerating damage.
///
/// Returns the recovered roster plus one `MalformedRecord` per record that
/// could not be read. A value that is not an array at all recovers nothing.
pub fn decode_roster(raw: &str) -> (Roster, Vec<GapError>) {
    let records: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(records) => records,
        Err(e) => {
            let err = GapError::MalformedRecord {
                location: "stored roster".into(),
                reason: e.to_string(),
            };
            return (Roster::new(), vec![err]);
        }
    };

    let mut employees = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Employee>(record) {
            Ok(employee) => employees.push(employee),
            Err(e) => skipped.push(GapError::MalformedRecord {
                location: format!("stored record {index}"),
                reason: e.to_string(),
            }),
        }
    }
    (Roster::from(employees), skipped)
}
