use std::path::PathBuf;

use tokio::fs;

use crate::models::{now_rfc3339, Appointment};

/// Local Booking Ledger: a per-device record of the appointments an
/// anonymous visitor created, keyed by agent. One JSON file per agent
/// under the device directory. This is a convenience cache, not a system
/// of record: every failure reads as "no data" and is never surfaced.
#[derive(Clone)]
pub struct BookingLedger {
    base_path: PathBuf,
}

impl BookingLedger {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Scope the ledger to one device. Device ids come from an
    /// attacker-controlled cookie; anything that is not a plain
    /// identifier maps to a throwaway directory instead of a path.
    pub fn for_device(&self, device_id: &str) -> BookingLedger {
        let device_id = if is_plain_identifier(device_id) {
            device_id
        } else {
            "unknown-device"
        };

        BookingLedger {
            base_path: self.base_path.join(device_id),
        }
    }

    /// Append a freshly created appointment to the agent's list.
    pub async fn record(&self, agent_id: &str, appointment: &Appointment) {
        let Some(path) = self.entry_path(agent_id) else {
            return;
        };

        let mut entries = self.read_entries(&path).await;
        entries.push(appointment.clone());

        if let Err(e) = self.write_entries(&path, &entries).await {
            tracing::warn!("Failed to record booking in local ledger: {}", e);
        }
    }

    /// The visitor's upcoming bookings for this agent, earliest first.
    /// Past entries are pruned and the pruned list is written back, so
    /// storage only ever holds future bookings after a read.
    pub async fn list(&self, agent_id: &str) -> Vec<Appointment> {
        let Some(path) = self.entry_path(agent_id) else {
            return Vec::new();
        };

        let entries = self.read_entries(&path).await;
        let now = now_rfc3339();

        let mut upcoming: Vec<Appointment> = entries
            .iter()
            .filter(|a| a.start_at > now)
            .cloned()
            .collect();

        if upcoming.len() != entries.len() {
            if let Err(e) = self.write_entries(&path, &upcoming).await {
                tracing::warn!("Failed to prune local ledger: {}", e);
            }
        }

        upcoming.sort_by(|a, b| a.start_at.cmp(&b.start_at));

        upcoming
    }

    async fn read_entries(&self, path: &PathBuf) -> Vec<Appointment> {
        let Ok(text) = fs::read_to_string(path).await else {
            return Vec::new();
        };

        // A corrupt payload is discarded entirely, not partially repaired.
        serde_json::from_str(&text).unwrap_or_default()
    }

    async fn write_entries(
        &self,
        path: &PathBuf,
        entries: &[Appointment],
    ) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let text = serde_json::to_string(entries).map_err(std::io::Error::other)?;
        fs::write(path, text).await
    }

    fn entry_path(&self, agent_id: &str) -> Option<PathBuf> {
        if !is_plain_identifier(agent_id) {
            return None;
        }

        Some(self.base_path.join(format!("{}.json", agent_id)))
    }
}

fn is_plain_identifier(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
