// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Latest snapshot per device.
//!
//! The [`SnapshotStore`] keeps the most recent [`DeviceStateSnapshot`] for
//! each serial number. Every update replaces the previous snapshot wholesale;
//! snapshots are never modified in place.
//!
//! ```text
//! vendor cloud update
//!         ↓
//! DeviceStateNormalizer::from_structured_payload()
//!         ↓
//! SnapshotStore::update()  →  previous snapshot returned and dropped
//!         ↓
//! device wrapper reads snapshot.door_status_percent(), ...
//! ```

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::snapshot::DeviceStateSnapshot;

/// Thread-safe map from serial number to the latest snapshot.
///
/// # Examples
///
/// ```
/// use myq_lib::{DeviceStateSnapshot, SnapshotStore};
///
/// let store = SnapshotStore::new();
///
/// store.update(DeviceStateSnapshot::new("S1", "lamp", "Porch", "off", true)).unwrap();
/// let previous = store
///     .update(DeviceStateSnapshot::new("S1", "lamp", "Porch", "on", true))
///     .unwrap();
///
/// assert_eq!(previous.unwrap().state(), "off");
/// assert_eq!(store.get("S1").unwrap().state(), "on");
/// ```
#[derive(Debug, Default)]
pub struct SnapshotStore {
    snapshots: RwLock<HashMap<String, DeviceStateSnapshot>>,
}

impl SnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a snapshot, replacing the one with the same serial number.
    ///
    /// Returns the replaced snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSnapshot` if the snapshot has no serial number.
    pub fn update(&self, snapshot: DeviceStateSnapshot) -> Result<Option<DeviceStateSnapshot>> {
        if !snapshot.is_valid() {
            tracing::warn!(name = %snapshot.name(), "Rejecting snapshot without serial number");
            return Err(Error::InvalidSnapshot(format!(
                "device {:?} has no serial number",
                snapshot.name()
            )));
        }

        let serial = snapshot.serial_number().to_string();
        let previous = self.snapshots.write().insert(serial.clone(), snapshot);
        if let Some(old) = &previous {
            tracing::debug!(
                serial = %serial,
                previous_state = %old.state(),
                "Superseded device snapshot"
            );
        } else {
            tracing::debug!(serial = %serial, "Stored first device snapshot");
        }
        Ok(previous)
    }

    /// Stores every snapshot of a device list refresh.
    ///
    /// Invalid snapshots are skipped. Returns the number of stored snapshots.
    pub fn update_all(&self, snapshots: impl IntoIterator<Item = DeviceStateSnapshot>) -> usize {
        snapshots
            .into_iter()
            .filter_map(|snapshot| self.update(snapshot).ok())
            .count()
    }

    /// Returns a copy of the latest snapshot for a serial number.
    #[must_use]
    pub fn get(&self, serial: &str) -> Option<DeviceStateSnapshot> {
        self.snapshots.read().get(serial).cloned()
    }

    /// Removes the snapshot for a serial number.
    pub fn remove(&self, serial: &str) -> Option<DeviceStateSnapshot> {
        tracing::debug!(serial = %serial, "Removing device snapshot");
        self.snapshots.write().remove(serial)
    }

    /// Returns the serial numbers of all stored devices, sorted.
    #[must_use]
    pub fn serials(&self) -> Vec<String> {
        let mut serials: Vec<String> = self.snapshots.read().keys().cloned().collect();
        serials.sort();
        serials
    }

    /// Returns the number of stored devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.read().len()
    }

    /// Returns `true` if no device is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.read().is_empty()
    }
}
