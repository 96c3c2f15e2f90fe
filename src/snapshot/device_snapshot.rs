// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Immutable device state snapshot.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::handler::HandlerKind;
use crate::types::{OnOff, OnlineStatus, OpenClosed, Percent};

use super::keys;

/// Flat property mapping, keyed by the tags in [`keys`].
pub type PropertyMap = BTreeMap<String, String>;

/// Door status token for a fully closed door.
pub const DOOR_CLOSED: &str = "closed";

/// Door status token for a fully open door.
pub const DOOR_OPEN: &str = "open";

/// Lamp status token for a light that is on.
pub const LAMP_ON: &str = "on";

/// Canonical state of a single `MyQ` device.
///
/// A snapshot is a value object: it is rebuilt from every update and replaces
/// the previous snapshot for the same serial number. The `state` token is
/// kept as reported; the accessors interpret it according to the device kind.
///
/// Status tokens are matched exactly, so `"Closed"` is not a closed door.
///
/// # Examples
///
/// ```
/// use myq_lib::DeviceStateSnapshot;
/// use myq_lib::types::{OnOff, OpenClosed, Percent};
///
/// let snapshot = DeviceStateSnapshot::new("CG0812345678", "garagedooropener", "Garage", "closed", true);
///
/// assert!(snapshot.is_door_closed());
/// assert_eq!(snapshot.door_on_off(), OnOff::Off);
/// assert_eq!(snapshot.door_status_percent(), Percent::HUNDRED);
/// assert_eq!(snapshot.door_closed_contact(), OpenClosed::Closed);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceStateSnapshot {
    serial_number: String,
    device_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    device_family: Option<String>,
    name: String,
    state: String,
    online: bool,
}

impl DeviceStateSnapshot {
    /// Creates a snapshot without a family classification.
    #[must_use]
    pub fn new(
        serial_number: impl Into<String>,
        device_type: impl Into<String>,
        name: impl Into<String>,
        state: impl Into<String>,
        online: bool,
    ) -> Self {
        Self {
            serial_number: serial_number.into(),
            device_type: device_type.into(),
            device_family: None,
            name: name.into(),
            state: state.into(),
            online,
        }
    }

    /// Sets the vendor family classification.
    #[must_use]
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.device_family = Some(family.into());
        self
    }

    /// Returns `true` if the snapshot carries a serial number.
    ///
    /// Snapshots derived from untrusted input must be checked before use.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.serial_number.is_empty()
    }

    // ========== Fields ==========

    /// Returns the serial number.
    #[must_use]
    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    /// Returns the vendor device-type tag.
    #[must_use]
    pub fn device_type(&self) -> &str {
        &self.device_type
    }

    /// Returns the vendor family, if the payload carried one.
    #[must_use]
    pub fn device_family(&self) -> Option<&str> {
        self.device_family.as_deref()
    }

    /// Returns the device name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw status token.
    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the connectivity flag.
    #[must_use]
    pub fn online(&self) -> bool {
        self.online
    }

    // ========== Door ==========

    /// Returns `true` if the status token is exactly `"closed"`.
    #[must_use]
    pub fn is_door_closed(&self) -> bool {
        self.state == DOOR_CLOSED
    }

    /// Returns `true` if the status token is exactly `"open"`.
    #[must_use]
    pub fn is_door_open(&self) -> bool {
        self.state == DOOR_OPEN
    }

    /// Door state as a switch: off when closed, on otherwise.
    ///
    /// Unknown and in-transit states report [`OnOff::On`].
    #[must_use]
    pub fn door_on_off(&self) -> OnOff {
        if self.is_door_closed() {
            OnOff::Off
        } else {
            OnOff::On
        }
    }

    /// Door position: 0% when open, 100% when closed, 50% otherwise.
    #[must_use]
    pub fn door_status_percent(&self) -> Percent {
        if self.is_door_open() {
            Percent::ZERO
        } else if self.is_door_closed() {
            Percent::HUNDRED
        } else {
            Percent::HALF
        }
    }

    /// Contact that closes when the door is closed.
    #[must_use]
    pub fn door_closed_contact(&self) -> OpenClosed {
        if self.is_door_closed() {
            OpenClosed::Closed
        } else {
            OpenClosed::Open
        }
    }

    /// Contact that closes when the door is open.
    ///
    /// Reports [`OpenClosed::Closed`] only for an open door; every other
    /// state, including a closed door, reports [`OpenClosed::Open`].
    #[must_use]
    pub fn door_open_contact(&self) -> OpenClosed {
        if self.is_door_open() {
            OpenClosed::Closed
        } else {
            OpenClosed::Open
        }
    }

    // ========== Light ==========

    /// Light state: on only for the exact token `"on"`.
    #[must_use]
    pub fn light_on_off(&self) -> OnOff {
        if self.state == LAMP_ON {
            OnOff::On
        } else {
            OnOff::Off
        }
    }

    // ========== Connectivity ==========

    /// Returns the host connectivity status.
    #[must_use]
    pub fn online_status(&self) -> OnlineStatus {
        OnlineStatus::from(self.online)
    }

    /// Returns the wrapper kind for this device.
    ///
    /// The family tag is preferred; the device type is used when the family
    /// is absent or unknown.
    #[must_use]
    pub fn handler_kind(&self) -> Option<HandlerKind> {
        self.device_family
            .as_deref()
            .and_then(HandlerKind::from_vendor_family)
            .or_else(|| HandlerKind::from_vendor_family(&self.device_type))
    }

    /// Serializes the snapshot into the flat property shape.
    ///
    /// Values are written in canonical form: without quote characters, and
    /// with the online flag as lowercase `"true"` or `"false"`. A map that
    /// was already canonical comes back unchanged.
    ///
    /// The result can be fed back to
    /// [`DeviceStateNormalizer::from_flat_properties`](crate::DeviceStateNormalizer::from_flat_properties).
    #[must_use]
    pub fn to_property_map(&self) -> PropertyMap {
        let mut properties = PropertyMap::new();
        properties.insert(keys::TYPE.to_string(), self.device_type.clone());
        properties.insert(keys::SERIAL.to_string(), self.serial_number.clone());
        properties.insert(keys::STATE.to_string(), self.state.clone());
        properties.insert(keys::NAME.to_string(), self.name.clone());
        properties.insert(keys::ONLINE.to_string(), self.online.to_string());
        if let Some(family) = &self.device_family {
            properties.insert(keys::FAMILY.to_string(), family.clone());
        }
        properties
    }
}

impl fmt::Display for DeviceStateSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Device Serial: {}", self.serial_number)?;
        writeln!(f, "Device Type: {}", self.device_type)?;
        if let Some(family) = &self.device_family {
            writeln!(f, "Device Family: {family}")?;
        }
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "State: {}", self.state)?;
        write!(f, "Online: {}", self.online)
    }
}
