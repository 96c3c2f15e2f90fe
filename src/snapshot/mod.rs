// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state snapshots.
//!
//! A [`DeviceStateSnapshot`] holds the canonical state of one device and
//! derives the host status values from it. Snapshots are produced by the
//! [`DeviceStateNormalizer`](crate::DeviceStateNormalizer) and written back
//! to host storage through [`DeviceStateSnapshot::to_property_map`].
//!
//! # Examples
//!
//! ```
//! use myq_lib::DeviceStateSnapshot;
//! use myq_lib::types::OnOff;
//!
//! let lamp = DeviceStateSnapshot::new("LM1234", "lamp", "Porch", "on", true);
//! assert_eq!(lamp.light_on_off(), OnOff::On);
//!
//! let map = lamp.to_property_map();
//! assert_eq!(map["state"], "on");
//! ```

mod device_snapshot;
pub mod keys;

pub use device_snapshot::{DOOR_CLOSED, DOOR_OPEN, DeviceStateSnapshot, LAMP_ON, PropertyMap};
