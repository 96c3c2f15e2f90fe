// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `MyQ` Lib - Device state normalization for Chamberlain `MyQ` devices.
//!
//! This library turns the device descriptors a home automation host
//! receives for `MyQ` garage door openers and lights into immutable
//! snapshots, and derives the status values the host shows for them.
//!
//! Network transport, authentication and discovery against the vendor
//! cloud are left to the host and its API client.
//!
//! # Supported Inputs
//!
//! - **Flat property maps**: the host's stored device properties
//! - **JSON device documents**: one device of the vendor device list
//! - **Device lists**: a JSON array, or an object with an `items` array
//!
//! # Quick Start
//!
//! ```
//! use myq_lib::{DeviceStateNormalizer, HandlerKind};
//! use myq_lib::types::{OnOff, OpenClosed, Percent};
//!
//! let normalizer = DeviceStateNormalizer::new();
//!
//! let snapshot = normalizer.from_structured_payload(&serde_json::json!({
//!     "serial": "CG0812345678",
//!     "type": "wifigaragedooropener",
//!     "family": "garagedoor",
//!     "name": "Garage",
//!     "state": {"doorState": "closed", "online": "true"}
//! }))?;
//!
//! assert_eq!(snapshot.handler_kind(), Some(HandlerKind::DoorOpener));
//! assert_eq!(snapshot.door_on_off(), OnOff::Off);
//! assert_eq!(snapshot.door_status_percent(), Percent::HUNDRED);
//! assert_eq!(snapshot.door_closed_contact(), OpenClosed::Closed);
//!
//! // Persist to host storage and read it back
//! let props = snapshot.to_property_map();
//! assert_eq!(normalizer.from_flat_properties(&props)?, snapshot);
//! # Ok::<(), myq_lib::Error>(())
//! ```
//!
//! ## Tracing Parse Diagnostics
//!
//! ```
//! use myq_lib::{DeviceStateNormalizer, TracingObserver};
//!
//! let normalizer = DeviceStateNormalizer::new().with_observer(TracingObserver);
//! let snapshot = normalizer.from_json_str(r#"{"serial":"LM1","state":{"lampState":"on"}}"#)?;
//! assert!(snapshot.is_valid());
//! # Ok::<(), myq_lib::Error>(())
//! ```

mod config;
pub mod error;
mod handler;
mod normalizer;
pub mod observer;
pub mod snapshot;
mod store;
pub mod types;

pub use config::{NormalizerConfig, PayloadShape};
pub use error::{Error, ParseError, Result, ValueError};
pub use handler::HandlerKind;
pub use normalizer::DeviceStateNormalizer;
pub use observer::{ParseEvent, ParseObserver, TracingObserver};
pub use snapshot::{DeviceStateSnapshot, PropertyMap};
pub use store::SnapshotStore;
pub use types::{OnOff, OnlineStatus, OpenClosed, Percent};
