// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Selection of the device wrapper that owns a device.
//!
//! A host integrates `MyQ` devices through three kinds of wrappers: the
//! gateway (the bridge to the vendor cloud account), door openers, and
//! lights. [`HandlerKind`] maps the host's thing-type tags and the vendor's
//! family tags onto these kinds.
//!
//! # Examples
//!
//! ```
//! use myq_lib::HandlerKind;
//!
//! assert_eq!(HandlerKind::from_thing_type("light"), Some(HandlerKind::Light));
//! assert_eq!(HandlerKind::from_thing_type("thermostat"), None);
//!
//! // Gateways are configured manually, devices are discovered.
//! assert!(!HandlerKind::Gateway.is_discoverable());
//! assert!(HandlerKind::DoorOpener.is_discoverable());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of device wrapper the host should instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    /// Bridge to a vendor cloud account; owns the device list.
    Gateway,
    /// Garage door or gate opener.
    DoorOpener,
    /// Lamp or light module.
    Light,
}

impl HandlerKind {
    /// All handler kinds, bridge first.
    pub const ALL: [Self; 3] = [Self::Gateway, Self::DoorOpener, Self::Light];

    /// Thing-type tag of the gateway.
    pub const THING_TYPE_GATEWAY: &'static str = "gateway";

    /// Thing-type tag of door openers.
    pub const THING_TYPE_DOOR_OPENER: &'static str = "dooropener";

    /// Thing-type tag of lights.
    pub const THING_TYPE_LIGHT: &'static str = "light";

    /// Selects the handler kind for a host thing-type tag.
    ///
    /// Tags are matched exactly. Returns `None` for unsupported tags.
    #[must_use]
    pub fn from_thing_type(tag: &str) -> Option<Self> {
        match tag {
            Self::THING_TYPE_GATEWAY => Some(Self::Gateway),
            Self::THING_TYPE_DOOR_OPENER => Some(Self::DoorOpener),
            Self::THING_TYPE_LIGHT => Some(Self::Light),
            _ => None,
        }
    }

    /// Returns `true` if a handler exists for the thing-type tag.
    #[must_use]
    pub fn supports_thing_type(tag: &str) -> bool {
        Self::from_thing_type(tag).is_some()
    }

    /// Selects the handler kind for a vendor device family or type tag.
    ///
    /// ```
    /// use myq_lib::HandlerKind;
    ///
    /// assert_eq!(HandlerKind::from_vendor_family("garagedoor"), Some(HandlerKind::DoorOpener));
    /// assert_eq!(HandlerKind::from_vendor_family("lamp"), Some(HandlerKind::Light));
    /// assert_eq!(HandlerKind::from_vendor_family("camera"), None);
    /// ```
    #[must_use]
    pub fn from_vendor_family(tag: &str) -> Option<Self> {
        match tag {
            "garagedoor" | "gate" | "garagedooropener" | "virtualgaragedooropener" => {
                Some(Self::DoorOpener)
            }
            "lamp" | "light" | "lightmodule" => Some(Self::Light),
            "gateway" | "hub" | "ethernetgateway" => Some(Self::Gateway),
            _ => None,
        }
    }

    /// Returns the host thing-type tag for this kind.
    #[must_use]
    pub const fn thing_type(&self) -> &'static str {
        match self {
            Self::Gateway => Self::THING_TYPE_GATEWAY,
            Self::DoorOpener => Self::THING_TYPE_DOOR_OPENER,
            Self::Light => Self::THING_TYPE_LIGHT,
        }
    }

    /// Returns `true` if devices of this kind are found by discovery.
    ///
    /// The gateway is the discovery source itself and is added by the user.
    #[must_use]
    pub const fn is_discoverable(&self) -> bool {
        matches!(self, Self::DoorOpener | Self::Light)
    }
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.thing_type())
    }
}
