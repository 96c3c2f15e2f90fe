// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Field tags shared by the flat and structured payload shapes.

/// Vendor device-type tag.
pub const TYPE: &str = "type";

/// Status token (flat shape) or nested state document (structured shape).
pub const STATE: &str = "state";

/// Human-readable device name.
pub const NAME: &str = "name";

/// Device serial number.
pub const SERIAL: &str = "serial";

/// Connectivity flag.
pub const ONLINE: &str = "online";

/// Vendor family classification, only present in the current shape.
pub const FAMILY: &str = "family";

/// Door status inside the nested state document.
pub const DOOR_STATE: &str = "doorState";

/// Lamp status inside the nested state document.
pub const LAMP_STATE: &str = "lampState";

/// Device list wrapper key of the vendor devices endpoint.
pub const ITEMS: &str = "items";

/// Keys every flat property map must carry.
pub const REQUIRED_FLAT: [&str; 5] = [TYPE, STATE, NAME, SERIAL, ONLINE];
