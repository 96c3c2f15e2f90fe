// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host status value types.
//!
//! These are the values a device snapshot reports to the host's status
//! channels. They are local to this crate so that any host can map them onto
//! its own enumerations.
//!
//! # Types
//!
//! - [`OnOff`] - Switch state of a light, or "door is not closed"
//! - [`OpenClosed`] - Contact state of a door
//! - [`Percent`] - Door position (0% open, 100% closed)
//! - [`OnlineStatus`] - Cloud connectivity of a device

mod on_off;
mod online;
mod open_closed;
mod percent;

pub use on_off::OnOff;
pub use online::OnlineStatus;
pub use open_closed::OpenClosed;
pub use percent::Percent;
