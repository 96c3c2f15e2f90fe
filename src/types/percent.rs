// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Percentage type for rollershutter-style channels.
//!
//! Values are always within 0-100%.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// A percentage (0-100).
///
/// For door openers, 0 means fully open and 100 means fully closed.
///
/// # Examples
///
/// ```
/// use myq_lib::types::Percent;
///
/// let half = Percent::new(50).unwrap();
/// assert_eq!(half.value(), 50);
///
/// assert_eq!(Percent::ZERO.value(), 0);
/// assert_eq!(Percent::HUNDRED.value(), 100);
///
/// assert!(Percent::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Percent(u8);

impl Percent {
    /// 0%.
    pub const ZERO: Self = Self(0);

    /// 50%, used when a door is neither open nor closed.
    pub const HALF: Self = Self(50);

    /// 100%.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new percentage.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Returns the percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Percent {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percent> for u8 {
    fn from(percent: Percent) -> Self {
        percent.0
    }
}
