// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reader for the flat property shape.

use crate::error::ParseError;
use crate::snapshot::{DeviceStateSnapshot, PropertyMap, keys};

use super::{DeviceStateNormalizer, parse_online, strip_quotes};

impl DeviceStateNormalizer {
    /// Builds a snapshot from a flat property map.
    ///
    /// The map must contain `type`, `state`, `name`, `serial` and `online`.
    /// `family` is optional and only read for the current payload shape.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` naming the first absent required key.
    ///
    /// # Examples
    ///
    /// ```
    /// use myq_lib::{DeviceStateNormalizer, PropertyMap};
    ///
    /// let mut props = PropertyMap::new();
    /// props.insert("type".into(), "\"lamp\"".into());
    /// props.insert("state".into(), "\"on\"".into());
    /// props.insert("name".into(), "\"Porch\"".into());
    /// props.insert("serial".into(), "\"LM1234\"".into());
    /// props.insert("online".into(), "TRUE".into());
    ///
    /// let snapshot = DeviceStateNormalizer::new().from_flat_properties(&props).unwrap();
    /// assert_eq!(snapshot.name(), "Porch");
    /// assert!(snapshot.online());
    /// ```
    #[allow(clippy::wrong_self_convention)]
    pub fn from_flat_properties(
        &self,
        props: &PropertyMap,
    ) -> Result<DeviceStateSnapshot, ParseError> {
        let serial = required(props, keys::SERIAL)?;
        let device_type = required(props, keys::TYPE)?;
        let state = required(props, keys::STATE)?;
        let name = required(props, keys::NAME)?;
        let online_token = required(props, keys::ONLINE)?;

        for (field, value) in [
            (keys::TYPE, &device_type),
            (keys::STATE, &state),
            (keys::NAME, &name),
            (keys::ONLINE, &online_token),
        ] {
            self.found(Some(serial.as_str()), field, value);
        }

        let mut snapshot = DeviceStateSnapshot::new(
            serial.clone(),
            device_type,
            name,
            state,
            parse_online(&online_token),
        );

        if self.config.shape.has_family() {
            match props.get(keys::FAMILY) {
                Some(family) => {
                    let family = strip_quotes(family);
                    self.found(Some(serial.as_str()), keys::FAMILY, &family);
                    snapshot = snapshot.with_family(family);
                }
                None => self.missing(Some(serial.as_str()), keys::FAMILY),
            }
        }

        Ok(snapshot)
    }
}

fn required(props: &PropertyMap, key: &str) -> Result<String, ParseError> {
    props
        .get(key)
        .map(|value| strip_quotes(value))
        .ok_or_else(|| ParseError::MissingField(key.to_string()))
}
