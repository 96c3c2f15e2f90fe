// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for device state normalization through the public API.

use std::sync::{Arc, Mutex};

use myq_lib::{
    DeviceStateNormalizer, DeviceStateSnapshot, HandlerKind, NormalizerConfig, OnOff,
    OnlineStatus, OpenClosed, ParseError, ParseEvent, PayloadShape, Percent, PropertyMap,
    SnapshotStore,
};
use serde_json::json;

fn flat(entries: &[(&str, &str)]) -> PropertyMap {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn door_with_state(state: &str) -> DeviceStateSnapshot {
    DeviceStateSnapshot::new("S1", "garagedooropener", "Garage", state, true)
}

// ============================================================================
// Flat properties
// ============================================================================

mod flat_properties {
    use super::*;

    #[test]
    fn round_trips_current_shape() {
        let original = flat(&[
            ("type", "garagedooropener"),
            ("state", "open"),
            ("name", "Garage"),
            ("serial", "CG0812345678"),
            ("online", "false"),
            ("family", "garagedoor"),
        ]);

        let snapshot = DeviceStateNormalizer::new()
            .from_flat_properties(&original)
            .unwrap();
        assert_eq!(snapshot.to_property_map(), original);
    }

    #[test]
    fn round_trips_legacy_shape() {
        let original = flat(&[
            ("type", "lamp"),
            ("state", "on"),
            ("name", "Porch"),
            ("serial", "LM1"),
            ("online", "true"),
        ]);

        let normalizer =
            DeviceStateNormalizer::with_config(NormalizerConfig::new().with_shape(PayloadShape::Legacy));
        let snapshot = normalizer.from_flat_properties(&original).unwrap();
        assert_eq!(snapshot.to_property_map(), original);
    }

    #[test]
    fn property_map_is_canonical() {
        let quoted = flat(&[
            ("type", "\"lamp\""),
            ("state", "\"on\""),
            ("name", "\"Porch\""),
            ("serial", "\"LM1\""),
            ("online", "TRUE"),
        ]);

        let snapshot = DeviceStateNormalizer::new()
            .from_flat_properties(&quoted)
            .unwrap();
        let canonical = snapshot.to_property_map();
        assert_eq!(
            canonical,
            flat(&[
                ("type", "lamp"),
                ("state", "on"),
                ("name", "Porch"),
                ("serial", "LM1"),
                ("online", "true"),
            ])
        );

        let reparsed = DeviceStateNormalizer::new()
            .from_flat_properties(&canonical)
            .unwrap();
        assert_eq!(reparsed, snapshot);
        assert_eq!(reparsed.to_property_map(), canonical);
    }

    #[test]
    fn missing_serial_is_missing_field() {
        let props = flat(&[
            ("type", "lamp"),
            ("state", "on"),
            ("name", "Porch"),
            ("online", "true"),
        ]);

        let err = DeviceStateNormalizer::new()
            .from_flat_properties(&props)
            .unwrap_err();
        assert!(matches!(err, ParseError::MissingField(ref field) if field == "serial"));
    }

    #[test]
    fn malformed_online_is_offline() {
        let props = flat(&[
            ("type", "lamp"),
            ("state", "on"),
            ("name", "Porch"),
            ("serial", "LM1"),
            ("online", "maybe"),
        ]);

        let snapshot = DeviceStateNormalizer::new()
            .from_flat_properties(&props)
            .unwrap();
        assert_eq!(snapshot.online_status(), OnlineStatus::Offline);
    }
}

// ============================================================================
// Structured payloads
// ============================================================================

mod structured_payload {
    use super::*;

    #[test]
    fn door_document() {
        let payload = json!({
            "serial": "S1",
            "type": "door",
            "name": "Garage",
            "family": "F1",
            "state": {"doorState": "closed", "online": "true"}
        });

        let snapshot = DeviceStateNormalizer::new()
            .from_structured_payload(&payload)
            .unwrap();

        assert_eq!(snapshot.serial_number(), "S1");
        assert_eq!(snapshot.state(), "closed");
        assert!(snapshot.online());
    }

    #[test]
    fn missing_state_document() {
        let payload = json!({"serial": "S1", "type": "door", "name": "Garage", "family": "F1"});

        let snapshot = DeviceStateNormalizer::new()
            .from_structured_payload(&payload)
            .unwrap();

        assert_eq!(snapshot.state(), "");
        assert!(!snapshot.online());
    }

    #[test]
    fn json_text_round_trips_to_flat_shape() {
        let normalizer = DeviceStateNormalizer::new();
        let snapshot = normalizer
            .from_json_str(
                r#"{"serial":"S9","type":"lamp","name":"Hall","family":"lamp","state":{"lampState":"off","online":false}}"#,
            )
            .unwrap();

        let restored = normalizer
            .from_flat_properties(&snapshot.to_property_map())
            .unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn observer_sees_missing_fields() {
        let missing = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&missing);
        let normalizer = DeviceStateNormalizer::new().with_observer(move |event: &ParseEvent<'_>| {
            if let ParseEvent::FieldMissing { field, .. } = event {
                sink.lock().unwrap().push((*field).to_string());
            }
        });

        normalizer
            .from_structured_payload(&json!({"serial": "S1"}))
            .unwrap();

        let missing = missing.lock().unwrap();
        for field in ["type", "name", "family", "state"] {
            assert!(missing.iter().any(|f| f == field), "{field} not reported");
        }
    }
}

// ============================================================================
// Derived accessors
// ============================================================================

mod accessors {
    use super::*;

    #[test]
    fn door_closed() {
        assert!(door_with_state("closed").is_door_closed());
        assert!(!door_with_state("open").is_door_closed());
        assert!(!door_with_state("").is_door_closed());
    }

    #[test]
    fn door_percent() {
        assert_eq!(door_with_state("open").door_status_percent(), Percent::ZERO);
        assert_eq!(door_with_state("closed").door_status_percent(), Percent::HUNDRED);
        assert_eq!(door_with_state("ajar").door_status_percent().value(), 50);
    }

    #[test]
    fn door_open_contact() {
        assert_eq!(door_with_state("open").door_open_contact(), OpenClosed::Closed);
        assert_eq!(door_with_state("closed").door_open_contact(), OpenClosed::Open);
        assert_eq!(door_with_state("").door_open_contact(), OpenClosed::Open);
    }

    #[test]
    fn light_is_case_sensitive() {
        let on = DeviceStateSnapshot::new("L1", "lamp", "Porch", "on", true);
        let capitalized = DeviceStateSnapshot::new("L1", "lamp", "Porch", "On", true);
        assert_eq!(on.light_on_off(), OnOff::On);
        assert_eq!(capitalized.light_on_off(), OnOff::Off);
    }

    #[test]
    fn unknown_door_state_defaults() {
        let snapshot = door_with_state("stopped");
        assert_eq!(snapshot.door_on_off(), OnOff::On);
        assert_eq!(snapshot.door_status_percent(), Percent::HALF);
        assert_eq!(snapshot.door_closed_contact(), OpenClosed::Open);
        assert_eq!(snapshot.door_open_contact(), OpenClosed::Open);
    }
}

// ============================================================================
// Gateway refresh
// ============================================================================

mod device_list {
    use super::*;

    #[test]
    fn refresh_populates_store_and_dispatch() {
        let payload = json!({"items": [
            {"serial": "GW1", "type": "ethernetgateway", "family": "gateway", "name": "Hub",
             "state": {"online": true}},
            {"serial": "CG1", "type": "wifigaragedooropener", "family": "garagedoor", "name": "Garage",
             "state": {"doorState": "open", "online": true}},
            {"serial": "LM1", "type": "lightmodule", "family": "lamp", "name": "Porch",
             "state": {"lampState": "on", "online": false}},
            {"type": "camera", "name": "No serial"}
        ]});

        let snapshots = DeviceStateNormalizer::new()
            .from_device_list(&payload)
            .unwrap();
        assert_eq!(snapshots.len(), 3);

        let kinds: Vec<_> = snapshots
            .iter()
            .map(DeviceStateSnapshot::handler_kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                Some(HandlerKind::Gateway),
                Some(HandlerKind::DoorOpener),
                Some(HandlerKind::Light)
            ]
        );

        let store = SnapshotStore::new();
        assert_eq!(store.update_all(snapshots), 3);
        assert_eq!(store.get("CG1").unwrap().door_status_percent(), Percent::ZERO);
        assert_eq!(
            store.get("LM1").unwrap().online_status(),
            OnlineStatus::Offline
        );
    }

    #[test]
    fn later_refresh_supersedes_snapshot() {
        let normalizer = DeviceStateNormalizer::new();
        let store = SnapshotStore::new();

        let first = normalizer
            .from_structured_payload(&json!({"serial": "CG1", "state": {"doorState": "open"}}))
            .unwrap();
        let second = normalizer
            .from_structured_payload(&json!({"serial": "CG1", "state": {"doorState": "closed"}}))
            .unwrap();

        store.update(first).unwrap();
        let replaced = store.update(second).unwrap().unwrap();

        assert!(replaced.is_door_open());
        assert!(store.get("CG1").unwrap().is_door_closed());
    }
}

// ============================================================================
// Handler dispatch
// ============================================================================

mod dispatch {
    use super::*;

    #[test]
    fn thing_types() {
        assert_eq!(
            HandlerKind::from_thing_type("gateway"),
            Some(HandlerKind::Gateway)
        );
        assert_eq!(
            HandlerKind::from_thing_type("dooropener"),
            Some(HandlerKind::DoorOpener)
        );
        assert_eq!(HandlerKind::from_thing_type("light"), Some(HandlerKind::Light));
        assert_eq!(HandlerKind::from_thing_type("sprinkler"), None);
    }
}
