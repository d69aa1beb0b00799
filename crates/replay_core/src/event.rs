//! Telemetry events as decoded from a per-trip JSON event array.
//!
//! Only `event_id`, `event_type` and `timestamp` are required. Optional fields that are
//! missing or malformed decode as `None`; anything else on the record is kept verbatim in
//! [Event::details].

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Kind of a telemetry event. Unknown type strings are preserved in [EventType::Other].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    TripStarted,
    TripCompleted,
    TripCancelled,
    LocationPing,
    SignalLost,
    SignalRecovered,
    VehicleStopped,
    VehicleMoving,
    SpeedViolation,
    VehicleTelemetry,
    DeviceError,
    BatteryLow,
    FuelLevelLow,
    RefuelingStarted,
    RefuelingCompleted,
    Other(String),
}

/// Grouping of event types for display and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    TripLifecycle,
    Location,
    VehicleState,
    Telemetry,
    Warning,
    Fuel,
    Uncategorized,
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::TripStarted => "trip_started",
            EventType::TripCompleted => "trip_completed",
            EventType::TripCancelled => "trip_cancelled",
            EventType::LocationPing => "location_ping",
            EventType::SignalLost => "signal_lost",
            EventType::SignalRecovered => "signal_recovered",
            EventType::VehicleStopped => "vehicle_stopped",
            EventType::VehicleMoving => "vehicle_moving",
            EventType::SpeedViolation => "speed_violation",
            EventType::VehicleTelemetry => "vehicle_telemetry",
            EventType::DeviceError => "device_error",
            EventType::BatteryLow => "battery_low",
            EventType::FuelLevelLow => "fuel_level_low",
            EventType::RefuelingStarted => "refueling_started",
            EventType::RefuelingCompleted => "refueling_completed",
            EventType::Other(raw) => raw,
        }
    }

    pub fn category(&self) -> EventCategory {
        match self {
            EventType::TripStarted | EventType::TripCompleted | EventType::TripCancelled => {
                EventCategory::TripLifecycle
            }
            EventType::LocationPing | EventType::SignalLost | EventType::SignalRecovered => {
                EventCategory::Location
            }
            EventType::VehicleStopped | EventType::VehicleMoving | EventType::SpeedViolation => {
                EventCategory::VehicleState
            }
            EventType::VehicleTelemetry | EventType::DeviceError => EventCategory::Telemetry,
            EventType::BatteryLow | EventType::FuelLevelLow => EventCategory::Warning,
            EventType::RefuelingStarted | EventType::RefuelingCompleted => EventCategory::Fuel,
            EventType::Other(_) => EventCategory::Uncategorized,
        }
    }

    /// `trip_completed` and `trip_cancelled` fix a trip's status once visible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, EventType::TripCompleted | EventType::TripCancelled)
    }
}

impl From<String> for EventType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "trip_started" => EventType::TripStarted,
            "trip_completed" => EventType::TripCompleted,
            "trip_cancelled" => EventType::TripCancelled,
            "location_ping" => EventType::LocationPing,
            "signal_lost" => EventType::SignalLost,
            "signal_recovered" => EventType::SignalRecovered,
            "vehicle_stopped" => EventType::VehicleStopped,
            "vehicle_moving" => EventType::VehicleMoving,
            "speed_violation" => EventType::SpeedViolation,
            "vehicle_telemetry" => EventType::VehicleTelemetry,
            "device_error" => EventType::DeviceError,
            "battery_low" => EventType::BatteryLow,
            "fuel_level_low" => EventType::FuelLevelLow,
            "refueling_started" => EventType::RefuelingStarted,
            "refueling_completed" => EventType::RefuelingCompleted,
            _ => EventType::Other(raw),
        }
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        match event_type {
            EventType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Vehicle movement at the time of the event. Either reading may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    #[serde(default, deserialize_with = "lenient")]
    pub speed_kmh: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub heading_degrees: Option<f64>,
}

/// One telemetry record. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: String,
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<Location>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub movement: Option<Movement>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_duration_hours: Option<f64>,
    /// Type-specific fields not modelled above.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Event {
    /// Event time as Unix milliseconds.
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}

/// Decodes an optional field, treating a value of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}
