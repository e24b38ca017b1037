use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind discriminant plus the kind-specific payload.
///
/// The derived metric (pace or speed) is computed once by the constructors on
/// [`Workout`] and stored as a plain field. It is a cached fact: restoring a
/// workout from a persisted blob brings the value back verbatim instead of
/// recomputing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WorkoutKind {
    Running {
        /// Steps per minute.
        cadence: u32,
        /// Minutes per kilometer, `duration / distance`.
        pace: f64,
    },
    Cycling {
        /// Meters climbed over the session.
        elevation_gain: f64,
        /// Kilometers per hour, `distance / (duration / 60)`.
        speed: f64,
    },
}

impl WorkoutKind {
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running { .. } => "Running",
            WorkoutKind::Cycling { .. } => "Cycling",
        }
    }

    /// CSS class the map surface applies to the marker popup.
    pub fn popup_class(&self) -> &'static str {
        match self {
            WorkoutKind::Running { .. } => "running-popup",
            WorkoutKind::Cycling { .. } => "cycling-popup",
        }
    }
}

/// A single persisted exercise session.
///
/// Immutable after construction except for `click_count`. Records are only
/// created through [`crate::store`]'s factory in the core crate, never removed
/// individually, and destroyed only by a full store reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Sole lookup key; correlates a rendered list entry with the record.
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
    pub duration_min: f64,
    /// Human label, e.g. "Running on April 14". Derived once at construction.
    pub description: String,
    /// Times this record was selected from the list. Persisted.
    pub click_count: u32,
    pub kind: WorkoutKind,
}

impl Workout {
    /// Preconditions (already validated by the caller): distance, duration and
    /// cadence strictly positive.
    pub fn running(
        id: String,
        latitude: f64,
        longitude: f64,
        distance_km: f64,
        duration_min: f64,
        cadence: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        debug_assert!(distance_km > 0.0 && duration_min > 0.0 && cadence > 0);
        let kind = WorkoutKind::Running {
            cadence,
            pace: duration_min / distance_km,
        };
        Self::new(id, latitude, longitude, distance_km, duration_min, kind, created_at)
    }

    /// Preconditions (already validated by the caller): distance, duration and
    /// elevation gain strictly positive.
    pub fn cycling(
        id: String,
        latitude: f64,
        longitude: f64,
        distance_km: f64,
        duration_min: f64,
        elevation_gain: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        debug_assert!(distance_km > 0.0 && duration_min > 0.0 && elevation_gain > 0.0);
        let kind = WorkoutKind::Cycling {
            elevation_gain,
            speed: distance_km / (duration_min / 60.0),
        };
        Self::new(id, latitude, longitude, distance_km, duration_min, kind, created_at)
    }

    fn new(
        id: String,
        latitude: f64,
        longitude: f64,
        distance_km: f64,
        duration_min: f64,
        kind: WorkoutKind,
        created_at: DateTime<Utc>,
    ) -> Self {
        let description = format!("{} on {}", kind.label(), created_at.format("%B %-d"));
        Self {
            id,
            created_at,
            latitude,
            longitude,
            distance_km,
            duration_min,
            description,
            click_count: 0,
            kind,
        }
    }

    pub fn register_click(&mut self) {
        self.click_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn april_14() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn running_pace_is_duration_over_distance() {
        let w = Workout::running("w1".into(), 50.0, 20.0, 5.2, 24.0, 170, april_14());
        match w.kind {
            WorkoutKind::Running { pace, cadence } => {
                assert!((pace - 24.0 / 5.2).abs() < 1e-9);
                assert!((pace - 4.615).abs() < 1e-3);
                assert_eq!(cadence, 170);
            }
            _ => panic!("expected running"),
        }
    }

    #[test]
    fn cycling_speed_is_km_per_hour() {
        let w = Workout::cycling("w2".into(), 50.0, 20.0, 27.0, 95.0, 503.0, april_14());
        match w.kind {
            WorkoutKind::Cycling { speed, .. } => {
                assert!((speed - 27.0 / (95.0 / 60.0)).abs() < 1e-9);
                assert!((speed - 17.05).abs() < 0.01);
            }
            _ => panic!("expected cycling"),
        }
    }

    #[test]
    fn description_names_kind_and_date() {
        let w = Workout::running("w1".into(), 50.0, 20.0, 5.2, 24.0, 170, april_14());
        assert_eq!(w.description, "Running on April 14");

        let w = Workout::cycling("w2".into(), 50.0, 20.0, 27.0, 95.0, 503.0, april_14());
        assert_eq!(w.description, "Cycling on April 14");
    }

    #[test]
    fn serde_round_trip_is_lossless() {
        let mut w = Workout::cycling("abc123".into(), 50.0, 20.0, 27.0, 95.0, 503.0, april_14());
        w.register_click();
        w.register_click();

        let json = serde_json::to_string(&w).unwrap();
        let back: Workout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, w);
        assert_eq!(back.click_count, 2);
    }

    #[test]
    fn click_counter_starts_at_zero() {
        let mut w = Workout::running("w1".into(), 0.1, 0.2, 1.0, 10.0, 160, april_14());
        assert_eq!(w.click_count, 0);
        w.register_click();
        assert_eq!(w.click_count, 1);
    }
}
