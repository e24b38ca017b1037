use thiserror::Error;

use crate::collaborators::RawWorkoutFields;

/// Why a submission was rejected. Messages are fit for surfacing to the user
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} has to be a number")]
    NonFiniteInput { field: &'static str },
    #[error("{field} has to be positive")]
    NonPositiveInput { field: &'static str },
    #[error("unknown workout kind '{0}'")]
    UnknownKind(String),
}

/// Fields that passed validation, discriminated by kind. The only way to get
/// one is through [`validate`], so the store can treat its contents as
/// preconditions rather than re-checking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidatedInput {
    Running {
        distance_km: f64,
        duration_min: f64,
        cadence: u32,
    },
    Cycling {
        distance_km: f64,
        duration_min: f64,
        elevation_gain: f64,
    },
}

/// Pure check of the raw form fields. No side effects; the store is never
/// touched on the failure path.
///
/// Every numeric field must parse to a finite number and be strictly positive.
/// Elevation gain is held to the same strict positivity as the rest, even
/// though zero-gain rides exist in the domain.
pub fn validate(raw: &RawWorkoutFields) -> Result<ValidatedInput, ValidationError> {
    let distance_km = finite(&raw.distance, "distance")?;
    let duration_min = finite(&raw.duration, "duration")?;
    positive(distance_km, "distance")?;
    positive(duration_min, "duration")?;

    match raw.kind.as_str() {
        "running" => {
            let cadence = whole_number(&raw.cadence, "cadence")?;
            if cadence == 0 {
                return Err(ValidationError::NonPositiveInput { field: "cadence" });
            }
            Ok(ValidatedInput::Running {
                distance_km,
                duration_min,
                cadence,
            })
        }
        "cycling" => {
            let elevation_gain = finite(&raw.elevation, "elevation gain")?;
            positive(elevation_gain, "elevation gain")?;
            Ok(ValidatedInput::Cycling {
                distance_km,
                duration_min,
                elevation_gain,
            })
        }
        other => Err(ValidationError::UnknownKind(other.to_string())),
    }
}

fn finite(value: &str, field: &'static str) -> Result<f64, ValidationError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(ValidationError::NonFiniteInput { field })
}

fn positive(value: f64, field: &'static str) -> Result<(), ValidationError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveInput { field })
    }
}

fn whole_number(value: &str, field: &'static str) -> Result<u32, ValidationError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::NonFiniteInput { field })
}
