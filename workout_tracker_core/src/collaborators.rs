use async_trait::async_trait;
use thiserror::Error;
use workout_tracker_lib::Workout;

/// Position acquisition failed or was denied. The controller degrades to a
/// map-less session; this never propagates further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("geolocation unavailable")]
pub struct GeolocationUnavailable;

/// One-shot provider of the user's current position.
#[async_trait]
pub trait GeolocationProvider {
    async fn request_position(&self) -> Result<(f64, f64), GeolocationUnavailable>;
}

/// The tile/marker rendering surface. Click events flow the other way: the
/// host forwards them to [`crate::SessionController::map_clicked`].
pub trait MapSurface {
    fn initialize(&mut self, center: (f64, f64), zoom: f64);
    fn place_marker(&mut self, coords: (f64, f64), popup_text: &str, style_class: &str);
    fn recenter(&mut self, coords: (f64, f64), zoom: f64, animated: bool);
}

/// Sidebar list of workout entries, keyed by workout id.
pub trait ListView {
    fn append_entry(&mut self, workout: &Workout);
    fn clear(&mut self);
}

/// Form field values exactly as the user typed them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawWorkoutFields {
    /// Raw select value, "running" or "cycling".
    pub kind: String,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

/// The entry form. Submission flows the other way: the host forwards it to
/// [`crate::SessionController::form_submitted`], and kind changes to
/// [`crate::SessionController::kind_toggled`].
pub trait FormView {
    fn show(&mut self);
    fn hide(&mut self);
    fn focus_first_field(&mut self);
    fn field_values(&self) -> RawWorkoutFields;
    fn clear_fields(&mut self);
    /// Swap which kind-specific field (cadence vs. elevation) is visible.
    fn toggle_kind_fields(&mut self);
    fn show_validation_message(&mut self, message: &str);
}

/// Durable key-value text store holding the whole-collection snapshot.
/// Write failures are the backend's to log; they must not propagate.
pub trait StateStorage {
    fn save(&mut self, blob: &str);
    fn load(&self) -> Option<String>;
    fn clear(&mut self);
}
