use tracing::{debug, info, warn};

use crate::{
    collaborators::{FormView, GeolocationProvider, ListView, MapSurface},
    store::WorkoutStore,
    validator,
};

/// Zoom used both for the initial view and for recentering on a selection.
pub const DEFAULT_ZOOM: f64 = 13.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    /// No pending map click.
    Idle,
    /// A click captured a coordinate and the entry form is visible.
    AwaitingSubmission { latitude: f64, longitude: f64 },
}

/// Orchestrates the user workflow between map, form, store and views.
///
/// All collaborators are injected at construction. Events arrive as plain
/// method calls from the host (single-threaded, each handler runs to
/// completion); the only async boundary is the one-shot geolocation request
/// in [`SessionController::start`].
pub struct SessionController {
    store: WorkoutStore,
    map: Box<dyn MapSurface>,
    list_view: Box<dyn ListView>,
    form: Box<dyn FormView>,
    state: SessionState,
    map_ready: bool,
}

impl SessionController {
    pub fn new(
        store: WorkoutStore,
        map: Box<dyn MapSurface>,
        list_view: Box<dyn ListView>,
        form: Box<dyn FormView>,
    ) -> Self {
        Self {
            store,
            map,
            list_view,
            form,
            state: SessionState::Idle,
            map_ready: false,
        }
    }

    /// Restore persisted workouts and render them into the list. A malformed
    /// blob degrades to an empty store. Marker replay is deferred to
    /// [`SessionController::start`]: geolocation is async, so the map surface
    /// may come up before or after this runs.
    pub fn startup(&mut self) {
        match self.store.restore() {
            Ok(0) => debug!("Nothing to restore"),
            Ok(count) => info!("Restored {count} workouts"),
            Err(err) => warn!("Discarding persisted state: {err}"),
        }
        for workout in self.store.all() {
            self.list_view.append_entry(workout);
        }
    }

    /// One-shot position acquisition. On success the map surface is
    /// initialized at the user's position and markers are replayed for every
    /// restored workout. On failure the session degrades to map-less:
    /// click-to-create stays unavailable, nothing crashes.
    pub async fn start(&mut self, geolocation: &dyn GeolocationProvider) {
        match geolocation.request_position().await {
            Ok((latitude, longitude)) => {
                self.map.initialize((latitude, longitude), DEFAULT_ZOOM);
                self.map_ready = true;
                for workout in self.store.all() {
                    self.map.place_marker(
                        (workout.latitude, workout.longitude),
                        &workout.description,
                        workout.kind.popup_class(),
                    );
                }
                info!("Map initialized at ({latitude}, {longitude})");
            }
            Err(_) => warn!("Geolocation unavailable, continuing without a map"),
        }
    }

    /// A click on the map surface: capture the coordinate and bring up the
    /// entry form.
    pub fn map_clicked(&mut self, latitude: f64, longitude: f64) {
        if !self.map_ready {
            warn!("Map click before the map surface is ready, ignored");
            return;
        }
        self.state = SessionState::AwaitingSubmission { latitude, longitude };
        self.form.show();
        self.form.focus_first_field();
    }

    /// The form was submitted. All-or-nothing: either a fully valid workout
    /// is appended, rendered on both views and persisted, or nothing at all
    /// happens beyond a validation message.
    pub fn form_submitted(&mut self) {
        let SessionState::AwaitingSubmission { latitude, longitude } = self.state else {
            warn!("Form submitted without a pending map click, ignored");
            return;
        };

        let raw = self.form.field_values();
        let input = match validator::validate(&raw) {
            Ok(input) => input,
            Err(err) => {
                debug!("Rejected submission: {err}");
                self.form.show_validation_message(&err.to_string());
                self.state = SessionState::Idle;
                return;
            }
        };

        let workout = self.store.create(input, latitude, longitude);
        self.list_view.append_entry(workout);
        self.map.place_marker(
            (workout.latitude, workout.longitude),
            &workout.description,
            workout.kind.popup_class(),
        );
        info!("Created {} ({})", workout.description, workout.id);

        self.form.clear_fields();
        self.form.hide();
        self.store.persist();
        self.state = SessionState::Idle;
    }

    /// The form's kind select changed; swap which extra field is visible.
    pub fn kind_toggled(&mut self) {
        self.form.toggle_kind_fields();
    }

    /// A rendered list entry was activated. A stale id (desynchronized view)
    /// is a no-op.
    pub fn entry_selected(&mut self, id: &str) {
        let Some(workout) = self.store.find_by_id_mut(id) else {
            debug!("Selected entry {id} no longer exists, ignored");
            return;
        };
        workout.register_click();
        let (latitude, longitude) = (workout.latitude, workout.longitude);
        debug!("Workout {id} selected, {} clicks so far", workout.click_count);

        self.store.persist();
        if self.map_ready {
            self.map.recenter((latitude, longitude), DEFAULT_ZOOM, true);
        }
    }

    /// Clear all workouts and the persisted state. The host is expected to
    /// reinitialize the whole application afterwards.
    pub fn reset(&mut self) {
        self.store.reset();
        self.list_view.clear();
        self.state = SessionState::Idle;
        info!("All workouts cleared");
    }

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_map_ready(&self) -> bool {
        self.map_ready
    }
}
