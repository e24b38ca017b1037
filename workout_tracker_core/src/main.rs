use async_trait::async_trait;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_tracker_core::{
    SessionController, WorkoutStore,
    collaborators::{
        FormView, GeolocationProvider, GeolocationUnavailable, ListView, MapSurface,
        RawWorkoutFields,
    },
    storage::JsonFileStorage,
};
use workout_tracker_lib::Workout;

// Headless demo: drives one click-and-submit cycle against console-backed
// collaborators. Created workouts land in data/workouts.json and come back
// on the next run.
#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = WorkoutStore::new(Box::new(JsonFileStorage::in_project_data_dir()));
    let mut controller = SessionController::new(
        store,
        Box::new(ConsoleMap),
        Box::new(ConsoleList),
        Box::new(ScriptedForm),
    );

    controller.startup();
    controller.start(&FixedPosition(56.175188, 10.196123)).await;

    controller.map_clicked(56.1629, 10.2039);
    controller.form_submitted();

    for workout in controller.store().all() {
        println!(
            "{}  {:5.1} km  {:5.1} min  {}",
            workout.id, workout.distance_km, workout.duration_min, workout.description
        );
    }
}

struct FixedPosition(f64, f64);

#[async_trait]
impl GeolocationProvider for FixedPosition {
    async fn request_position(&self) -> Result<(f64, f64), GeolocationUnavailable> {
        Ok((self.0, self.1))
    }
}

struct ConsoleMap;

impl MapSurface for ConsoleMap {
    fn initialize(&mut self, center: (f64, f64), zoom: f64) {
        println!("[map] view ({:.4}, {:.4}) zoom {zoom}", center.0, center.1);
    }

    fn place_marker(&mut self, coords: (f64, f64), popup_text: &str, style_class: &str) {
        println!(
            "[map] marker ({:.4}, {:.4}) \"{popup_text}\" .{style_class}",
            coords.0, coords.1
        );
    }

    fn recenter(&mut self, coords: (f64, f64), zoom: f64, animated: bool) {
        println!(
            "[map] recenter ({:.4}, {:.4}) zoom {zoom} animated {animated}",
            coords.0, coords.1
        );
    }
}

struct ConsoleList;

impl ListView for ConsoleList {
    fn append_entry(&mut self, workout: &Workout) {
        println!("[list] + {} ({})", workout.description, workout.id);
    }

    fn clear(&mut self) {
        println!("[list] cleared");
    }
}

// Always submits the same running workout.
struct ScriptedForm;

impl FormView for ScriptedForm {
    fn show(&mut self) {
        println!("[form] shown");
    }

    fn hide(&mut self) {
        println!("[form] hidden");
    }

    fn focus_first_field(&mut self) {}

    fn field_values(&self) -> RawWorkoutFields {
        RawWorkoutFields {
            kind: "running".into(),
            distance: "5.2".into(),
            duration: "24".into(),
            cadence: "170".into(),
            elevation: String::new(),
        }
    }

    fn clear_fields(&mut self) {}

    fn toggle_kind_fields(&mut self) {}

    fn show_validation_message(&mut self, message: &str) {
        println!("[form] {message}");
    }
}
