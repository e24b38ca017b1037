pub mod workout;

pub use workout::{Workout, WorkoutKind};
