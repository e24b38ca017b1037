use const_format::concatcp;

pub mod collaborators;
pub mod controller;
pub mod storage;
pub mod store;
pub mod validator;

pub use controller::SessionController;
pub use store::WorkoutStore;

pub const DATA_DIR: &str = "data/";
pub const WORKOUTS_FILE: &str = concatcp!(DATA_DIR, "workouts.json");
