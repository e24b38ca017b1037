use std::path::PathBuf;

use tracing::{error, info};

use crate::{WORKOUTS_FILE, collaborators::StateStorage};

/// In-process storage. Useful for the demo and for tests; contents vanish
/// with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blob: Option<String>,
}

impl StateStorage for MemoryStorage {
    fn save(&mut self, blob: &str) {
        self.blob = Some(blob.to_string());
    }

    fn load(&self) -> Option<String> {
        self.blob.clone()
    }

    fn clear(&mut self) {
        self.blob = None;
    }
}

/// Durable storage backed by a single JSON file under the data directory.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The default location, `data/workouts.json` under the project root.
    pub fn in_project_data_dir() -> Self {
        let root: PathBuf = project_root::get_project_root().unwrap();
        Self::new(root.join(WORKOUTS_FILE))
    }
}

impl StateStorage for JsonFileStorage {
    fn save(&mut self, blob: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                error!("Failed to create data directory {:?}: {err}", parent);
                return;
            }
        }
        if let Err(err) = std::fs::write(&self.path, blob) {
            error!("Failed to write {:?}: {err}", self.path);
        }
    }

    fn load(&self) -> Option<String> {
        std::fs::read_to_string(&self.path).ok()
    }

    fn clear(&mut self) {
        if !self.path.exists() {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => info!("Erased {:?}", self.path),
            Err(err) => error!("Failed to erase {:?}: {err}", self.path),
        }
    }
}

/// Storage double whose contents outlive any one store, for restart tests.
#[cfg(test)]
pub(crate) mod test_support {
    use std::{cell::RefCell, rc::Rc};

    use crate::collaborators::StateStorage;

    #[derive(Default, Clone)]
    pub(crate) struct SharedStorage(pub(crate) Rc<RefCell<Option<String>>>);

    impl StateStorage for SharedStorage {
        fn save(&mut self, blob: &str) {
            *self.0.borrow_mut() = Some(blob.to_string());
        }

        fn load(&self) -> Option<String> {
            self.0.borrow().clone()
        }

        fn clear(&mut self) {
            *self.0.borrow_mut() = None;
        }
    }
}
