// Persistence for named motion programs

use log::{debug, warn};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::errors::ArmdeckError;
use crate::program::Program;

/// A durable single-slot string blob, the persistence substrate for the
/// program store. One fixed key holds the serialized list of programs.
pub trait BlobStore: Send {
    /// Read the blob; `None` if nothing was ever written.
    fn read(&self) -> Result<Option<String>, ArmdeckError>;

    /// Replace the blob.
    fn write(&self, blob: &str) -> Result<(), ArmdeckError>;
}

/// File-backed blob store; the blob lives in a single JSON document under
/// the application data directory.
pub struct FileBlobStore {
    path: PathBuf,
}

impl FileBlobStore {
    pub fn new(path: PathBuf) -> Result<Self, ArmdeckError> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ArmdeckError::StoreIoError { source: e })?;
            }
        }
        Ok(Self { path })
    }

    /// Create the store at the default location in the user data directory.
    pub fn new_default() -> Result<Self, ArmdeckError> {
        Self::new(Self::default_path()?)
    }

    pub fn default_path() -> Result<PathBuf, ArmdeckError> {
        let data_dir = dirs::data_dir().ok_or(ArmdeckError::NoDataDir)?;
        Ok(data_dir.join("armdeck").join("programs.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self) -> Result<Option<String>, ArmdeckError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let blob =
            fs::read_to_string(&self.path).map_err(|e| ArmdeckError::StoreIoError { source: e })?;
        Ok(Some(blob))
    }

    fn write(&self, blob: &str) -> Result<(), ArmdeckError> {
        fs::write(&self.path, blob).map_err(|e| ArmdeckError::StoreIoError { source: e })
    }
}

/// In-memory blob store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryBlobStore {
    blob: Mutex<Option<String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self) -> Result<Option<String>, ArmdeckError> {
        Ok(self.blob.lock().expect("blob lock poisoned").clone())
    }

    fn write(&self, blob: &str) -> Result<(), ArmdeckError> {
        *self.blob.lock().expect("blob lock poisoned") = Some(blob.to_string());
        Ok(())
    }
}

/// Positional list of saved programs on top of a blob store. Programs are
/// append-only and immutable once saved; names carry no uniqueness
/// constraint, duplicates are retained as separate entries. `list` followed
/// by `save` is read-modify-write against the shared blob, not atomic.
pub struct ProgramStore {
    blob_store: Box<dyn BlobStore>,
}

impl ProgramStore {
    pub fn new(blob_store: Box<dyn BlobStore>) -> Self {
        Self { blob_store }
    }

    /// All stored programs in insertion order.
    pub fn list(&self) -> Result<Vec<Program>, ArmdeckError> {
        match self.blob_store.read()? {
            Some(blob) if !blob.trim().is_empty() => serde_json::from_str(&blob)
                .map_err(|e| ArmdeckError::StoreSerializeError { source: e }),
            _ => Ok(Vec::new()),
        }
    }

    /// Append a program to the stored list.
    pub fn save(&self, program: Program) -> Result<(), ArmdeckError> {
        let mut programs = self.list()?;
        debug!(
            "Saving program '{}' at index {}",
            program.name(),
            programs.len()
        );
        programs.push(program);
        self.persist(&programs)
    }

    /// Remove a program by positional index. An out-of-bounds index is a
    /// silent no-op; the stored list is left unchanged.
    pub fn delete(&self, index: usize) -> Result<(), ArmdeckError> {
        let mut programs = self.list()?;
        if index >= programs.len() {
            warn!(
                "Delete ignored: index {} out of bounds for {} programs",
                index,
                programs.len()
            );
            return Ok(());
        }
        let removed = programs.remove(index);
        debug!("Deleted program '{}'", removed.name());
        self.persist(&programs)
    }

    /// Fetch one program by index; `None` if the index is out of bounds.
    pub fn get(&self, index: usize) -> Result<Option<Program>, ArmdeckError> {
        let mut programs = self.list()?;
        if index >= programs.len() {
            return Ok(None);
        }
        Ok(Some(programs.swap_remove(index)))
    }

    fn persist(&self, programs: &[Program]) -> Result<(), ArmdeckError> {
        let blob = serde_json::to_string(programs)
            .map_err(|e| ArmdeckError::StoreSerializeError { source: e })?;
        self.blob_store.write(&blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arm::ArmState;
    use crate::program::{SequenceProgram, SinglePosition, Waypoint};
    use tempfile::TempDir;

    fn single(name: &str, rotate: f64) -> Program {
        Program::Single(SinglePosition {
            name: name.to_string(),
            timestamp: 1,
            state: ArmState {
                rotate,
                ..ArmState::default()
            },
        })
    }

    fn sequence(name: &str) -> Program {
        Program::Sequence(SequenceProgram::new(
            name.to_string(),
            vec![
                Waypoint {
                    time: 0,
                    state: ArmState::default(),
                },
                Waypoint {
                    time: 400,
                    state: ArmState {
                        elevate: 30.,
                        ..ArmState::default()
                    },
                },
            ],
        ))
    }

    #[test]
    fn empty_store_lists_nothing() {
        let store = ProgramStore::new(Box::new(MemoryBlobStore::new()));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn save_appends_in_insertion_order() {
        let store = ProgramStore::new(Box::new(MemoryBlobStore::new()));
        store.save(single("a", 10.)).unwrap();
        store.save(sequence("b")).unwrap();
        store.save(single("c", -10.)).unwrap();

        let programs = store.list().unwrap();
        let names: Vec<&str> = programs.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn saved_program_round_trips_by_content() {
        let store = ProgramStore::new(Box::new(MemoryBlobStore::new()));
        let program = sequence("sweep");
        store.save(program.clone()).unwrap();

        let programs = store.list().unwrap();
        assert_eq!(programs.len(), 1);
        assert_eq!(programs[0], program);
    }

    #[test]
    fn duplicate_names_are_retained_by_position() {
        let store = ProgramStore::new(Box::new(MemoryBlobStore::new()));
        store.save(single("grip", 0.)).unwrap();
        store.save(single("grip", 90.)).unwrap();

        let programs = store.list().unwrap();
        assert_eq!(programs.len(), 2);
        assert_eq!(programs[0].name(), "grip");
        assert_eq!(programs[1].name(), "grip");
    }

    #[test]
    fn delete_out_of_bounds_is_a_no_op() {
        let store = ProgramStore::new(Box::new(MemoryBlobStore::new()));
        store.save(single("a", 0.)).unwrap();
        store.save(single("b", 0.)).unwrap();

        store.delete(5).unwrap();
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn delete_removes_by_index() {
        let store = ProgramStore::new(Box::new(MemoryBlobStore::new()));
        store.save(single("a", 0.)).unwrap();
        store.save(single("b", 0.)).unwrap();
        store.save(single("c", 0.)).unwrap();

        store.delete(1).unwrap();
        let listed = store.list().unwrap();
        let names: Vec<&str> = listed.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn get_out_of_bounds_is_none() {
        let store = ProgramStore::new(Box::new(MemoryBlobStore::new()));
        store.save(single("a", 0.)).unwrap();
        assert!(store.get(3).unwrap().is_none());
        assert_eq!(store.get(0).unwrap().unwrap().name(), "a");
    }

    #[test]
    fn file_store_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("programs.json");

        {
            let blob_store = FileBlobStore::new(path.clone()).unwrap();
            let store = ProgramStore::new(Box::new(blob_store));
            store.save(sequence("sweep")).unwrap();
            store.save(single("home", 0.)).unwrap();
        }

        let blob_store = FileBlobStore::new(path).unwrap();
        let store = ProgramStore::new(Box::new(blob_store));
        let programs = store.list().unwrap();
        assert_eq!(programs.len(), 2);
        assert_eq!(programs[0].name(), "sweep");
        assert_eq!(programs[1].name(), "home");
    }

    #[test]
    fn file_store_creates_missing_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("programs.json");
        let blob_store = FileBlobStore::new(path).unwrap();
        let store = ProgramStore::new(Box::new(blob_store));
        store.save(single("a", 0.)).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
    }
}
