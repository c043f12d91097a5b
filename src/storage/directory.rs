//! A filesystem backed store of sessions
//!
//! Each session is a YAML file named after its key, in a single directory.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::storage::{Session, SessionKey, SessionStore, StoreError};

/// A filesystem backed store of sessions.
#[derive(Debug, Clone)]
pub struct Directory {
    /// The directory session files are stored in.
    root: PathBuf,
}

impl Directory {
    /// Opens a session directory at the given path.
    ///
    /// The directory is created on the first save.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The path of the file a session is stored in.
    #[must_use]
    pub fn path(&self, key: &SessionKey) -> PathBuf {
        self.root.join(format!("{key}.yaml"))
    }

    fn write(path: &Path, session: &Session) -> Result<(), StoreError> {
        let yaml = serde_yaml::to_string(session).map_err(StoreError::Serialize)?;

        let io_error = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let file = File::create(path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(yaml.as_bytes()).map_err(io_error)?;
        writer.flush().map_err(io_error)
    }
}

impl SessionStore for Directory {
    fn load(&self, key: &SessionKey) -> Result<Option<Session>, StoreError> {
        let path = self.path(key);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let session = serde_yaml::from_str(&content)
            .map_err(|source| StoreError::Parse { path: path.clone(), source })?;
        tracing::debug!("Loaded session from {}", path.display());

        Ok(Some(session))
    }

    fn save(&mut self, key: &SessionKey, session: &Session) -> Result<(), StoreError> {
        let path = self.path(key);
        Self::write(&path, session)?;
        tracing::debug!("Saved session to {}", path.display());
        Ok(())
    }

    fn remove(&mut self, key: &SessionKey) -> Result<(), StoreError> {
        let path = self.path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!("Removed session file {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{Requirement, domain::CategoryLabel, pipeline::Pipeline};

    fn setup() -> (TempDir, Directory) {
        let tmp = TempDir::new().unwrap();
        let directory = Directory::new(tmp.path().join("sessions"));
        (tmp, directory)
    }

    fn key(name: &str) -> SessionKey {
        name.parse().unwrap()
    }

    #[test]
    fn missing_session_opens_empty() {
        let (_tmp, directory) = setup();
        assert!(directory.load(&key("default")).unwrap().is_none());
        assert!(directory.open(&key("default")).unwrap().collection().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_tmp, mut directory) = setup();
        let mut session = Session::default();
        session.extract(
            &Pipeline::default(),
            "The system must log errors. Response time should be fast. This is fine.",
            "spec.txt",
        );

        directory.save(&key("default"), &session).unwrap();

        assert!(directory.path(&key("default")).exists());
        assert_eq!(directory.load(&key("default")).unwrap(), Some(session));
    }

    #[test]
    fn opaque_and_empty_fields_survive_storage() {
        let (_tmp, mut directory) = setup();
        let mut session = Session::default();
        session.replace_all(vec![Requirement {
            id: "X-1".to_string(),
            text: String::new(),
            category: CategoryLabel::from("Security"),
            source: String::new(),
        }]);

        directory.save(&key("edited"), &session).unwrap();

        assert_eq!(directory.open(&key("edited")).unwrap(), session);
    }

    #[test]
    fn remove_deletes_file_and_tolerates_absence() {
        let (_tmp, mut directory) = setup();
        directory.save(&key("default"), &Session::default()).unwrap();

        directory.remove(&key("default")).unwrap();
        directory.remove(&key("default")).unwrap();

        assert!(!directory.path(&key("default")).exists());
    }

    #[test]
    fn corrupt_session_is_a_parse_error() {
        let (_tmp, directory) = setup();
        let path = directory.path(&key("broken"));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "requirements: [").unwrap();

        assert!(matches!(
            directory.load(&key("broken")),
            Err(StoreError::Parse { .. })
        ));
    }
}
