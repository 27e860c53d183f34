use super::backend::StorageBackend;
use super::{parse_records, render_records, Loaded};
use crate::error::{RosterError, Result};
use crate::model::User;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FsBackend {
    data_file: PathBuf,
}

impl FsBackend {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    fn data_dir(&self) -> PathBuf {
        match self.data_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(RosterError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load(&self) -> Result<Loaded> {
        if !self.data_file.exists() {
            self.ensure_dir(&self.data_dir())?;
            return Ok(Loaded::default());
        }
        let content = fs::read_to_string(&self.data_file).map_err(RosterError::Io)?;
        Ok(parse_records(&content))
    }

    fn flush(&self, users: &[User]) -> Result<()> {
        let dir = self.data_dir();
        self.ensure_dir(&dir)?;

        let content = render_records(users);

        // Atomic write
        let tmp_file = dir.join(format!(".users-{}.tmp", Uuid::new_v4()));
        let written =
            fs::write(&tmp_file, content).and_then(|()| fs::rename(&tmp_file, &self.data_file));
        if let Err(err) = written {
            let _ = fs::remove_file(&tmp_file);
            return Err(RosterError::Io(err));
        }

        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.data_file.clone()
    }
}
