//! Path-bound views of a single file or directory

use super::{Directory, File};
use crate::error::VfsErrorKind;
use crate::{path, VfsError, VfsResult};
use std::time::SystemTime;

/// A file identified by its full path
#[derive(Debug, Clone)]
pub struct FileInfo {
    file: File,
    directory: Directory,
    full_name: String,
}

impl FileInfo {
    pub fn new(file: File, directory: Directory, full_name: &str) -> Self {
        FileInfo {
            file,
            directory,
            full_name: path::trim_end_separators(full_name).to_string(),
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn name(&self) -> &str {
        path::file_name(&self.full_name)
    }

    pub fn extension(&self) -> Option<&str> {
        path::extension(&self.full_name)
    }

    pub fn exists(&self) -> bool {
        self.file.exists(&self.full_name)
    }

    /// Size of the content in bytes
    pub fn length(&self) -> VfsResult<u64> {
        self.file.length(&self.full_name)
    }

    /// The directory containing this file
    pub fn directory(&self) -> Option<DirectoryInfo> {
        path::parent(&self.full_name).map(|parent| {
            DirectoryInfo::new(self.file.clone(), self.directory.clone(), parent)
        })
    }

    /// The name (last segment) of the containing directory
    pub fn directory_name(&self) -> Option<&str> {
        path::parent(&self.full_name).map(path::file_name)
    }

    pub fn last_write_time_utc(&self) -> VfsResult<SystemTime> {
        self.file.last_write_time_utc(&self.full_name)
    }

    pub fn set_last_write_time_utc(&self, time: SystemTime) -> VfsResult<()> {
        self.file.set_last_write_time_utc(&self.full_name, time)
    }

    /// Copies this file and returns a view of the copy
    pub fn copy_to(&self, dest: &str, overwrite: bool) -> VfsResult<FileInfo> {
        self.file.copy(&self.full_name, dest, overwrite)?;
        Ok(FileInfo::new(self.file.clone(), self.directory.clone(), dest))
    }

    /// Moves this file; afterwards the view refers to the new location
    pub fn move_to(&mut self, dest: &str) -> VfsResult<()> {
        self.file.move_file(&self.full_name, dest)?;
        self.full_name = path::trim_end_separators(dest).to_string();
        Ok(())
    }

    pub fn delete(&self) -> VfsResult<()> {
        self.file.delete(&self.full_name)
    }
}

/// A directory identified by its full path
#[derive(Debug, Clone)]
pub struct DirectoryInfo {
    file: File,
    directory: Directory,
    full_name: String,
}

impl DirectoryInfo {
    pub fn new(file: File, directory: Directory, full_name: &str) -> Self {
        DirectoryInfo {
            file,
            directory,
            full_name: path::trim_end_separators(full_name).to_string(),
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn name(&self) -> &str {
        path::file_name(&self.full_name)
    }

    pub fn exists(&self) -> bool {
        self.directory.exists(&self.full_name)
    }

    /// The containing directory, `None` at a drive root
    pub fn parent(&self) -> Option<DirectoryInfo> {
        self.directory
            .get_parent(&self.full_name)
            .map(|parent| self.sibling(&parent))
    }

    /// The drive this directory lives on
    pub fn root(&self) -> VfsResult<DirectoryInfo> {
        let root = path::root(&self.full_name).ok_or_else(|| {
            VfsError::from(VfsErrorKind::InvalidPath)
                .with_path(self.full_name.as_str())
                .with_context(|| "Path has no root")
        })?;
        Ok(self.sibling(root))
    }

    pub fn create(&self) -> VfsResult<()> {
        self.directory.create_directory(&self.full_name)
    }

    pub fn delete(&self, recursive: bool) -> VfsResult<()> {
        self.directory.delete(&self.full_name, recursive)
    }

    pub fn files(&self) -> VfsResult<Vec<FileInfo>> {
        Ok(self
            .directory
            .get_files(&self.full_name)?
            .iter()
            .map(|file| FileInfo::new(self.file.clone(), self.directory.clone(), file))
            .collect())
    }

    pub fn directories(&self) -> VfsResult<Vec<DirectoryInfo>> {
        Ok(self
            .directory
            .get_directories(&self.full_name)?
            .iter()
            .map(|directory| self.sibling(directory))
            .collect())
    }

    fn sibling(&self, full_name: &str) -> DirectoryInfo {
        DirectoryInfo::new(self.file.clone(), self.directory.clone(), full_name)
    }
}
