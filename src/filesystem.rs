//! The filesystem trait definitions needed to implement new virtual filesystems

use crate::error::VfsErrorKind;
use crate::{path, VfsError, VfsResult};
use std::fmt::Debug;
use std::sync::Arc;
use std::time::SystemTime;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum VfsFileType {
    File,
    Directory,
}

/// File metadata information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VfsMetadata {
    /// The type of file
    pub file_type: VfsFileType,
    /// Length of the file in bytes, 0 for directories
    pub len: u64,
    /// Last write time of the file, if known (UTC)
    pub modified: Option<SystemTime>,
}

/// File system implementations must implement this trait
///
/// All path parameters are absolute paths of the form `<drive>:\<segments>`.
/// Implementations split them on `\` (or `/`) and ignore empty segments, so
/// trailing separators are tolerated. Paths returned from enumerations are the
/// queried path joined with the child names.
///
/// Please use the test_macros [test_macros::test_vfs!] to check conformance.
pub trait FileSystem: Debug + Sync + Send + 'static {
    /// Returns true if a directory exists at this path
    fn directory_exists(&self, path: &str) -> bool;
    /// Returns true if the parent directory exists and contains this file
    fn file_exists(&self, path: &str) -> bool;
    /// Creates the directory and all missing ancestors; succeeds if it already exists
    fn create_directory(&self, path: &str) -> VfsResult<()>;
    /// Writes a whole file, replacing existing content; the parent directory must exist
    fn add_file(&self, path: &str, content: &[u8]) -> VfsResult<()>;
    /// Returns a copy of the whole file content
    fn get_file(&self, path: &str) -> VfsResult<Vec<u8>>;
    /// Removes the file if present; the parent directory must exist
    fn delete_file(&self, path: &str) -> VfsResult<()>;
    /// Removes the directory together with everything below it
    fn delete_directory(&self, path: &str) -> VfsResult<()>;
    /// Removes a directory only if it holds neither files nor subdirectories
    ///
    /// The emptiness check and the removal happen as one step, so an entry
    /// added concurrently is either refused or makes this fail with `DirectoryNotEmpty`.
    fn delete_empty_directory(&self, path: &str) -> VfsResult<()>;
    /// Immediate child directories of this directory
    fn subdirectories_of(&self, path: &str) -> VfsResult<Vec<String>>;
    /// Immediate files of this directory
    fn files_of(&self, path: &str) -> VfsResult<Vec<String>>;
    /// Returns the metadata of the file or directory at this path
    fn metadata(&self, path: &str) -> VfsResult<VfsMetadata>;

    /// Sets the files modification timestamp, if the implementation supports it
    fn set_modification_time(&self, _path: &str, _time: SystemTime) -> VfsResult<()> {
        Err(VfsError::from(VfsErrorKind::NotSupported))
    }

    /// Every directory below this one, pre-order
    fn subdirectories_of_recursive(&self, path: &str) -> VfsResult<Vec<String>> {
        let mut result = vec![];
        for child in self.subdirectories_of(path)? {
            result.push(child.clone());
            result.extend(self.subdirectories_of_recursive(&child)?);
        }
        Ok(result)
    }

    /// Every file below this directory; a directory's own files come before its children's
    fn files_of_recursive(&self, path: &str) -> VfsResult<Vec<String>> {
        let mut result = self.files_of(path)?;
        for child in self.subdirectories_of(path)? {
            result.extend(self.files_of_recursive(&child)?);
        }
        Ok(result)
    }

    /// Moves a file, creating the destination directory and overwriting any destination file
    fn move_file(&self, src: &str, dest: &str) -> VfsResult<()> {
        let content = self.get_file(src)?;
        if path::same_path(src, dest) {
            return Ok(());
        }
        if let Some(directory) = path::parent(dest) {
            self.create_directory(directory)?;
        }
        self.add_file(dest, &content)?;
        self.delete_file(src)
    }
}

impl FileSystem for Box<dyn FileSystem> {
    fn directory_exists(&self, path: &str) -> bool {
        self.as_ref().directory_exists(path)
    }

    fn file_exists(&self, path: &str) -> bool {
        self.as_ref().file_exists(path)
    }

    fn create_directory(&self, path: &str) -> VfsResult<()> {
        self.as_ref().create_directory(path)
    }

    fn add_file(&self, path: &str, content: &[u8]) -> VfsResult<()> {
        self.as_ref().add_file(path, content)
    }

    fn get_file(&self, path: &str) -> VfsResult<Vec<u8>> {
        self.as_ref().get_file(path)
    }

    fn delete_file(&self, path: &str) -> VfsResult<()> {
        self.as_ref().delete_file(path)
    }

    fn delete_directory(&self, path: &str) -> VfsResult<()> {
        self.as_ref().delete_directory(path)
    }

    fn delete_empty_directory(&self, path: &str) -> VfsResult<()> {
        self.as_ref().delete_empty_directory(path)
    }

    fn subdirectories_of(&self, path: &str) -> VfsResult<Vec<String>> {
        self.as_ref().subdirectories_of(path)
    }

    fn files_of(&self, path: &str) -> VfsResult<Vec<String>> {
        self.as_ref().files_of(path)
    }

    fn metadata(&self, path: &str) -> VfsResult<VfsMetadata> {
        self.as_ref().metadata(path)
    }

    fn set_modification_time(&self, path: &str, time: SystemTime) -> VfsResult<()> {
        self.as_ref().set_modification_time(path, time)
    }

    fn subdirectories_of_recursive(&self, path: &str) -> VfsResult<Vec<String>> {
        self.as_ref().subdirectories_of_recursive(path)
    }

    fn files_of_recursive(&self, path: &str) -> VfsResult<Vec<String>> {
        self.as_ref().files_of_recursive(path)
    }

    fn move_file(&self, src: &str, dest: &str) -> VfsResult<()> {
        self.as_ref().move_file(src, dest)
    }
}

impl FileSystem for Arc<dyn FileSystem> {
    fn directory_exists(&self, path: &str) -> bool {
        self.as_ref().directory_exists(path)
    }

    fn file_exists(&self, path: &str) -> bool {
        self.as_ref().file_exists(path)
    }

    fn create_directory(&self, path: &str) -> VfsResult<()> {
        self.as_ref().create_directory(path)
    }

    fn add_file(&self, path: &str, content: &[u8]) -> VfsResult<()> {
        self.as_ref().add_file(path, content)
    }

    fn get_file(&self, path: &str) -> VfsResult<Vec<u8>> {
        self.as_ref().get_file(path)
    }

    fn delete_file(&self, path: &str) -> VfsResult<()> {
        self.as_ref().delete_file(path)
    }

    fn delete_directory(&self, path: &str) -> VfsResult<()> {
        self.as_ref().delete_directory(path)
    }

    fn delete_empty_directory(&self, path: &str) -> VfsResult<()> {
        self.as_ref().delete_empty_directory(path)
    }

    fn subdirectories_of(&self, path: &str) -> VfsResult<Vec<String>> {
        self.as_ref().subdirectories_of(path)
    }

    fn files_of(&self, path: &str) -> VfsResult<Vec<String>> {
        self.as_ref().files_of(path)
    }

    fn metadata(&self, path: &str) -> VfsResult<VfsMetadata> {
        self.as_ref().metadata(path)
    }

    fn set_modification_time(&self, path: &str, time: SystemTime) -> VfsResult<()> {
        self.as_ref().set_modification_time(path, time)
    }

    fn subdirectories_of_recursive(&self, path: &str) -> VfsResult<Vec<String>> {
        self.as_ref().subdirectories_of_recursive(path)
    }

    fn files_of_recursive(&self, path: &str) -> VfsResult<Vec<String>> {
        self.as_ref().files_of_recursive(path)
    }

    fn move_file(&self, src: &str, dest: &str) -> VfsResult<()> {
        self.as_ref().move_file(src, dest)
    }
}
