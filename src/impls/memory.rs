//! An ephemeral in-memory file system, intended mainly for unit tests

use crate::clock::{Clock, SystemClock};
use crate::error::VfsErrorKind;
use crate::path::{self, split_file_path};
use crate::tree::DirectoryNode;
use crate::{FileSystem, VfsError, VfsFileType, VfsMetadata, VfsResult};
use std::fmt::{self, Debug, Formatter};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::SystemTime;

/// An ephemeral in-memory file system, intended mainly for unit tests
///
/// Directories form a tree below a single root. Names are matched
/// case-insensitively. Every mutation holds the instance's write lock, so
/// concurrent writers never corrupt a directory's child or file list.
pub struct MemoryFS {
    root: RwLock<DirectoryNode>,
    clock: Arc<dyn Clock>,
}

impl Debug for MemoryFS {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("In Memory File System")
    }
}

impl MemoryFS {
    /// Create a new in-memory filesystem stamping files with the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a new in-memory filesystem stamping files with the given clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        MemoryFS {
            root: RwLock::new(DirectoryNode::new("")),
            clock,
        }
    }

    /// Fails with `DirectoryNotFound` unless the directory containing this file exists
    pub fn ensure_parent_directory_exists(&self, path: &str) -> VfsResult<()> {
        let (directory, _) = split_file_path(path)?;
        let root = self.read();
        root.resolve(&directory).map_err(|depth| {
            directory_not_found(&directory, depth)
                .with_path(path)
                .with_context(|| "Parent directory does not exist")
        })?;
        Ok(())
    }

    /// Renders every directory and its files as indented text
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.read().dump("", 0, &mut out);
        out
    }

    fn read(&self) -> RwLockReadGuard<'_, DirectoryNode> {
        self.root.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, DirectoryNode> {
        self.root.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn checked_segments(path: &str) -> VfsResult<Vec<&str>> {
        path::check_path(path)?;
        Ok(path::segments(path))
    }
}

impl Default for MemoryFS {
    fn default() -> Self {
        Self::new()
    }
}

/// A file occupies the segment at `depth`, so no directory can live there
fn file_in_the_way(segments: &[&str], depth: usize) -> VfsError {
    VfsError::from(VfsErrorKind::FileExists).with_path(segments[..=depth].join("\\"))
}

fn directory_not_found(segments: &[&str], depth: usize) -> VfsError {
    VfsError::from(VfsErrorKind::DirectoryNotFound {
        missing: segments[depth].to_string(),
    })
}

impl FileSystem for MemoryFS {
    fn directory_exists(&self, path: &str) -> bool {
        match Self::checked_segments(path) {
            Ok(segments) => self.read().resolve(&segments).is_ok(),
            Err(_) => false,
        }
    }

    fn file_exists(&self, path: &str) -> bool {
        match split_file_path(path) {
            Ok((directory, name)) => self
                .read()
                .resolve(&directory)
                .map(|node| node.file(name).is_some())
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    fn create_directory(&self, path: &str) -> VfsResult<()> {
        let segments = Self::checked_segments(path)
            .map_err(|err| err.with_context(|| "Could not create directory"))?;
        self.write()
            .create_along_path(&segments)
            .map_err(|depth| {
                file_in_the_way(&segments, depth)
                    .with_context(|| format!("Could not create directory '{}'", path))
            })?;
        Ok(())
    }

    fn add_file(&self, path: &str, content: &[u8]) -> VfsResult<()> {
        let (directory, name) =
            split_file_path(path).map_err(|err| err.with_context(|| "Could not write file"))?;
        let mut root = self.write();
        let parent = root.resolve_mut(&directory).map_err(|depth| {
            directory_not_found(&directory, depth)
                .with_path(path)
                .with_context(|| "Could not write file")
        })?;
        if parent.has_child(name) {
            return Err(VfsError::from(VfsErrorKind::FileExists)
                .with_path(path)
                .with_context(|| "A directory with this name already exists"));
        }
        parent.write_file(name, content.to_vec(), self.clock.now());
        log::debug!("Wrote {} bytes to '{}'", content.len(), path);
        Ok(())
    }

    fn get_file(&self, path: &str) -> VfsResult<Vec<u8>> {
        let (directory, name) =
            split_file_path(path).map_err(|err| err.with_context(|| "Could not read file"))?;
        let root = self.read();
        let parent = root.resolve(&directory).map_err(|depth| {
            directory_not_found(&directory, depth)
                .with_path(path)
                .with_context(|| "Could not read file")
        })?;
        let file = parent.file(name).ok_or_else(|| {
            VfsError::from(VfsErrorKind::FileNotFound)
                .with_path(path)
                .with_context(|| "Could not read file")
        })?;
        Ok(file.content.clone())
    }

    fn delete_file(&self, path: &str) -> VfsResult<()> {
        let (directory, name) =
            split_file_path(path).map_err(|err| err.with_context(|| "Could not remove file"))?;
        let mut root = self.write();
        let parent = root.resolve_mut(&directory).map_err(|depth| {
            directory_not_found(&directory, depth)
                .with_path(path)
                .with_context(|| "Could not remove file")
        })?;
        if parent.remove_file(name).is_some() {
            log::debug!("Removed file '{}'", path);
        }
        Ok(())
    }

    fn delete_directory(&self, path: &str) -> VfsResult<()> {
        let segments = Self::checked_segments(path)
            .map_err(|err| err.with_context(|| "Could not remove directory"))?;
        let (name, parent_segments) = segments.split_last().ok_or_else(|| {
            VfsError::from(VfsErrorKind::InvalidPath)
                .with_path(path)
                .with_context(|| "Could not remove the root directory")
        })?;
        let mut root = self.write();
        let not_found = |depth: usize| {
            directory_not_found(&segments, depth)
                .with_path(path)
                .with_context(|| "Could not remove directory")
        };
        let parent = root.resolve_mut(parent_segments).map_err(not_found)?;
        parent
            .remove_child(name)
            .ok_or_else(|| not_found(parent_segments.len()))?;
        log::debug!("Removed directory '{}'", path);
        Ok(())
    }

    fn delete_empty_directory(&self, path: &str) -> VfsResult<()> {
        let segments = Self::checked_segments(path)
            .map_err(|err| err.with_context(|| "Could not remove directory"))?;
        let (name, parent_segments) = segments.split_last().ok_or_else(|| {
            VfsError::from(VfsErrorKind::InvalidPath)
                .with_path(path)
                .with_context(|| "Could not remove the root directory")
        })?;
        let mut root = self.write();
        let not_found = |depth: usize| {
            directory_not_found(&segments, depth)
                .with_path(path)
                .with_context(|| "Could not remove directory")
        };
        let parent = root.resolve_mut(parent_segments).map_err(not_found)?;
        let target = parent
            .resolve(&[*name])
            .map_err(|_| not_found(parent_segments.len()))?;
        if !(target.children().is_empty() && target.files().is_empty()) {
            return Err(VfsError::from(VfsErrorKind::DirectoryNotEmpty)
                .with_path(path)
                .with_context(|| "Could not remove directory"));
        }
        parent.remove_child(name);
        log::debug!("Removed empty directory '{}'", path);
        Ok(())
    }

    fn subdirectories_of(&self, path: &str) -> VfsResult<Vec<String>> {
        let segments = Self::checked_segments(path)
            .map_err(|err| err.with_context(|| "Could not read directory"))?;
        let root = self.read();
        let node = root.resolve(&segments).map_err(|depth| {
            directory_not_found(&segments, depth)
                .with_path(path)
                .with_context(|| "Could not read directory")
        })?;
        Ok(node
            .children()
            .iter()
            .map(|child| path::join(path, child.name()))
            .collect())
    }

    fn files_of(&self, path: &str) -> VfsResult<Vec<String>> {
        let segments = Self::checked_segments(path)
            .map_err(|err| err.with_context(|| "Could not read directory"))?;
        let root = self.read();
        let node = root.resolve(&segments).map_err(|depth| {
            directory_not_found(&segments, depth)
                .with_path(path)
                .with_context(|| "Could not read directory")
        })?;
        Ok(node
            .files()
            .iter()
            .map(|file| path::join(path, &file.name))
            .collect())
    }

    fn subdirectories_of_recursive(&self, path: &str) -> VfsResult<Vec<String>> {
        let segments = Self::checked_segments(path)
            .map_err(|err| err.with_context(|| "Could not read directory"))?;
        let root = self.read();
        let node = root.resolve(&segments).map_err(|depth| {
            directory_not_found(&segments, depth)
                .with_path(path)
                .with_context(|| "Could not read directory")
        })?;
        let mut directories = vec![];
        node.collect_directories(path, &mut directories);
        Ok(directories)
    }

    fn files_of_recursive(&self, path: &str) -> VfsResult<Vec<String>> {
        let segments = Self::checked_segments(path)
            .map_err(|err| err.with_context(|| "Could not read directory"))?;
        let root = self.read();
        let node = root.resolve(&segments).map_err(|depth| {
            directory_not_found(&segments, depth)
                .with_path(path)
                .with_context(|| "Could not read directory")
        })?;
        let mut files = vec![];
        node.collect_files(path, &mut files);
        Ok(files)
    }

    fn metadata(&self, path: &str) -> VfsResult<VfsMetadata> {
        let segments = Self::checked_segments(path)
            .map_err(|err| err.with_context(|| "Could not get metadata"))?;
        let root = self.read();
        if root.resolve(&segments).is_ok() {
            return Ok(VfsMetadata {
                file_type: VfsFileType::Directory,
                len: 0,
                modified: None,
            });
        }
        let (directory, name) = split_file_path(path)?;
        let parent = root.resolve(&directory).map_err(|depth| {
            directory_not_found(&directory, depth)
                .with_path(path)
                .with_context(|| "Could not get metadata")
        })?;
        let file = parent.file(name).ok_or_else(|| {
            VfsError::from(VfsErrorKind::FileNotFound)
                .with_path(path)
                .with_context(|| "Could not get metadata")
        })?;
        Ok(VfsMetadata {
            file_type: VfsFileType::File,
            len: file.content.len() as u64,
            modified: file.last_write_time_utc,
        })
    }

    fn set_modification_time(&self, path: &str, time: SystemTime) -> VfsResult<()> {
        let (directory, name) = split_file_path(path)
            .map_err(|err| err.with_context(|| "Could not set modification time"))?;
        let mut root = self.write();
        let parent = root.resolve_mut(&directory).map_err(|depth| {
            directory_not_found(&directory, depth)
                .with_path(path)
                .with_context(|| "Could not set modification time")
        })?;
        let file = parent.file_mut(name).ok_or_else(|| {
            VfsError::from(VfsErrorKind::FileNotFound)
                .with_path(path)
                .with_context(|| "Could not set modification time")
        })?;
        file.last_write_time_utc = Some(time);
        Ok(())
    }

    fn move_file(&self, src: &str, dest: &str) -> VfsResult<()> {
        let (src_directory, src_name) =
            split_file_path(src).map_err(|err| err.with_context(|| "Could not move file"))?;
        let (dest_directory, dest_name) =
            split_file_path(dest).map_err(|err| err.with_context(|| "Could not move file"))?;
        let file_not_found = || {
            VfsError::from(VfsErrorKind::FileNotFound)
                .with_path(src)
                .with_context(|| "Could not move file")
        };

        let mut root = self.write();
        let source = root.resolve(&src_directory).map_err(|depth| {
            directory_not_found(&src_directory, depth)
                .with_path(src)
                .with_context(|| "Could not move file")
        })?;
        if source.file(src_name).is_none() {
            return Err(file_not_found());
        }
        if path::same_path(src, dest) {
            return Ok(());
        }
        let destination = root.create_along_path(&dest_directory).map_err(|depth| {
            file_in_the_way(&dest_directory, depth)
                .with_context(|| format!("Could not move file to '{}'", dest))
        })?;
        if destination.has_child(dest_name) {
            return Err(VfsError::from(VfsErrorKind::FileExists)
                .with_path(dest)
                .with_context(|| "A directory with this name already exists"));
        }
        let mut record = root
            .resolve_mut(&src_directory)
            .ok()
            .and_then(|source| source.remove_file(src_name))
            .ok_or_else(file_not_found)?;
        record.name = dest_name.to_string();
        root.resolve_mut(&dest_directory)
            .map_err(|depth| {
                directory_not_found(&dest_directory, depth)
                    .with_path(dest)
                    .with_context(|| "Could not move file")
            })?
            .insert_file(record);
        log::debug!("Moved file '{}' to '{}'", src, dest);
        Ok(())
    }
}
