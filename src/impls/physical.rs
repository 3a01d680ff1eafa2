//! A "physical" file system implementation using the underlying OS file system

use crate::error::VfsErrorKind;
use crate::path::{self, split_file_path};
use crate::{FileSystem, VfsError, VfsFileType, VfsMetadata, VfsResult};
use std::fs::{self, File};
use std::path::PathBuf;
use std::time::SystemTime;

/// Maps virtual paths onto a directory of the host file system
///
/// Every segment of a virtual path, including the drive, becomes a directory
/// below `root`. `.` and `..` segments are rejected so that no path can
/// escape the root.
#[derive(Debug)]
pub struct PhysicalFS {
    root: PathBuf,
}

impl PhysicalFS {
    pub fn new(root: PathBuf) -> Self {
        PhysicalFS { root }
    }

    fn get_path(&self, path: &str) -> VfsResult<PathBuf> {
        path::check_path(path)?;
        let mut result = self.root.clone();
        for segment in path::segments(path) {
            if segment == "." || segment == ".." {
                return Err(VfsError::from(VfsErrorKind::InvalidPath)
                    .with_path(path)
                    .with_context(|| "Relative path segments are not allowed"));
            }
            result.push(segment);
        }
        Ok(result)
    }

    /// Builds a `DirectoryNotFound` naming the first segment that is not a directory
    fn directory_not_found(&self, path: &str, directory: &[&str]) -> VfsError {
        let mut current = self.root.clone();
        let missing = directory
            .iter()
            .find(|segment| {
                current.push(segment);
                !current.is_dir()
            })
            .map(|segment| segment.to_string())
            .unwrap_or_default();
        VfsError::from(VfsErrorKind::DirectoryNotFound { missing }).with_path(path)
    }

    /// Resolves a file path, failing unless its parent directory exists
    fn get_file_path(&self, path: &str) -> VfsResult<PathBuf> {
        let (directory, _) = split_file_path(path)?;
        let target = self.get_path(path)?;
        match target.parent() {
            Some(parent) if parent.is_dir() => Ok(target),
            _ => Err(self.directory_not_found(path, &directory)),
        }
    }

    /// Resolves a directory path, failing unless it exists
    fn get_directory_path(&self, path: &str) -> VfsResult<PathBuf> {
        let target = self.get_path(path)?;
        if !target.is_dir() {
            return Err(self.directory_not_found(path, &path::segments(path)));
        }
        Ok(target)
    }

    fn entries_of(&self, path: &str, file_type: VfsFileType) -> VfsResult<Vec<String>> {
        let directory = self.get_directory_path(path)?;
        let mut names = vec![];
        for entry in fs::read_dir(directory)? {
            let entry = entry?;
            let entry_type = entry.file_type()?;
            let wanted = match file_type {
                VfsFileType::Directory => entry_type.is_dir(),
                VfsFileType::File => entry_type.is_file(),
            };
            if wanted {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names.iter().map(|name| path::join(path, name)).collect())
    }
}

impl FileSystem for PhysicalFS {
    fn directory_exists(&self, path: &str) -> bool {
        self.get_path(path)
            .map(|target| target.is_dir())
            .unwrap_or(false)
    }

    fn file_exists(&self, path: &str) -> bool {
        split_file_path(path).is_ok()
            && self
                .get_path(path)
                .map(|target| target.is_file())
                .unwrap_or(false)
    }

    fn create_directory(&self, path: &str) -> VfsResult<()> {
        let target = self
            .get_path(path)
            .map_err(|err| err.with_context(|| "Could not create directory"))?;
        fs::create_dir_all(target).map_err(|err| {
            VfsError::from(err)
                .with_path(path)
                .with_context(|| "Could not create directory")
        })
    }

    fn add_file(&self, path: &str, content: &[u8]) -> VfsResult<()> {
        let target = self
            .get_file_path(path)
            .map_err(|err| err.with_context(|| "Could not write file"))?;
        fs::write(target, content).map_err(|err| {
            VfsError::from(err)
                .with_path(path)
                .with_context(|| "Could not write file")
        })?;
        log::debug!("Wrote {} bytes to '{}'", content.len(), path);
        Ok(())
    }

    fn get_file(&self, path: &str) -> VfsResult<Vec<u8>> {
        let target = self
            .get_file_path(path)
            .map_err(|err| err.with_context(|| "Could not read file"))?;
        if !target.is_file() {
            return Err(VfsError::from(VfsErrorKind::FileNotFound)
                .with_path(path)
                .with_context(|| "Could not read file"));
        }
        fs::read(target).map_err(|err| {
            VfsError::from(err)
                .with_path(path)
                .with_context(|| "Could not read file")
        })
    }

    fn delete_file(&self, path: &str) -> VfsResult<()> {
        let target = self
            .get_file_path(path)
            .map_err(|err| err.with_context(|| "Could not remove file"))?;
        if target.is_file() {
            fs::remove_file(target).map_err(|err| {
                VfsError::from(err)
                    .with_path(path)
                    .with_context(|| "Could not remove file")
            })?;
            log::debug!("Removed file '{}'", path);
        }
        Ok(())
    }

    fn delete_directory(&self, path: &str) -> VfsResult<()> {
        if path::segments(path).is_empty() {
            return Err(VfsError::from(VfsErrorKind::InvalidPath)
                .with_path(path)
                .with_context(|| "Could not remove the root directory"));
        }
        let target = self
            .get_directory_path(path)
            .map_err(|err| err.with_context(|| "Could not remove directory"))?;
        fs::remove_dir_all(target).map_err(|err| {
            VfsError::from(err)
                .with_path(path)
                .with_context(|| "Could not remove directory")
        })?;
        log::debug!("Removed directory '{}'", path);
        Ok(())
    }

    fn delete_empty_directory(&self, path: &str) -> VfsResult<()> {
        if path::segments(path).is_empty() {
            return Err(VfsError::from(VfsErrorKind::InvalidPath)
                .with_path(path)
                .with_context(|| "Could not remove the root directory"));
        }
        let target = self
            .get_directory_path(path)
            .map_err(|err| err.with_context(|| "Could not remove directory"))?;
        if fs::read_dir(&target)?.next().is_some() {
            return Err(VfsError::from(VfsErrorKind::DirectoryNotEmpty)
                .with_path(path)
                .with_context(|| "Could not remove directory"));
        }
        // remove_dir refuses a directory that filled up in the meantime
        fs::remove_dir(target).map_err(|err| {
            VfsError::from(err)
                .with_path(path)
                .with_context(|| "Could not remove directory")
        })?;
        log::debug!("Removed empty directory '{}'", path);
        Ok(())
    }

    fn subdirectories_of(&self, path: &str) -> VfsResult<Vec<String>> {
        self.entries_of(path, VfsFileType::Directory)
            .map_err(|err| err.with_context(|| "Could not read directory"))
    }

    fn files_of(&self, path: &str) -> VfsResult<Vec<String>> {
        self.entries_of(path, VfsFileType::File)
            .map_err(|err| err.with_context(|| "Could not read directory"))
    }

    fn metadata(&self, path: &str) -> VfsResult<VfsMetadata> {
        let target = self
            .get_path(path)
            .map_err(|err| err.with_context(|| "Could not get metadata"))?;
        if target.is_dir() {
            return Ok(VfsMetadata {
                file_type: VfsFileType::Directory,
                len: 0,
                modified: None,
            });
        }
        let target = self
            .get_file_path(path)
            .map_err(|err| err.with_context(|| "Could not get metadata"))?;
        let metadata = fs::metadata(target).map_err(|err| {
            VfsError::from(err)
                .with_path(path)
                .with_context(|| "Could not get metadata")
        })?;
        Ok(VfsMetadata {
            file_type: VfsFileType::File,
            len: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }

    fn set_modification_time(&self, path: &str, time: SystemTime) -> VfsResult<()> {
        let target = self
            .get_file_path(path)
            .map_err(|err| err.with_context(|| "Could not set modification time"))?;
        File::options()
            .write(true)
            .open(target)
            .and_then(|file| file.set_modified(time))
            .map_err(|err| {
                VfsError::from(err)
                    .with_path(path)
                    .with_context(|| "Could not set modification time")
            })
    }

    fn move_file(&self, src: &str, dest: &str) -> VfsResult<()> {
        let source = self
            .get_file_path(src)
            .map_err(|err| err.with_context(|| "Could not move file"))?;
        if !source.is_file() {
            return Err(VfsError::from(VfsErrorKind::FileNotFound)
                .with_path(src)
                .with_context(|| "Could not move file"));
        }
        if path::same_path(src, dest) {
            return Ok(());
        }
        split_file_path(dest).map_err(|err| err.with_context(|| "Could not move file"))?;
        let target = self
            .get_path(dest)
            .map_err(|err| err.with_context(|| "Could not move file"))?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                VfsError::from(err)
                    .with_path(dest)
                    .with_context(|| "Could not create directory")
            })?;
        }
        fs::rename(source, target).map_err(|err| {
            VfsError::from(err)
                .with_path(src)
                .with_context(|| "Could not move file")
        })?;
        log::debug!("Moved file '{}' to '{}'", src, dest);
        Ok(())
    }
}
