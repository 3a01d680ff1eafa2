//! Whole-file operations addressed by path

use crate::error::VfsErrorKind;
use crate::extension::{encapsulate, Extension, Operation};
use crate::{path, FileSystem, VfsError, VfsFileType, VfsMetadata, VfsResult};
use std::fmt::Debug;
use std::io::Cursor;
use std::sync::Arc;
use std::time::SystemTime;

/// File operations on a [`FileSystem`], each reported to the registered extensions
#[derive(Debug, Clone)]
pub struct File {
    fs: Arc<dyn FileSystem>,
    extensions: Vec<Arc<dyn Extension>>,
}

impl File {
    pub fn new(fs: Arc<dyn FileSystem>, extensions: Vec<Arc<dyn Extension>>) -> Self {
        File { fs, extensions }
    }

    fn run<T: Debug>(
        &self,
        name: &'static str,
        paths: &[&str],
        f: impl FnOnce() -> VfsResult<T>,
    ) -> VfsResult<T> {
        encapsulate(&self.extensions, Operation::new(name, paths), f)
    }

    pub fn exists(&self, path: &str) -> bool {
        self.run("file_exists", &[path], || Ok(self.fs.file_exists(path)))
            .unwrap_or(false)
    }

    /// Removes the file; a missing file is not an error, a missing directory is
    pub fn delete(&self, path: &str) -> VfsResult<()> {
        self.run("delete_file", &[path], || self.fs.delete_file(path))
    }

    pub fn read_all_bytes(&self, path: &str) -> VfsResult<Vec<u8>> {
        self.run("read_all_bytes", &[path], || self.fs.get_file(path))
    }

    /// Reads the file as UTF-8 text
    pub fn read_all_text(&self, path: &str) -> VfsResult<String> {
        self.run("read_all_text", &[path], || self.read_text(path))
    }

    pub fn read_all_lines(&self, path: &str) -> VfsResult<Vec<String>> {
        self.run("read_all_lines", &[path], || {
            Ok(self.read_text(path)?.lines().map(str::to_string).collect())
        })
    }

    /// Writes the file, creating its directory chain first
    pub fn write_all_bytes(&self, path: &str, content: &[u8]) -> VfsResult<()> {
        self.run("write_all_bytes", &[path], || self.write(path, content))
    }

    pub fn write_all_text(&self, path: &str, text: &str) -> VfsResult<()> {
        self.run("write_all_text", &[path], || self.write(path, text.as_bytes()))
    }

    /// Appends to the file, creating it (and its directory chain) if missing
    pub fn append_all_text(&self, path: &str, text: &str) -> VfsResult<()> {
        self.run("append_all_text", &[path], || {
            let mut content = if self.fs.file_exists(path) {
                self.fs.get_file(path)?
            } else {
                vec![]
            };
            content.extend_from_slice(text.as_bytes());
            self.write(path, &content)
        })
    }

    /// A reader over a copy of the file content, positioned at the start
    pub fn open_read(&self, path: &str) -> VfsResult<Cursor<Vec<u8>>> {
        self.run("open_read", &[path], || Ok(Cursor::new(self.fs.get_file(path)?)))
    }

    /// Copies `src` to `dest`
    ///
    /// Fails with `FileExists` if `dest` exists and `overwrite` is false, and
    /// with `DirectoryNotFound` if the directory of `dest` is missing. The
    /// destination is left untouched when the copy fails.
    pub fn copy(&self, src: &str, dest: &str, overwrite: bool) -> VfsResult<()> {
        self.run("copy", &[src, dest], || {
            let content = self.fs.get_file(src)?;
            if !overwrite && self.fs.file_exists(dest) {
                return Err(VfsError::from(VfsErrorKind::FileExists).with_path(dest));
            }
            self.fs.add_file(dest, &content)
        })
        .map_err(|err| err.with_context(|| format!("Could not copy '{}' to '{}'", src, dest)))
    }

    /// Moves `src` to `dest`, creating the destination directory and replacing any file there
    pub fn move_file(&self, src: &str, dest: &str) -> VfsResult<()> {
        self.run("move_file", &[src, dest], || self.fs.move_file(src, dest))
    }

    /// Size of the content in bytes, taken from the metadata without reading the file
    pub fn length(&self, path: &str) -> VfsResult<u64> {
        self.run("length", &[path], || Ok(self.file_metadata(path)?.len))
    }

    pub fn last_write_time_utc(&self, path: &str) -> VfsResult<SystemTime> {
        self.run("last_write_time_utc", &[path], || {
            self.file_metadata(path)?.modified.ok_or_else(|| {
                VfsError::from(VfsErrorKind::NotSupported)
                    .with_path(path)
                    .with_context(|| "Could not get modification time")
            })
        })
    }

    pub fn set_last_write_time_utc(&self, path: &str, time: SystemTime) -> VfsResult<()> {
        self.run("set_last_write_time_utc", &[path], || {
            self.fs.set_modification_time(path, time)
        })
    }

    fn file_metadata(&self, path: &str) -> VfsResult<VfsMetadata> {
        let metadata = self.fs.metadata(path)?;
        if metadata.file_type != VfsFileType::File {
            return Err(VfsError::from(VfsErrorKind::FileNotFound)
                .with_path(path)
                .with_context(|| "Path is a directory"));
        }
        Ok(metadata)
    }

    fn read_text(&self, path: &str) -> VfsResult<String> {
        String::from_utf8(self.fs.get_file(path)?).map_err(|err| {
            VfsError::from(VfsErrorKind::Other(err.to_string()))
                .with_path(path)
                .with_context(|| "Could not read file as UTF-8 text")
        })
    }

    fn write(&self, path: &str, content: &[u8]) -> VfsResult<()> {
        if let Some(directory) = path::parent(path) {
            self.fs.create_directory(directory)?;
        }
        self.fs.add_file(path, content)
    }
}
