//! The application-facing surface: files, directories, path-bound views and the environment
//!
//! An [`Access`] bundles a [`FileSystem`], an [`Environment`] and the
//! [`Extension`]s every file and directory operation is reported to. Code
//! written against it runs unchanged on the host or fully in memory.
//!
//! ```
//! use vfs_access::access::Access;
//! # use vfs_access::VfsResult;
//! # fn main() -> VfsResult<()> {
//! let access = Access::in_memory();
//! access.file().write_all_text(r"c:\folder\file.txt", "Hello, world!")?;
//! assert_eq!(access.file().read_all_text(r"C:\FOLDER\file.txt")?, "Hello, world!");
//! # Ok(())
//! # }
//! ```

mod directory;
mod environment;
mod file;
mod info;

pub use directory::Directory;
pub use environment::{Environment, EnvironmentAccess, MemoryEnvironment, SystemEnvironment};
pub use file::File;
pub use info::{DirectoryInfo, FileInfo};

use crate::extension::{Extension, LoggingExtension};
use crate::{FileSystem, MemoryFS, PhysicalFS};
use std::path::PathBuf;
use std::sync::Arc;

/// Entry point bundling a file system, an environment and the registered extensions
#[derive(Debug, Clone)]
pub struct Access {
    fs: Arc<dyn FileSystem>,
    environment: Arc<dyn Environment>,
    extensions: Vec<Arc<dyn Extension>>,
}

impl Access {
    pub fn new(fs: Arc<dyn FileSystem>, environment: Arc<dyn Environment>) -> Self {
        Access {
            fs,
            environment,
            extensions: vec![],
        }
    }

    /// A fresh in-memory file system and a simulated environment
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryFS::new()), Arc::new(MemoryEnvironment::default()))
    }

    /// The host file system below `root` and the process environment
    pub fn physical(root: PathBuf) -> Self {
        Self::new(Arc::new(PhysicalFS::new(root)), Arc::new(SystemEnvironment::new()))
    }

    /// Registers an extension; extensions are notified in registration order
    pub fn with_extension(mut self, extension: Arc<dyn Extension>) -> Self {
        self.extensions.push(extension);
        self
    }

    /// Registers a [`LoggingExtension`]
    pub fn with_logging(self) -> Self {
        self.with_extension(Arc::new(LoggingExtension))
    }

    pub fn file_system(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    /// The environment, with every call reported to the registered extensions
    pub fn environment(&self) -> EnvironmentAccess {
        EnvironmentAccess::new(self.environment.clone(), self.extensions.clone())
    }

    pub fn file(&self) -> File {
        File::new(self.fs.clone(), self.extensions.clone())
    }

    pub fn directory(&self) -> Directory {
        Directory::new(self.fs.clone(), self.extensions.clone())
    }

    pub fn file_info(&self, path: &str) -> FileInfo {
        FileInfo::new(self.file(), self.directory(), path)
    }

    pub fn directory_info(&self, path: &str) -> DirectoryInfo {
        DirectoryInfo::new(self.file(), self.directory(), path)
    }
}
