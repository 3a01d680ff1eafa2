//! Error and Result definitions

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

/// The error type of this crate
#[derive(Debug)]
pub struct VfsError {
    /// The path this error was encountered in
    path: String,
    /// The kind of error
    kind: VfsErrorKind,
    /// An additional human readable string describing the context for this error
    context: String,
    /// The underlying error
    cause: Option<Box<VfsError>>,
}

/// The only way to create a VfsError is via a VfsErrorKind
///
/// This conversion implements certain normalizations
impl From<VfsErrorKind> for VfsError {
    fn from(kind: VfsErrorKind) -> Self {
        let kind = match kind {
            VfsErrorKind::IoError(io) => match io.kind() {
                io::ErrorKind::NotFound => VfsErrorKind::FileNotFound,
                io::ErrorKind::AlreadyExists => VfsErrorKind::FileExists,
                _ => VfsErrorKind::IoError(io),
            },
            other => other,
        };

        Self {
            path: "PATH NOT FILLED BY VFS LAYER".into(),
            kind,
            context: "An error occured".into(),
            cause: None,
        }
    }
}

impl From<io::Error> for VfsError {
    fn from(err: io::Error) -> Self {
        Self::from(VfsErrorKind::IoError(err))
    }
}

impl VfsError {
    pub(crate) fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_context<C, F>(mut self, context: F) -> Self
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.context = context().to_string();
        self
    }

    pub fn with_cause(mut self, cause: VfsError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn kind(&self) -> &VfsErrorKind {
        &self.kind
    }

    pub fn path(&self) -> &String {
        &self.path
    }

    /// True for `DirectoryNotFound`, regardless of which segment was missing
    pub fn is_directory_not_found(&self) -> bool {
        matches!(self.kind, VfsErrorKind::DirectoryNotFound { .. })
    }
}

impl Error for VfsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let Some(cause) = &self.cause {
            Some(cause)
        } else {
            None
        }
    }
}

impl std::fmt::Display for VfsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} for '{}': {}", self.context, self.path, self.kind())
    }
}

/// The kinds of errors that can occur
#[derive(Debug)]
pub enum VfsErrorKind {
    /// A generic I/O error
    ///
    /// Certain standard I/O errors are normalized to their VfsErrorKind counterparts
    IoError(io::Error),

    /// A directory on the way to the requested item does not exist
    DirectoryNotFound {
        /// The first path segment that could not be resolved
        missing: String,
    },

    /// The directory exists but the requested file is not in it
    FileNotFound,

    /// A non-recursive delete targeted a directory that still has content
    DirectoryNotEmpty,

    /// There is already a file at the given path
    FileExists,

    /// The given path is malformed, e.g. because it is empty or contains wildcards
    InvalidPath,

    /// Functionality not supported by this filesystem
    NotSupported,

    /// Generic error variant
    Other(String),
}

impl std::fmt::Display for VfsErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VfsErrorKind::IoError(cause) => {
                write!(f, "IO error: {}", cause)
            }
            VfsErrorKind::DirectoryNotFound { missing } => {
                write!(f, "Could not find a part of the path, '{}' does not exist", missing)
            }
            VfsErrorKind::FileNotFound => {
                write!(f, "The file could not be found")
            }
            VfsErrorKind::DirectoryNotEmpty => {
                write!(f, "The directory is not empty")
            }
            VfsErrorKind::FileExists => {
                write!(f, "File already exists")
            }
            VfsErrorKind::InvalidPath => {
                write!(f, "The path is invalid")
            }
            VfsErrorKind::NotSupported => {
                write!(f, "Functionality not supported by this filesystem")
            }
            VfsErrorKind::Other(message) => {
                write!(f, "FileSystem error: {}", message)
            }
        }
    }
}

/// The result type of this crate
pub type VfsResult<T> = std::result::Result<T, VfsError>;
