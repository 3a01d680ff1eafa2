//! Virtual file system access
//!
//! The virtual file system abstraction generalizes over file systems and allows
//! application code to run against the host file system or against an
//! in-memory implementation (i.e. for fast, deterministic unit tests)
//!
//! Paths follow the `<drive>:\<segments>` convention and are compared
//! case-insensitively. The crate consists of these layers:
//!
//!  * **FileSystem** - the backend trait: exists checks, create, add, get, delete, move and enumeration
//!  * **Search** - wildcard (`*`, `?`) filtered enumeration, top level or recursive
//!  * **Access** - file, directory, path-bound info and environment facades, with
//!    extension hooks around every operation
//!
//! This crate currently has the following implementations:
//!
//!  * **PhysicalFS** - the actual filesystem of the underlying OS, mapped below a root directory
//!  * **MemoryFS** - an ephemeral in-memory implementation (intended for unit tests)
//!
//! # Usage Examples
//!
//! ```
//! use vfs_access::{FileSystem, MemoryFS, VfsResult};
//! use vfs_access::search::{find_files, SearchOption};
//! # fn main() -> VfsResult<()> {
//! let fs = MemoryFS::new();
//! fs.create_directory(r"c:\top\folder\sub")?;
//! fs.add_file(r"c:\top\folder\2.txt", b"two")?;
//! fs.add_file(r"c:\top\folder\1.pdf", b"one")?;
//! fs.add_file(r"c:\top\folder\sub\y.txt", b"why")?;
//!
//! let found = find_files(&fs, r"c:\top\folder\", "*.txt", SearchOption::AllDirectories)?;
//! assert_eq!(found, vec![r"c:\top\folder\2.txt", r"c:\top\folder\sub\y.txt"]);
//! # Ok(())
//! # }
//! ```

#[cfg(any(test, feature = "export-test-macros"))]
#[macro_use]
pub mod test_macros;

pub mod access;
pub mod clock;
pub mod error;
pub mod extension;
pub mod filesystem;
pub mod impls;
pub mod path;
pub mod pattern;
pub mod search;
mod tree;

pub use access::Access;
pub use error::{VfsError, VfsResult};
pub use filesystem::{FileSystem, VfsFileType, VfsMetadata};
pub use impls::memory::MemoryFS;
pub use impls::physical::PhysicalFS;
