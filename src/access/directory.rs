//! Directory operations addressed by path

use crate::extension::{encapsulate, Extension, Operation};
use crate::search::{self, SearchOption};
use crate::{path, FileSystem, VfsResult};
use std::fmt::Debug;
use std::sync::Arc;

/// Directory operations on a [`FileSystem`], each reported to the registered extensions
#[derive(Debug, Clone)]
pub struct Directory {
    fs: Arc<dyn FileSystem>,
    extensions: Vec<Arc<dyn Extension>>,
}

impl Directory {
    pub fn new(fs: Arc<dyn FileSystem>, extensions: Vec<Arc<dyn Extension>>) -> Self {
        Directory { fs, extensions }
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
        self.run("directory_exists", &[path], || Ok(self.fs.directory_exists(path)))
            .unwrap_or(false)
    }

    /// Creates the directory with all missing ancestors
    pub fn create_directory(&self, path: &str) -> VfsResult<()> {
        self.run("create_directory", &[path], || self.fs.create_directory(path))
    }

    /// Removes the directory
    ///
    /// Unless `recursive` is set the directory must be empty, otherwise this
    /// fails with `DirectoryNotEmpty` and nothing is removed.
    pub fn delete(&self, path: &str, recursive: bool) -> VfsResult<()> {
        self.run("delete_directory", &[path], || {
            if recursive {
                self.fs.delete_directory(path)
            } else {
                self.fs.delete_empty_directory(path)
            }
        })
    }

    /// Paths of the files directly in this directory
    pub fn get_files(&self, path: &str) -> VfsResult<Vec<String>> {
        self.run("get_files", &[path], || self.fs.files_of(path))
    }

    /// Paths of the files whose name matches `pattern`, optionally searching subdirectories
    pub fn get_files_matching(
        &self,
        path: &str,
        pattern: &str,
        option: SearchOption,
    ) -> VfsResult<Vec<String>> {
        self.run("get_files", &[path, pattern], || {
            search::find_files(self.fs.as_ref(), path, pattern, option)
        })
    }

    /// Paths of the immediate subdirectories
    pub fn get_directories(&self, path: &str) -> VfsResult<Vec<String>> {
        self.run("get_directories", &[path], || self.fs.subdirectories_of(path))
    }

    /// Paths of the immediate subdirectories whose name matches `pattern`
    pub fn get_directories_matching(&self, path: &str, pattern: &str) -> VfsResult<Vec<String>> {
        self.run("get_directories", &[path, pattern], || {
            search::find_directories(self.fs.as_ref(), path, pattern)
        })
    }

    /// The containing directory, `None` at a drive root
    pub fn get_parent(&self, path: &str) -> Option<String> {
        self.run("get_parent", &[path], || Ok(path::parent(path).map(str::to_string)))
            .unwrap_or(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::VfsErrorKind;
    use crate::MemoryFS;
    use std::sync::Barrier;
    use std::thread;

    fn testee() -> VfsResult<Directory> {
        let _ = env_logger::try_init();
        let fs = MemoryFS::with_clock(Arc::new(FixedClock::default()));
        fs.create_directory(r"c:\other")?;
        fs.add_file(r"c:\other\a.txt", b"a")?;
        fs.create_directory(r"c:\top\folder\sub")?;
        fs.create_directory(r"c:\top\folder\othersub\sub")?;
        for name in ["1.pdf", "2.txt", "3.xtxt", "4.txtx", "5.txt"] {
            fs.add_file(&path::join(r"c:\top\folder", name), &[])?;
        }
        fs.add_file(r"c:\top\folder\sub\x.pdf", &[])?;
        fs.add_file(r"c:\top\folder\sub\y.txt", &[])?;
        fs.add_file(r"c:\top\folder\othersub\sub\u.txt", &[])?;
        fs.add_file(r"c:\top\folder\othersub\sub\v.txt", &[])?;
        fs.add_file(r"c:\top\folder\othersub\sub\w.pdf", &[])?;
        Ok(Directory::new(Arc::new(fs), vec![]))
    }

    #[test]
    fn gets_matching_files_from_the_top_directory() -> VfsResult<()> {
        let directory = testee()?;
        assert_eq!(
            directory.get_files_matching(r"c:\top\folder", "*.txt", SearchOption::TopDirectoryOnly)?,
            vec![r"c:\top\folder\2.txt", r"c:\top\folder\5.txt"]
        );
        Ok(())
    }

    #[test]
    fn gets_matching_files_from_all_directories() -> VfsResult<()> {
        let directory = testee()?;
        assert_eq!(
            directory.get_files_matching(r"c:\top\folder\", "*.txt", SearchOption::AllDirectories)?,
            vec![
                r"c:\top\folder\2.txt",
                r"c:\top\folder\5.txt",
                r"c:\top\folder\sub\y.txt",
                r"c:\top\folder\othersub\sub\u.txt",
                r"c:\top\folder\othersub\sub\v.txt",
            ]
        );
        Ok(())
    }

    #[test]
    fn gets_files_and_directories() -> VfsResult<()> {
        let directory = testee()?;
        assert_eq!(directory.get_files(r"c:\other")?, vec![r"c:\other\a.txt"]);
        assert_eq!(
            directory.get_directories(r"c:\top\folder")?,
            vec![r"c:\top\folder\sub", r"c:\top\folder\othersub"]
        );
        assert_eq!(
            directory.get_directories_matching(r"c:\top\folder", "o*")?,
            vec![r"c:\top\folder\othersub"]
        );
        Ok(())
    }

    #[test]
    fn non_recursive_delete_requires_an_empty_directory() -> VfsResult<()> {
        let directory = testee()?;
        let error = directory.delete(r"c:\other", false).unwrap_err();
        assert!(matches!(error.kind(), VfsErrorKind::DirectoryNotEmpty), "{}", error);
        let error = directory.delete(r"c:\top\folder\othersub", false).unwrap_err();
        assert!(matches!(error.kind(), VfsErrorKind::DirectoryNotEmpty), "{}", error);
        assert!(directory.exists(r"c:\other"));

        directory.create_directory(r"c:\empty")?;
        directory.delete(r"c:\empty", false)?;
        assert!(!directory.exists(r"c:\empty"));
        Ok(())
    }

    #[test]
    fn non_recursive_delete_never_drops_a_concurrently_added_file() -> VfsResult<()> {
        const ROUNDS: usize = 2000;
        let fs: Arc<dyn FileSystem> = Arc::new(MemoryFS::new());
        for i in 0..ROUNDS {
            fs.create_directory(&format!(r"c:\d{}", i))?;
        }
        let directory = Directory::new(fs.clone(), vec![]);
        let barrier = Arc::new(Barrier::new(2));

        let writer = {
            let fs = fs.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                (0..ROUNDS)
                    .map(|i| {
                        barrier.wait();
                        fs.add_file(&format!(r"c:\d{}\f.txt", i), b"f").is_ok()
                    })
                    .collect::<Vec<_>>()
            })
        };
        let deleted: Vec<bool> = (0..ROUNDS)
            .map(|i| {
                barrier.wait();
                directory.delete(&format!(r"c:\d{}", i), false).is_ok()
            })
            .collect();
        let written = writer.join().unwrap();

        for i in 0..ROUNDS {
            assert!(
                deleted[i] != written[i],
                "round {}: deleted {}, written {}",
                i,
                deleted[i],
                written[i]
            );
            assert_eq!(fs.file_exists(&format!(r"c:\d{}\f.txt", i)), written[i]);
        }
        Ok(())
    }

    #[test]
    fn recursive_delete_removes_the_subtree() -> VfsResult<()> {
        let directory = testee()?;
        directory.delete(r"c:\top", true)?;
        assert!(!directory.exists(r"c:\top"));
        assert!(!directory.exists(r"c:\top\folder\sub"));
        assert!(directory.exists(r"c:\other"));
        Ok(())
    }

    #[test]
    fn deleting_a_missing_directory_fails() -> VfsResult<()> {
        let directory = testee()?;
        assert!(directory.delete(r"c:\missing", false).unwrap_err().is_directory_not_found());
        assert!(directory.delete(r"c:\missing", true).unwrap_err().is_directory_not_found());
        Ok(())
    }

    #[test]
    fn parents() -> VfsResult<()> {
        let directory = testee()?;
        assert_eq!(directory.get_parent(r"c:\top\folder\").as_deref(), Some(r"c:\top"));
        assert_eq!(directory.get_parent(r"c:\"), None);
        Ok(())
    }
}
