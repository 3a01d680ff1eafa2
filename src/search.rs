//! Pattern-filtered enumeration of files and directories

use crate::pattern::Wildcard;
use crate::{path, FileSystem, VfsResult};

/// How far below the starting directory a search descends
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum SearchOption {
    /// Only the immediate children of the starting directory
    #[default]
    TopDirectoryOnly,
    /// The starting directory and every directory below it
    AllDirectories,
}

/// Files below `directory` whose name matches `pattern`
///
/// With [`SearchOption::AllDirectories`] each directory's own files come
/// before those of its subdirectories, which are visited in stored order.
pub fn find_files<F: FileSystem + ?Sized>(
    fs: &F,
    directory: &str,
    pattern: &str,
    option: SearchOption,
) -> VfsResult<Vec<String>> {
    let wildcard = Wildcard::new(pattern)?;
    let candidates = match option {
        SearchOption::TopDirectoryOnly => fs.files_of(directory)?,
        SearchOption::AllDirectories => fs.files_of_recursive(directory)?,
    };
    Ok(retain_matching(candidates, &wildcard))
}

/// Immediate subdirectories of `directory` whose name matches `pattern`
pub fn find_directories<F: FileSystem + ?Sized>(
    fs: &F,
    directory: &str,
    pattern: &str,
) -> VfsResult<Vec<String>> {
    let wildcard = Wildcard::new(pattern)?;
    Ok(retain_matching(fs.subdirectories_of(directory)?, &wildcard))
}

fn retain_matching(mut paths: Vec<String>, wildcard: &Wildcard) -> Vec<String> {
    paths.retain(|candidate| wildcard.matches(path::file_name(candidate)));
    paths
}
