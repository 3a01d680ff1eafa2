//! Path string handling shared by all backends and facades
//!
//! Paths follow the `<drive>:\<segments>` convention. `\` is the separator,
//! `/` is accepted as an alternate when splitting. Paths are compared
//! segment-wise and case-insensitively.

use crate::error::VfsErrorKind;
use crate::{VfsError, VfsResult};

/// The separator used when paths are built
pub const SEPARATOR: char = '\\';

/// Also understood as a separator on input
pub const ALT_SEPARATOR: char = '/';

const INVALID_CHARACTERS: &[char] = &['<', '>', '|', '"', '*', '?'];

pub fn is_separator(c: char) -> bool {
    c == SEPARATOR || c == ALT_SEPARATOR
}

/// Splits a path into its segments, ignoring empty ones
///
/// Leading, trailing and doubled separators therefore have no effect.
pub fn segments(path: &str) -> Vec<&str> {
    path.split(is_separator)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Rejects structurally invalid paths
pub fn check_path(path: &str) -> VfsResult<()> {
    if path.is_empty()
        || path
            .chars()
            .any(|c| c.is_control() || INVALID_CHARACTERS.contains(&c))
    {
        return Err(VfsError::from(VfsErrorKind::InvalidPath)
            .with_path(path)
            .with_context(|| "Illegal characters in path"));
    }
    Ok(())
}

/// Case-insensitive name comparison
pub fn names_equal(left: &str, right: &str) -> bool {
    left == right || left.to_lowercase() == right.to_lowercase()
}

/// True if both paths name the same location
pub fn same_path(left: &str, right: &str) -> bool {
    let left = segments(left);
    let right = segments(right);
    left.len() == right.len()
        && left
            .iter()
            .zip(right.iter())
            .all(|(left, right)| names_equal(left, right))
}

pub fn trim_end_separators(path: &str) -> &str {
    path.trim_end_matches(is_separator)
}

/// Appends `name` to `parent`, reusing the separator style of `parent`
pub fn join(parent: &str, name: &str) -> String {
    let separator = parent
        .rfind(is_separator)
        .and_then(|index| parent[index..].chars().next())
        .unwrap_or(SEPARATOR);
    format!("{}{}{}", trim_end_separators(parent), separator, name)
}

/// The last segment of the path
pub fn file_name(path: &str) -> &str {
    let path = trim_end_separators(path);
    let index = path.rfind(is_separator).map(|x| x + 1).unwrap_or(0);
    &path[index..]
}

/// The extension of the last segment, without the dot
pub fn extension(path: &str) -> Option<&str> {
    let filename = file_name(path);
    let mut parts = filename.rsplitn(2, '.');
    let after = parts.next();
    let before = parts.next();
    match before {
        None | Some("") => None,
        _ => after,
    }
}

/// Everything up to the last segment, `None` for a root or a bare name
pub fn parent(path: &str) -> Option<&str> {
    let path = trim_end_separators(path);
    let index = path.rfind(is_separator)?;
    let parent = trim_end_separators(&path[..index]);
    if parent.is_empty() {
        return None;
    }
    Some(parent)
}

/// The first segment, i.e. the drive for absolute paths
pub fn root(path: &str) -> Option<&str> {
    segments(path).into_iter().next()
}

/// Splits a file path into its directory segments and its file name
pub(crate) fn split_file_path(path: &str) -> VfsResult<(Vec<&str>, &str)> {
    check_path(path)?;
    let mut segments = segments(path);
    match segments.pop() {
        Some(name) => Ok((segments, name)),
        None => Err(VfsError::from(VfsErrorKind::InvalidPath)
            .with_path(path)
            .with_context(|| "Path does not name a file")),
    }
}
