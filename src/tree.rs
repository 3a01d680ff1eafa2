//! The directory tree behind [`MemoryFS`](crate::MemoryFS)
//!
//! Every node owns its child directories and its files. Nodes are found by
//! walking down from the root, so no node knows its parent.

use crate::path::{self, names_equal};
use std::time::SystemTime;

#[derive(Debug)]
pub(crate) struct DirectoryNode {
    name: String,
    children: Vec<DirectoryNode>,
    files: Vec<FileRecord>,
}

#[derive(Debug, Clone)]
pub(crate) struct FileRecord {
    pub(crate) name: String,
    pub(crate) content: Vec<u8>,
    pub(crate) last_write_time_utc: Option<SystemTime>,
}

impl DirectoryNode {
    pub fn new(name: impl Into<String>) -> Self {
        DirectoryNode {
            name: name.into(),
            children: vec![],
            files: vec![],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[DirectoryNode] {
        &self.children
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    fn child_index(&self, name: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|child| names_equal(&child.name, name))
    }

    fn file_index(&self, name: &str) -> Option<usize> {
        self.files.iter().position(|file| names_equal(&file.name, name))
    }

    pub fn file(&self, name: &str) -> Option<&FileRecord> {
        self.file_index(name).map(|index| &self.files[index])
    }

    pub fn file_mut(&mut self, name: &str) -> Option<&mut FileRecord> {
        match self.file_index(name) {
            Some(index) => Some(&mut self.files[index]),
            None => None,
        }
    }

    /// Walks down `segments`; on failure returns the index of the first missing segment
    pub fn resolve(&self, segments: &[&str]) -> Result<&DirectoryNode, usize> {
        let mut current = self;
        for (depth, segment) in segments.iter().enumerate() {
            let index = current.child_index(segment).ok_or(depth)?;
            current = &current.children[index];
        }
        Ok(current)
    }

    pub fn resolve_mut(&mut self, segments: &[&str]) -> Result<&mut DirectoryNode, usize> {
        let mut current = self;
        for (depth, segment) in segments.iter().enumerate() {
            let index = current.child_index(segment).ok_or(depth)?;
            current = &mut current.children[index];
        }
        Ok(current)
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.child_index(name).is_some()
    }

    /// Like [`resolve_mut`](Self::resolve_mut) but creates missing segments
    ///
    /// Fails with the index of the first segment that already names a file.
    pub fn create_along_path(&mut self, segments: &[&str]) -> Result<&mut DirectoryNode, usize> {
        let mut current = self;
        for (depth, segment) in segments.iter().enumerate() {
            let index = match current.child_index(segment) {
                Some(index) => index,
                None if current.file_index(segment).is_some() => return Err(depth),
                None => {
                    log::debug!("Creating directory node '{}'", segment);
                    current.children.push(DirectoryNode::new(*segment));
                    current.children.len() - 1
                }
            };
            current = &mut current.children[index];
        }
        Ok(current)
    }

    /// Replaces the content of an existing file in place or appends a new one
    pub fn write_file(&mut self, name: &str, content: Vec<u8>, now: SystemTime) {
        match self.file_mut(name) {
            Some(file) => {
                file.content = content;
                file.last_write_time_utc = Some(now);
            }
            None => self.files.push(FileRecord {
                name: name.to_string(),
                content,
                last_write_time_utc: Some(now),
            }),
        }
    }

    /// Inserts a record under its own name, dropping any file it replaces
    pub fn insert_file(&mut self, record: FileRecord) {
        match self.file_index(&record.name) {
            Some(index) => self.files[index] = record,
            None => self.files.push(record),
        }
    }

    pub fn remove_file(&mut self, name: &str) -> Option<FileRecord> {
        let index = self.file_index(name)?;
        Some(self.files.remove(index))
    }

    pub fn remove_child(&mut self, name: &str) -> Option<DirectoryNode> {
        let index = self.child_index(name)?;
        Some(self.children.remove(index))
    }

    /// Every descendant directory, pre-order, as paths below `prefix`
    pub fn collect_directories(&self, prefix: &str, out: &mut Vec<String>) {
        for child in &self.children {
            let child_path = path::join(prefix, &child.name);
            out.push(child_path.clone());
            child.collect_directories(&child_path, out);
        }
    }

    /// Every file in the subtree; a node's own files come before its children's
    pub fn collect_files(&self, prefix: &str, out: &mut Vec<String>) {
        out.extend(self.files.iter().map(|file| path::join(prefix, &file.name)));
        for child in &self.children {
            child.collect_files(&path::join(prefix, &child.name), out);
        }
    }

    /// Renders this node and everything below it, one line per entry
    pub fn dump(&self, prefix: &str, depth: usize, out: &mut String) {
        let path = if depth == 0 {
            String::new()
        } else {
            path::join(prefix, &self.name)
        };
        let indent = "  ".repeat(depth);
        out.push_str(&format!("{}{}{}\n", indent, path, path::SEPARATOR));
        for file in &self.files {
            out.push_str(&format!(
                "{}  {} ({} bytes)\n",
                indent,
                path::join(&path, &file.name),
                file.content.len()
            ));
        }
        for child in &self.children {
            child.dump(&path, depth + 1, out);
        }
    }
}
