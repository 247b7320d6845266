//! Filesystem scanner producing a [`FileInfo`] tree.
//!
//! Uses the `ignore` walker so `.gitignore` files are honoured with git's own semantics, even when
//! the directory is not a git checkout. Entries whose name starts with `.` are skipped. Paths are
//! relative to the scanned root and always `/`-separated; the root itself has an empty path.

use crate::collab::Scanner;
use crate::error::{Error, Result};
use crate::model::FileInfo;
use ignore::WalkBuilder;
use std::future::Future;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct FsScanner {
    pub skip_hidden: bool,
    pub respect_gitignore: bool,
}

impl Default for FsScanner {
    fn default() -> Self {
        Self {
            skip_hidden: true,
            respect_gitignore: true,
        }
    }
}

impl FsScanner {
    pub fn scan_sync(&self, root: &Path) -> Result<FileInfo> {
        let scan_err = |message: String| Error::Scan {
            path: root.display().to_string(),
            message,
        };
        let root = root.canonicalize().map_err(|e| scan_err(e.to_string()))?;
        let meta = std::fs::metadata(&root).map_err(|e| scan_err(e.to_string()))?;
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
        if !meta.is_dir() {
            return Ok(FileInfo::file(name, String::new()));
        }

        let mut builder = WalkBuilder::new(&root);
        builder
            .hidden(self.skip_hidden)
            .git_ignore(self.respect_gitignore)
            .git_global(false)
            .git_exclude(false)
            .ignore(false)
            .parents(false)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b));

        // Open directories from the root down; `stack[d]` is the directory at walk depth `d`.
        let mut stack = vec![FileInfo::dir(name, String::new(), Vec::new())];
        let mut entries = 0usize;
        for result in builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(%err, "skipping unreadable entry");
                    continue;
                }
            };
            let depth = entry.depth();
            if depth == 0 {
                continue;
            }
            while stack.len() > depth {
                close_top(&mut stack);
            }

            let Ok(rel) = entry.path().strip_prefix(&root) else {
                continue;
            };
            let rel = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            let name = entry.file_name().to_string_lossy().into_owned();
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            entries += 1;

            if is_dir {
                stack.push(FileInfo::dir(name, rel, Vec::new()));
            } else if let Some(parent) = stack.last_mut() {
                parent
                    .children
                    .get_or_insert_with(Vec::new)
                    .push(FileInfo::file(name, rel));
            }
        }
        while stack.len() > 1 {
            close_top(&mut stack);
        }

        tracing::info!(root = %root.display(), entries, "scanned repository");
        stack.pop().ok_or_else(|| scan_err("empty scan stack".to_string()))
    }
}

fn close_top(stack: &mut Vec<FileInfo>) {
    let Some(done) = stack.pop() else {
        return;
    };
    if let Some(parent) = stack.last_mut() {
        parent.children.get_or_insert_with(Vec::new).push(done);
    }
}

impl Scanner for FsScanner {
    fn scan(&self, root: &Path) -> impl Future<Output = Result<FileInfo>> + Send {
        let scanner = self.clone();
        let root = root.to_path_buf();
        async move { scanner.scan_sync(&root) }
    }
}
