//! Interfaces of the collaborators that feed the engine, plus small reference implementations.
//!
//! Scanning and connection extraction are I/O bound and exposed as runtime-agnostic futures; the
//! graph pipeline itself stays synchronous.

use crate::error::{Error, Result};
use crate::model::{Connection, FileInfo};
use std::future::Future;
use std::path::{Path, PathBuf};

/// Produces the file tree rooted at a directory.
pub trait Scanner {
    fn scan(&self, root: &Path) -> impl Future<Output = Result<FileInfo>> + Send;
}

/// Produces the already-resolved connections of a repository.
pub trait ConnectionSource {
    fn connections(&self, root: &Path) -> impl Future<Output = Result<Vec<Connection>>> + Send;
}

/// Asks the host for a repository directory. `None` means the choice was cancelled.
pub trait DirectoryPicker {
    fn select_directory(&self) -> Option<PathBuf>;
}

/// Reads a JSON array of connections from a file.
///
/// Relative file paths are resolved against the repository root handed to
/// [`ConnectionSource::connections`].
#[derive(Debug, Clone)]
pub struct JsonConnections {
    file: PathBuf,
}

impl JsonConnections {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    pub fn parse(text: &str) -> Result<Vec<Connection>> {
        Ok(serde_json::from_str(text)?)
    }

    fn load(&self, root: &Path) -> Result<Vec<Connection>> {
        let path = if self.file.is_absolute() {
            self.file.clone()
        } else {
            root.join(&self.file)
        };
        let text = std::fs::read_to_string(&path).map_err(|err| Error::Scan {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        let connections = Self::parse(&text)?;
        tracing::info!(
            path = %path.display(),
            count = connections.len(),
            "loaded connections"
        );
        Ok(connections)
    }
}

impl ConnectionSource for JsonConnections {
    fn connections(&self, root: &Path) -> impl Future<Output = Result<Vec<Connection>>> + Send {
        let source = self.clone();
        let root = root.to_path_buf();
        async move { source.load(&root) }
    }
}

/// A picker whose answer is fixed up front, e.g. from a command-line argument.
#[derive(Debug, Clone, Default)]
pub struct FixedDirectory(pub Option<PathBuf>);

impl DirectoryPicker for FixedDirectory {
    fn select_directory(&self) -> Option<PathBuf> {
        self.0.clone().filter(|p| !p.as_os_str().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_both_wire_shapes() {
        let text = r#"[
            {"from": "a.ts", "to": "b.ts", "fromFile": "a.ts", "toFile": "b.ts", "type": "import"},
            {"fromFile": "old.go", "toFile": "dep.go", "type": "external"}
        ]"#;
        let conns = JsonConnections::parse(text).expect("parse");
        assert_eq!(conns.len(), 2);
        assert_eq!(conns[1].source_id().as_deref(), Some("old.go"));
        assert_eq!(conns[1].kind, "external");
    }

    #[test]
    fn null_fields_read_as_empty() {
        let text = r#"[
            {"from": null, "to": "b.ts", "fromFile": "a.ts", "toFile": null, "type": null},
            {"from": "c.ts", "to": "d.ts", "fromFile": "c.ts", "toFile": "d.ts", "type": "import"}
        ]"#;
        let conns = JsonConnections::parse(text).expect("parse");
        assert_eq!(conns.len(), 2);
        assert_eq!(
            conns[0].endpoints(),
            Some(("a.ts".to_string(), "b.ts".to_string()))
        );
        assert_eq!(conns[0].kind, "");
        assert_eq!(conns[1].source_id().as_deref(), Some("c.ts"));
    }

    #[test]
    fn null_endpoints_without_fallback_are_malformed() {
        let conns = JsonConnections::parse(r#"[{"from": null, "to": "b.ts"}]"#).expect("parse");
        assert_eq!(conns[0].endpoints(), None);
    }

    #[test]
    fn connections_are_read_when_awaited() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let source = JsonConnections::new("connections.json");
        let pending = source.connections(tmp.path());
        std::fs::write(
            tmp.path().join("connections.json"),
            r#"[{"from": "a.ts", "to": "b.ts", "type": "import"}]"#,
        )
        .expect("write");

        let conns = futures::executor::block_on(pending).expect("connections");
        assert_eq!(conns.len(), 1);
    }

    #[test]
    fn empty_picker_answer_is_cancelled() {
        assert_eq!(FixedDirectory(Some(PathBuf::new())).select_directory(), None);
        assert_eq!(FixedDirectory(None).select_directory(), None);
        assert_eq!(
            FixedDirectory(Some(PathBuf::from("repo"))).select_directory(),
            Some(PathBuf::from("repo"))
        );
    }
}
