//! Path helpers. Graph ids are `/`-separated strings; nothing here touches the filesystem.

pub const SEPARATOR: char = '/';

/// Replaces every backslash with `/`. Idempotent.
pub fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

/// Ancestor folder paths of `path`, shortest first, `path` itself excluded.
///
/// `"a/b/c"` yields `["a", "a/b"]`. Empty prefixes (from a leading `/`) are skipped.
pub fn ancestors_of(path: &str) -> Vec<String> {
    let segments = path.split(SEPARATOR).collect::<Vec<_>>();
    let mut out = Vec::with_capacity(segments.len().saturating_sub(1));
    for end in 1..segments.len() {
        let prefix = segments[..end].join("/");
        if !prefix.is_empty() {
            out.push(prefix);
        }
    }
    out
}

/// All segments but the last, or `None` for a single-segment path.
pub fn parent_of(path: &str) -> Option<&str> {
    path.rfind(SEPARATOR).map(|idx| &path[..idx])
}

pub fn last_segment(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Number of separators, i.e. 0 for a root-level id.
pub fn depth_of(path: &str) -> usize {
    path.matches(SEPARATOR).count()
}
