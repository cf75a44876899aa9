//! Path utilities
//!
//! Pure string functions; nothing here looks at the tree.

/// Resolve `path` against `cwd` into an absolute, normalized path.
///
/// `~` and `~/...` expand to `home`, `.` and empty segments are dropped and
/// `..` pops one segment. `..` at the root stays at the root.
pub fn normalize(path: &str, cwd: &str, home: &str) -> String {
    let expanded;
    let path = if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        expanded = format!("{}/{}", home, rest);
        &expanded
    } else {
        path
    };

    let full = if path.starts_with('/') {
        path.to_string()
    } else if path.is_empty() {
        cwd.to_string()
    } else {
        format!("{}/{}", cwd, path)
    };

    let mut stack: Vec<&str> = Vec::new();
    for part in full.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            _ => stack.push(part),
        }
    }
    join(&stack)
}

/// Split a normalized absolute path into its segments.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|p| !p.is_empty()).collect()
}

/// Build an absolute path from segments.
pub fn join<S: AsRef<str>>(parts: &[S]) -> String {
    if parts.is_empty() {
        return "/".to_string();
    }
    let mut out = String::new();
    for p in parts {
        out.push('/');
        out.push_str(p.as_ref());
    }
    out
}

/// Parent of a normalized absolute path; the root is its own parent.
pub fn dirname(path: &str) -> String {
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(pos) => path[..pos].to_string(),
    }
}

/// Last segment of a normalized absolute path; empty for the root.
pub fn basename(path: &str) -> &str {
    match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// Child path of `dir` named `name`.
pub fn child(dir: &str, name: &str) -> String {
    if dir == "/" {
        format!("/{}", name)
    } else {
        format!("{}/{}", dir, name)
    }
}

/// True when `path` equals `ancestor` or lies below it.
pub fn is_within(path: &str, ancestor: &str) -> bool {
    if ancestor == "/" {
        return true;
    }
    path == ancestor
        || (path.starts_with(ancestor) && path.as_bytes().get(ancestor.len()) == Some(&b'/'))
}

/// Replace `home` with `~` for display.
pub fn tildify(path: &str, home: &str) -> String {
    if home != "/" && is_within(path, home) {
        format!("~{}", &path[home.len()..])
    } else {
        path.to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
