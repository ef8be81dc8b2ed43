//! File utility functions

use std::path::PathBuf;

/// Expand a user-supplied path to an absolute path.
///
/// `~` and `~/...` resolve against the home directory. Relative paths and
/// bare names resolve against the current directory. Absolute paths pass
/// through unchanged, and surrounding whitespace is ignored.
///
/// ```text
/// expand_path("~/.figures")    // -> /home/user/.figures
/// expand_path("./seed.json")   // -> /current/dir/./seed.json
/// expand_path("/etc/figures")  // -> /etc/figures
/// ```
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }

    let expanded = match (path, dirs::home_dir()) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}
