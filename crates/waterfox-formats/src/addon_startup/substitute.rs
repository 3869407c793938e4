//! Whole-payload root path substitution
//!
//! The legacy strategy: instead of patching the known sections it replaces
//! every occurrence of the previous installation root inside the decoded
//! manifest text. Two spellings of the root are replaced:
//!
//! - the URI form (`C:/old/root`), as found inside `rootURI` values
//! - the JSON-escaped Windows form (`C:\\old\\root`), as found in `path` values
//!
//! Spaces are written as `%20` in both forms. Substring replacement can hit
//! unrelated values that happen to contain the old root, which is why the
//! schema-directed rewrite is preferred.

/// Replacement counts reported by [`substitute_root_path`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Substitution {
    /// Occurrences of the forward-slash form
    pub posix: usize,
    /// Occurrences of the escaped backslash form
    pub windows: usize,
}

impl Substitution {
    /// Total number of replacements
    pub fn total(&self) -> usize {
        self.posix + self.windows
    }
}

/// Forward-slash form of `path` with spaces percent-escaped
pub fn posix_form(path: &str) -> String {
    path.replace('\\', "/").replace(' ', "%20")
}

/// JSON-escaped backslash form of `path` with spaces percent-escaped
pub fn windows_form(path: &str) -> String {
    path.replace('/', "\\")
        .replace('\\', "\\\\")
        .replace(' ', "%20")
}

/// Replace `previous_root` with `current_root` throughout `payload`
pub fn substitute_root_path(
    payload: &str,
    previous_root: &str,
    current_root: &str,
) -> (String, Substitution) {
    let mut counts = Substitution::default();
    if previous_root.is_empty() || previous_root == current_root {
        return (payload.to_string(), counts);
    }

    let (prev, curr) = (posix_form(previous_root), posix_form(current_root));
    counts.posix = payload.matches(prev.as_str()).count();
    let payload = payload.replace(&prev, &curr);

    let (prev, curr) = (windows_form(previous_root), windows_form(current_root));
    counts.windows = payload.matches(prev.as_str()).count();
    let payload = payload.replace(&prev, &curr);

    (payload, counts)
}
