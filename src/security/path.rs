use std::path::{Component, Path, PathBuf};

use crate::error::SecurityError;

/// Workspace path containment guard.
///
/// Holds the absolute workspace root, fixed at construction, and resolves
/// untrusted relative paths against it. Resolution is purely lexical: `.` and
/// `..` segments are collapsed without touching the filesystem, so no I/O
/// happens before containment is established.
#[derive(Debug, Clone)]
pub struct PathGuard {
    root: PathBuf,
}

impl PathGuard {
    /// Create a guard for an absolute workspace root. The caller is expected
    /// to canonicalize the root once at startup (see `Config::workspace_root`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an untrusted path against the workspace root.
    ///
    /// Returns the absolute resolved path, guaranteed to be the root itself
    /// or nested under it. Component-wise prefix matching gives the
    /// separator-boundary property: a root of `/work/foo` never matches a
    /// resolved `/work/foobar`.
    pub fn resolve(&self, requested: &str) -> Result<PathBuf, SecurityError> {
        // Null bytes can truncate paths in C-backed syscalls.
        if requested.contains('\0') {
            return Err(SecurityError::PathTraversal {
                path: requested.replace('\0', "\\0"),
            });
        }

        let requested_path = Path::new(requested);
        if requested_path.is_absolute() {
            return Err(SecurityError::PathTraversal {
                path: requested.to_string(),
            });
        }

        let resolved = lexical_normalize(&self.root.join(requested_path));

        if resolved == self.root || resolved.starts_with(&self.root) {
            Ok(resolved)
        } else {
            Err(SecurityError::PathTraversal {
                path: requested.to_string(),
            })
        }
    }
}

/// Collapse `.` and `..` segments without filesystem access. A `..` that
/// climbs past the leading root component is kept out of the result, which
/// makes the subsequent containment check fail as intended.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir | Component::Prefix(_))
                ) {
                    out.pop();
                }
            }
            Component::Normal(segment) => out.push(segment),
        }
    }
    out
}
