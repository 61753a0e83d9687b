use std::fmt;
use std::path::{Component, Path, PathBuf};

use super::DomainError;

/// A generated file path guaranteed to stay inside its output root.
///
/// Invariant: never absolute, never contains `..`, never empty. `.`
/// components (including a leading `./`) are dropped, so `./k8s/x.yaml` and
/// `k8s/x.yaml` are the same path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(String);

impl RelativePath {
    /// Fallible constructor.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let unsafe_path = |reason: &str| DomainError::UnsafePath {
            path: raw.to_owned(),
            reason: reason.to_owned(),
        };

        let path = Path::new(raw);
        if path.has_root() || raw.starts_with('/') || raw.starts_with('\\') {
            return Err(unsafe_path("absolute paths are not allowed"));
        }

        let mut segments = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(s) => {
                    segments.push(s.to_str().ok_or_else(|| unsafe_path("path is not UTF-8"))?)
                }
                Component::CurDir => {}
                Component::ParentDir => return Err(unsafe_path("'..' is not allowed")),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(unsafe_path("absolute paths are not allowed"));
                }
            }
        }

        if segments.is_empty() {
            return Err(unsafe_path("path is empty"));
        }

        Ok(Self(segments.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Join onto an output root.
    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_dot_slash_is_dropped() {
        assert_eq!(RelativePath::parse("./Dockerfile").unwrap().as_str(), "Dockerfile");
        assert_eq!(
            RelativePath::parse("./k8s/./service.yaml").unwrap().as_str(),
            "k8s/service.yaml"
        );
    }

    #[test]
    fn hidden_files_survive() {
        assert_eq!(
            RelativePath::parse("./.github/workflows/ci.yml").unwrap().as_str(),
            ".github/workflows/ci.yml"
        );
    }

    #[test]
    fn escaping_paths_are_rejected() {
        assert!(RelativePath::parse("../etc/passwd").is_err());
        assert!(RelativePath::parse("a/../../b").is_err());
        assert!(RelativePath::parse("/etc/passwd").is_err());
        assert!(RelativePath::parse("./").is_err());
        assert!(RelativePath::parse("").is_err());
    }

    #[test]
    fn under_joins_root() {
        let p = RelativePath::parse("./a/b.txt").unwrap();
        assert_eq!(p.under(Path::new("/out")), PathBuf::from("/out/a/b.txt"));
    }
}
