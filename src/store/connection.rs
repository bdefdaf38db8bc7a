// Connection string parsing
// Author: kelexine (https://github.com/kelexine)

use crate::error::{StoreError, StoreResult};
use std::path::PathBuf;
use url::Url;

/// Where a connection string points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    /// `memory://`
    Memory,
    /// `file:///abs/path.db` or `file://relative/path.db`
    File(PathBuf),
}

impl ConnectionTarget {
    pub fn parse(raw: &str) -> StoreResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(StoreError::InvalidUrl("connection string is empty".to_string()));
        }

        let url = Url::parse(raw).map_err(|e| StoreError::InvalidUrl(format!("{}: {}", raw, e)))?;

        match url.scheme() {
            "memory" => Ok(ConnectionTarget::Memory),
            "file" => {
                // file://relative/path puts the first segment in the host slot
                let path = match url.host_str() {
                    Some(host) if !host.is_empty() => format!("{}{}", host, url.path()),
                    _ => url.path().to_string(),
                };
                if path.is_empty() || path == "/" {
                    return Err(StoreError::InvalidUrl(format!("{}: missing file path", raw)));
                }
                Ok(ConnectionTarget::File(PathBuf::from(path)))
            }
            other => Err(StoreError::UnsupportedScheme(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory() {
        assert_eq!(ConnectionTarget::parse("memory://").unwrap(), ConnectionTarget::Memory);
    }

    #[test]
    fn test_absolute_file() {
        assert_eq!(
            ConnectionTarget::parse("file:///var/lib/recipebox/recipes.db").unwrap(),
            ConnectionTarget::File(PathBuf::from("/var/lib/recipebox/recipes.db"))
        );
    }

    #[test]
    fn test_relative_file() {
        assert_eq!(
            ConnectionTarget::parse("file://data/recipes.db").unwrap(),
            ConnectionTarget::File(PathBuf::from("data/recipes.db"))
        );
    }

    #[test]
    fn test_unsupported_scheme() {
        let err = ConnectionTarget::parse("mongodb://user:pw@localhost/recipes").unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedScheme(s) if s == "mongodb"));
    }

    #[test]
    fn test_garbage() {
        assert!(matches!(
            ConnectionTarget::parse("not a url"),
            Err(StoreError::InvalidUrl(_))
        ));
        assert!(matches!(ConnectionTarget::parse("  "), Err(StoreError::InvalidUrl(_))));
        assert!(matches!(ConnectionTarget::parse("file://"), Err(StoreError::InvalidUrl(_))));
    }
}
