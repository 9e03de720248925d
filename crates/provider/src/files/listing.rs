//! Enumeration of config entries.
//!
//! The listing engine turns the type directories into query rows. It does not
//! consult the permission gate; [`ConfigProvider`](crate::router::ConfigProvider)
//! checks read access before calling in.

use std::fs;
use std::io::ErrorKind;

use protocol::{Result, RowSet};

use super::types::{is_valid_name, ConfigType, TypeResolver};

/// Lists and probes config entries on disk.
#[derive(Debug, Clone)]
pub struct ListingEngine {
    resolver: TypeResolver,
}

impl ListingEngine {
    /// Create a listing engine over the given resolver.
    pub fn new(resolver: TypeResolver) -> Self {
        Self { resolver }
    }

    /// Every entry of every type.
    ///
    /// Types are visited in declaration order and ids run from 0 across the
    /// whole listing, so each type's rows form one contiguous block. A type
    /// whose directory does not exist contributes no rows. Order within one
    /// directory is whatever the host returns.
    pub fn list_all(&self) -> Result<RowSet> {
        let mut rows = RowSet::new();

        for ty in ConfigType::ALL {
            let dir = self.resolver.directory_for(ty);
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!("No directory for {} at {:?}", ty, dir);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            for entry in entries {
                let entry = entry?;
                let name = entry.file_name().to_string_lossy().into_owned();
                rows.push(ty.token(), name);
            }
        }

        tracing::debug!("Listed {} config entries", rows.len());
        Ok(rows)
    }

    /// Probe for one entry.
    ///
    /// Yields a single row with id 0 when `type_token` resolves and the file
    /// exists; otherwise an empty set. A missing type or file is not an error.
    pub fn describe_one(&self, type_token: &str, name: &str) -> Result<RowSet> {
        let mut rows = RowSet::new();

        let Some(ty) = self.resolver.resolve(type_token) else {
            return Ok(rows);
        };
        if !is_valid_name(name) {
            return Ok(rows);
        }

        // Any stat failure counts as absent, including a dangling symlink or a
        // type path that is not a directory.
        let path = self.resolver.directory_for(ty).join(name);
        match fs::metadata(&path) {
            Ok(_) => {
                rows.push(ty.token(), name);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::debug!("Treating {:?} as absent: {}", path, e);
            }
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn engine(root: &Path) -> ListingEngine {
        ListingEngine::new(TypeResolver::new(root))
    }

    fn create_entries(root: &Path, ty: ConfigType, names: &[&str]) {
        let dir = root.join(ty.token());
        fs::create_dir_all(&dir).unwrap();
        for name in names {
            fs::write(dir.join(name), "[common]\n").unwrap();
        }
    }

    #[test]
    fn test_list_all_empty_root() {
        let temp_dir = TempDir::new().unwrap();
        let rows = engine(temp_dir.path()).list_all().unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_list_all_does_not_create_directories() {
        let temp_dir = TempDir::new().unwrap();
        engine(temp_dir.path()).list_all().unwrap();

        assert!(!temp_dir.path().join("frpc").exists());
        assert!(!temp_dir.path().join("frps").exists());
    }

    #[test]
    fn test_list_all_ids_span_types() {
        let temp_dir = TempDir::new().unwrap();
        create_entries(temp_dir.path(), ConfigType::Frpc, &["a1.ini"]);
        create_entries(temp_dir.path(), ConfigType::Frps, &["b1.ini", "b2.ini"]);

        let rows = engine(temp_dir.path()).list_all().unwrap();
        assert_eq!(rows.len(), 3);

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);

        // Types come in declaration order, each as one block.
        let types: Vec<&str> = rows.iter().map(|r| r.config_type.as_str()).collect();
        assert_eq!(types, vec!["frpc", "frps", "frps"]);

        assert_eq!(rows.rows()[0].name, "a1.ini");
        let mut server_names: Vec<&str> =
            rows.rows()[1..].iter().map(|r| r.name.as_str()).collect();
        server_names.sort_unstable();
        assert_eq!(server_names, vec!["b1.ini", "b2.ini"]);
    }

    #[test]
    fn test_list_all_with_only_second_type() {
        let temp_dir = TempDir::new().unwrap();
        create_entries(temp_dir.path(), ConfigType::Frps, &["only.ini"]);

        let rows = engine(temp_dir.path()).list_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.rows()[0].id, 0);
        assert_eq!(rows.rows()[0].config_type, "frps");
    }

    #[test]
    fn test_list_all_ignores_unrelated_root_entries() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("data.json"), "{}").unwrap();
        fs::create_dir_all(temp_dir.path().join("logs")).unwrap();
        create_entries(temp_dir.path(), ConfigType::Frpc, &["c.toml"]);

        let rows = engine(temp_dir.path()).list_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.rows()[0].name, "c.toml");
    }

    #[test]
    fn test_describe_one_existing() {
        let temp_dir = TempDir::new().unwrap();
        create_entries(temp_dir.path(), ConfigType::Frpc, &["a.toml", "b.toml"]);

        let rows = engine(temp_dir.path()).describe_one("frpc", "b.toml").unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows.rows()[0];
        assert_eq!(row.id, 0);
        assert_eq!(row.config_type, "frpc");
        assert_eq!(row.name, "b.toml");
    }

    #[test]
    fn test_describe_one_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        create_entries(temp_dir.path(), ConfigType::Frpc, &["a.toml"]);

        let rows = engine(temp_dir.path())
            .describe_one("frpc", "missing.ini")
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_describe_one_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let rows = engine(temp_dir.path()).describe_one("frps", "a.ini").unwrap();
        assert!(rows.is_empty());
        assert!(!temp_dir.path().join("frps").exists());
    }

    #[test]
    fn test_describe_one_type_path_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("frpc"), "not a directory").unwrap();

        let rows = engine(temp_dir.path()).describe_one("frpc", "a.ini").unwrap();
        assert!(rows.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_describe_one_dangling_symlink() {
        let temp_dir = TempDir::new().unwrap();
        create_entries(temp_dir.path(), ConfigType::Frpc, &["real.toml"]);
        let dir = temp_dir.path().join("frpc");
        std::os::unix::fs::symlink(dir.join("gone.toml"), dir.join("dangling.toml")).unwrap();
        std::os::unix::fs::symlink(dir.join("real.toml"), dir.join("alias.toml")).unwrap();

        let engine = engine(temp_dir.path());
        assert!(engine.describe_one("frpc", "dangling.toml").unwrap().is_empty());
        assert_eq!(engine.describe_one("frpc", "alias.toml").unwrap().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_listed_backslash_name_is_addressable() {
        let temp_dir = TempDir::new().unwrap();
        create_entries(temp_dir.path(), ConfigType::Frps, &["a\\b.ini"]);

        let engine = engine(temp_dir.path());
        let listed = engine.list_all().unwrap();
        assert_eq!(listed.rows()[0].name, "a\\b.ini");
        assert_eq!(engine.describe_one("frps", "a\\b.ini").unwrap().len(), 1);
    }

    #[test]
    fn test_describe_one_unresolved_type() {
        let temp_dir = TempDir::new().unwrap();
        create_entries(temp_dir.path(), ConfigType::Frpc, &["a.toml"]);

        let rows = engine(temp_dir.path()).describe_one("FRPC", "a.toml").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_describe_one_invalid_names() {
        let temp_dir = TempDir::new().unwrap();
        create_entries(temp_dir.path(), ConfigType::Frpc, &["a.toml"]);

        let engine = engine(temp_dir.path());
        for name in ["", "  ", ".", "..", "../frpc/a.toml"] {
            assert!(engine.describe_one("frpc", name).unwrap().is_empty(), "{name:?}");
        }
    }
}
