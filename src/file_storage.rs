//! ファイルベースの永続化面
//!
//! localStorageと同じく「キー → 文字列」を保持するJSONオブジェクトを
//! 1ファイルに保存する。書き込みは一時ファイル経由で置き換える。

use passport_common::{Error, Result, StorageSurface};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let file = File::open(&self.path).map_err(|e| storage_error(&self.path, e))?;
        let map = serde_json::from_reader(BufReader::new(file))?;
        Ok(map)
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| storage_error(parent, e))?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path).map_err(|e| storage_error(&tmp_path, e))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, map)?;
            writer.flush().map_err(|e| storage_error(&tmp_path, e))?;
        }
        std::fs::rename(&tmp_path, &self.path).map_err(|e| storage_error(&self.path, e))?;
        debug!(path = %self.path.display(), "wrote storage file");
        Ok(())
    }
}

fn storage_error(path: &Path, e: std::io::Error) -> Error {
    Error::Storage(format!("{}: {}", path.display(), e))
}

impl StorageSurface for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        // 他のキーを壊さないよう、読めないファイルは上書きしない
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_has_no_items() {
        let dir = tempdir().expect("Failed to create temp dir");
        let storage = FileStorage::new(dir.path().join("store.json"));
        assert_eq!(storage.get_item("prodo_passports").unwrap(), None);
    }

    #[test]
    fn test_set_and_get_item() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut storage = FileStorage::new(dir.path().join("sub").join("store.json"));
        storage.set_item("a", "[1]").unwrap();
        storage.set_item("b", "x").unwrap();
        storage.set_item("a", "[2]").unwrap();

        let reopened = FileStorage::new(storage.path());
        assert_eq!(reopened.get_item("a").unwrap().as_deref(), Some("[2]"));
        assert_eq!(reopened.get_item("b").unwrap().as_deref(), Some("x"));
        assert!(!dir.path().join("sub").join("store.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_not_overwritten() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();

        let mut storage = FileStorage::new(&path);
        assert!(storage.get_item("a").is_err());
        assert!(storage.set_item("a", "[]").is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");
    }
}
