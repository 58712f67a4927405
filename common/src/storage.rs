//! キー・バリュー永続化面
//!
//! ブラウザのlocalStorageと同じ契約: キーごとに文字列を1つ保持する。

use std::collections::HashMap;

use crate::error::{Error, Result};

/// 永続化面
pub trait StorageSurface {
    /// キーの値を読む。未設定ならNone
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// キーの値を丸ごと上書きする
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// メモリ上の永続化面
///
/// `quota` を設定すると、総バイト数を超える書き込みを
/// QuotaExceededError として拒否する。
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota: Some(quota),
        }
    }

    pub fn set_quota(&mut self, quota: Option<usize>) {
        self.quota = quota;
    }

    /// 生の値を直接入れる（テストで壊れたデータを仕込む用）
    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    fn used_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl StorageSurface for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            let needed = self.used_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(Error::Storage(format!(
                    "QuotaExceededError: {} bytes needed, quota is {}",
                    needed, quota
                )));
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: StorageSurface + ?Sized> StorageSurface for &mut S {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }
}
