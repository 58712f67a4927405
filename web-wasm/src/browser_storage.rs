//! localStorageを使う永続化面

use passport_common::{Error, Result, StorageSurface};
use wasm_bindgen::{JsCast, JsValue};

/// ブラウザのlocalStorage
///
/// localStorageが使えない環境（プライベートモード等）では読み込みは空、
/// 書き込みは失敗として扱う。
pub struct BrowserStorage {
    storage: Option<web_sys::Storage>,
}

impl BrowserStorage {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            gloo::console::warn!("localStorage is unavailable, passports will not be kept");
        }
        Self { storage }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }
}

fn js_error(e: JsValue) -> Error {
    // QuotaExceededError などのDOMExceptionはErrorとして読める
    match e.dyn_ref::<js_sys::Error>() {
        Some(err) => Error::Storage(format!("{}: {}", String::from(err.name()), String::from(err.message()))),
        None => Error::Storage(format!("{:?}", e)),
    }
}

impl StorageSurface for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match &self.storage {
            Some(storage) => storage.get_item(key).map_err(js_error),
            None => Ok(None),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        match &self.storage {
            Some(storage) => storage.set_item(key, value).map_err(js_error),
            None => Err(Error::Storage("localStorage is unavailable".to_string())),
        }
    }
}
