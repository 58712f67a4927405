//! パスポートストア
//!
//! 保存済みパスポートの順序付きコレクション（新しいものが先頭）。
//! 変更のたびにコレクション全体を永続化面へ書き戻す。
//! 書き込みに失敗してもメモリ上の変更は残し、結果を `PersistStatus` で返す。
//! 型に合わない要素やidが重複する要素は表示しないが、書き戻し時にそのまま残す。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::storage::StorageSurface;
use crate::types::{PassportDraft, PassportRecord};

/// 永続化面のキー
pub const STORAGE_KEY: &str = "prodo_passports";

/// 現在時刻の供給元
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// システム時計
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 永続化の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistStatus {
    Persisted,
    /// メモリ上は反映済みだが書き込めなかった
    NotPersisted(String),
}

impl PersistStatus {
    pub fn is_persisted(&self) -> bool {
        matches!(self, PersistStatus::Persisted)
    }
}

/// 保存の結果
#[derive(Debug, Clone)]
pub struct SaveOutcome {
    pub record: PassportRecord,
    pub status: PersistStatus,
}

/// 削除の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub removed: bool,
    pub status: PersistStatus,
}

/// パスポートストア
pub struct PassportStore<S, C = SystemClock> {
    storage: S,
    clock: C,
    key: String,
    records: Vec<PassportRecord>,
    /// 読めなかった要素（保存時に末尾へ書き戻す）
    retained: Vec<Value>,
    last_id: Option<i64>,
}

/// 書き戻す1要素
#[derive(Serialize)]
#[serde(untagged)]
enum StoredEntry<'a> {
    Record(&'a PassportRecord),
    Raw(&'a Value),
}

impl<S: StorageSurface> PassportStore<S, SystemClock> {
    /// 永続化面から読み込む
    pub fn load(storage: S) -> Self {
        Self::load_with(storage, SystemClock, STORAGE_KEY)
    }
}

impl<S: StorageSurface, C: Clock> PassportStore<S, C> {
    /// 時計とキーを指定して読み込む
    pub fn load_with(storage: S, clock: C, key: &str) -> Self {
        let (records, retained) = read_records(&storage, key);
        debug!(count = records.len(), retained = retained.len(), key, "loaded passports");
        Self {
            storage,
            clock,
            key: key.to_string(),
            records,
            retained,
            last_id: None,
        }
    }

    /// 候補にidと作成日時を付けて先頭に追加し、永続化する
    pub fn save(&mut self, draft: PassportDraft) -> SaveOutcome {
        let now = self.clock.now();
        let id = self.next_id(now.timestamp_millis());
        let record = PassportRecord {
            draft,
            id,
            created_at: now,
        };
        self.records.insert(0, record.clone());
        debug!(id = %record.id, "saved passport");

        let status = self.persist();
        SaveOutcome { record, status }
    }

    /// idが一致するパスポートを削除する（同じidの読めなかった要素も消す）。見つからなければ何もしない
    pub fn delete(&mut self, id: &str) -> DeleteOutcome {
        let Some(index) = self.records.iter().position(|r| r.id == id) else {
            debug!(id, "delete skipped, passport not found");
            return DeleteOutcome {
                removed: false,
                status: PersistStatus::Persisted,
            };
        };
        self.records.remove(index);
        self.retained.retain(|value| raw_id(value) != Some(id));
        debug!(id, "deleted passport");

        DeleteOutcome {
            removed: true,
            status: self.persist(),
        }
    }

    pub fn records(&self) -> &[PassportRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&PassportRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 表示できずに保持している要素の数
    pub fn retained_len(&self) -> usize {
        self.retained.len()
    }

    #[cfg(test)]
    fn storage(&self) -> &S {
        &self.storage
    }

    #[cfg(test)]
    fn into_storage(self) -> S {
        self.storage
    }

    /// 時刻(ms)由来のid。同じミリ秒や既存idとの衝突は次の値へずらす
    fn next_id(&mut self, millis: i64) -> String {
        let mut candidate = match self.last_id {
            Some(last) if last >= millis => last + 1,
            _ => millis,
        };
        while self.id_taken(&candidate.to_string()) {
            candidate += 1;
        }
        self.last_id = Some(candidate);
        candidate.to_string()
    }

    fn id_taken(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
            || self.retained.iter().any(|value| raw_id(value) == Some(id))
    }

    fn persist(&mut self) -> PersistStatus {
        let entries: Vec<StoredEntry<'_>> = self
            .records
            .iter()
            .map(StoredEntry::Record)
            .chain(self.retained.iter().map(StoredEntry::Raw))
            .collect();
        let json = match serde_json::to_string(&entries) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "Unable to save passports");
                return PersistStatus::NotPersisted(e.to_string());
            }
        };
        match self.storage.set_item(&self.key, &json) {
            Ok(()) => PersistStatus::Persisted,
            Err(e) => {
                error!(error = %e, "Unable to save passports");
                PersistStatus::NotPersisted(e.to_string())
            }
        }
    }
}

fn raw_id(value: &Value) -> Option<&str> {
    value.get("id").and_then(Value::as_str)
}

/// 永続化面から読み込む。配列として読めなければ空コレクションとして扱う。
/// 型に合わない要素と重複idの要素は2つ目の戻り値として保持する
fn read_records<S: StorageSurface>(storage: &S, key: &str) -> (Vec<PassportRecord>, Vec<Value>) {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) if !raw.is_empty() => raw,
        Ok(_) => return (Vec::new(), Vec::new()),
        Err(e) => {
            error!(error = %e, "Unable to read saved passports");
            return (Vec::new(), Vec::new());
        }
    };

    let values: Vec<Value> = match serde_json::from_str(&raw) {
        Ok(values) => values,
        Err(e) => {
            warn!(error = %e, "Unable to parse saved passports");
            return (Vec::new(), Vec::new());
        }
    };

    let mut records: Vec<PassportRecord> = Vec::with_capacity(values.len());
    let mut retained = Vec::new();
    for (index, value) in values.into_iter().enumerate() {
        match PassportRecord::deserialize(&value) {
            Ok(record) if records.iter().any(|r| r.id == record.id) => {
                warn!(index, id = %record.id, "keeping duplicate passport id off the wall");
                retained.push(value);
            }
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(index, error = %e, "keeping unreadable passport off the wall");
                retained.push(value);
            }
        }
    }
    (records, retained)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::TimeZone;
    use std::cell::Cell;

    /// 呼ばれるたびに指定ミリ秒だけ進む時計
    struct StepClock {
        now: Cell<i64>,
        step: i64,
    }

    impl StepClock {
        fn new(start: i64, step: i64) -> Self {
            Self { now: Cell::new(start), step }
        }
    }

    impl Clock for StepClock {
        fn now(&self) -> DateTime<Utc> {
            let current = self.now.get();
            self.now.set(current + self.step);
            Utc.timestamp_millis_opt(current).unwrap()
        }
    }

    fn draft(name: &str) -> PassportDraft {
        PassportDraft {
            product_name: name.to_string(),
            category: "battery".to_string(),
            material: "lithium".to_string(),
            origin: "Genk, Belgium".to_string(),
            co2: 40,
            recyclability: 72,
            fun_fact: String::new(),
        }
    }

    fn open(storage: &mut MemoryStorage, clock: StepClock) -> PassportStore<&mut MemoryStorage, StepClock> {
        PassportStore::load_with(storage, clock, STORAGE_KEY)
    }

    #[test]
    fn test_load_absent_key_is_empty() {
        let store = PassportStore::load(MemoryStorage::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_malformed_json_is_empty() {
        for raw in ["{not json", "{\"a\":1}", "42", "\"text\"", ""] {
            let mut storage = MemoryStorage::new();
            storage.insert_raw(STORAGE_KEY, raw);
            let store = PassportStore::load(storage);
            assert!(store.is_empty(), "raw: {:?}", raw);
        }
    }

    #[test]
    fn test_load_skips_malformed_entries() {
        let mut storage = MemoryStorage::new();
        storage.insert_raw(
            STORAGE_KEY,
            r#"[
                {"productName":"A","category":"toy","material":"plastic","origin":"Ghent","co2":1,"recyclability":2,"funFact":"","id":"1","createdAt":"2026-01-01T00:00:00Z"},
                {"productName":"broken"},
                {"productName":"B","category":"toy","material":"plastic","origin":"Ghent","co2":1,"recyclability":2,"id":"1","createdAt":"2026-01-01T00:00:00Z"}
            ]"#,
        );
        let store = PassportStore::load(storage);
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].product_name, "A");
        assert_eq!(store.retained_len(), 2);
    }

    #[test]
    fn test_unreadable_entries_survive_later_save() {
        let mut storage = MemoryStorage::new();
        storage.insert_raw(
            STORAGE_KEY,
            r#"[
                {"productName":"Old","category":"toy","material":"plastic","origin":"Ghent","co2":-5,"recyclability":120,"funFact":"","id":"1","createdAt":"2026-01-01T00:00:00Z"},
                {"productName":"broken","id":"2"}
            ]"#,
        );
        let mut store = open(&mut storage, StepClock::new(5_000, 1));
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].co2, -5);
        assert!(store.save(draft("New")).status.is_persisted());
        drop(store);

        let raw = storage.raw(STORAGE_KEY).expect("書き込まれていない");
        assert!(raw.contains("\"Old\""));
        assert!(raw.contains("\"co2\":-5"));
        assert!(raw.contains("\"recyclability\":120"));
        assert!(raw.contains("\"broken\""));

        let store = PassportStore::load(storage);
        let names: Vec<&str> = store.records().iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(names, ["New", "Old"]);
        assert_eq!(store.retained_len(), 1);
    }

    #[test]
    fn test_delete_also_drops_retained_duplicates() {
        let mut storage = MemoryStorage::new();
        storage.insert_raw(
            STORAGE_KEY,
            r#"[
                {"productName":"A","category":"toy","material":"plastic","origin":"Ghent","co2":1,"recyclability":2,"id":"7","createdAt":"2026-01-01T00:00:00Z"},
                {"productName":"A copy","category":"toy","material":"plastic","origin":"Ghent","co2":1,"recyclability":2,"id":"7","createdAt":"2026-01-01T00:00:00Z"}
            ]"#,
        );
        let mut store = open(&mut storage, StepClock::new(0, 1));
        assert_eq!(store.retained_len(), 1);
        assert!(store.delete("7").removed);
        assert_eq!(store.retained_len(), 0);
        drop(store);

        assert_eq!(storage.raw(STORAGE_KEY), Some("[]"));
    }

    #[test]
    fn test_id_skips_values_retained_from_load() {
        let mut storage = MemoryStorage::new();
        storage.insert_raw(STORAGE_KEY, r#"[{"productName":"broken","id":"3000"}]"#);
        let mut store = open(&mut storage, StepClock::new(3_000, 0));
        assert_eq!(store.save(draft("A")).record.id, "3001");
    }

    #[test]
    fn test_save_then_reload_roundtrip() {
        let mut storage = MemoryStorage::new();
        let start = 1_760_608_800_000;
        {
            let mut store = open(&mut storage, StepClock::new(start, 0));
            for i in 0..5 {
                let outcome = store.save(draft(&format!("Product {}", i)));
                assert!(outcome.status.is_persisted());
            }
        }

        let store = PassportStore::load(storage);
        assert_eq!(store.len(), 5);
        let names: Vec<&str> = store.records().iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(names, ["Product 4", "Product 3", "Product 2", "Product 1", "Product 0"]);

        let mut ids: Vec<&str> = store.records().iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5, "idが重複している");

        for record in store.records() {
            assert_eq!(record.origin, "Genk, Belgium");
            assert_eq!(record.co2, 40);
            assert_eq!(record.created_at.timestamp_millis(), start);
        }
    }

    #[test]
    fn test_save_assigns_time_based_id() {
        let mut store = PassportStore::load_with(MemoryStorage::new(), StepClock::new(1_000, 5), STORAGE_KEY);
        let first = store.save(draft("A")).record;
        let second = store.save(draft("B")).record;
        assert_eq!(first.id, "1000");
        assert_eq!(second.id, "1005");
        assert_eq!(second.created_at.timestamp_millis(), 1_005);
    }

    #[test]
    fn test_id_skips_values_already_loaded() {
        let mut storage = MemoryStorage::new();
        {
            let mut store = open(&mut storage, StepClock::new(2_000, 0));
            store.save(draft("A"));
            store.save(draft("B"));
        }
        // 再読み込み後、同じ時刻でも既存idと衝突しない
        let mut store = open(&mut storage, StepClock::new(2_000, 0));
        let record = store.save(draft("C")).record;
        assert_eq!(record.id, "2002");
    }

    #[test]
    fn test_wall_order_is_most_recent_first() {
        let mut store = PassportStore::load_with(MemoryStorage::new(), StepClock::new(0, 1), STORAGE_KEY);
        store.save(draft("A"));
        store.save(draft("B"));
        let names: Vec<&str> = store.records().iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn test_delete_removes_only_target() {
        let mut storage = MemoryStorage::new();
        let target = {
            let mut store = open(&mut storage, StepClock::new(0, 1));
            store.save(draft("A"));
            let target = store.save(draft("B")).record.id;
            store.save(draft("C"));

            let outcome = store.delete(&target);
            assert!(outcome.removed);
            assert!(outcome.status.is_persisted());
            target
        };

        let store = PassportStore::load(storage);
        let names: Vec<&str> = store.records().iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(names, ["C", "A"]);
        assert!(store.get(&target).is_none());
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut store = PassportStore::load_with(MemoryStorage::new(), StepClock::new(0, 1), STORAGE_KEY);
        store.save(draft("A"));
        let before = store.records().to_vec();

        let outcome = store.delete("does-not-exist");
        assert!(!outcome.removed);
        assert_eq!(store.records(), before.as_slice());
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut store = PassportStore::load_with(MemoryStorage::with_quota(16), StepClock::new(0, 1), STORAGE_KEY);
        let outcome = store.save(draft("Genk Battery Pack"));

        assert!(matches!(outcome.status, PersistStatus::NotPersisted(_)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.storage().raw(STORAGE_KEY), None);
    }

    #[test]
    fn test_next_successful_write_catches_up() {
        let mut store = PassportStore::load_with(MemoryStorage::with_quota(16), StepClock::new(0, 1), STORAGE_KEY);
        store.save(draft("A"));
        store.save(draft("B"));

        let mut storage = store.into_storage();
        storage.set_quota(None);
        let mut store = PassportStore::load_with(storage, StepClock::new(10, 1), STORAGE_KEY);
        // 永続化されていなかったので読み込むと空
        assert!(store.is_empty());
        assert!(store.save(draft("C")).status.is_persisted());
        assert_eq!(PassportStore::load(store.into_storage()).len(), 1);
    }
}
