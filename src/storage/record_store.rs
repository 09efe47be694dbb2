//! 通用的文件持久化记录仓库
//!
//! 每个仓库在内存中用 `tokio::sync::RwLock` 保存全部实体，每次修改后把整张表
//! 写入一个 JSON 文件。先写同目录下的 `*.tmp` 再 rename 覆盖，写入中途崩溃
//! 不会留下被截断的快照。

use std::collections::HashMap;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};

/// 可存入 [`RecordStore`] 的实体
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// 实体名称，用于错误信息（如 "User not found"）
    const KIND: &'static str;

    fn id(&self) -> &str;
}

/// `update` 遇到不存在的 ID 时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePolicy {
    /// 不存在则返回 NotFound
    RequireExisting,
    /// 与 `save` 相同
    Upsert,
}

pub struct RecordStore<T: Record> {
    path: PathBuf,
    policy: UpdatePolicy,
    records: RwLock<HashMap<String, T>>,
}

impl<T: Record> RecordStore<T> {
    /// 打开仓库：文件不存在视为空仓库；文件损坏或不可读则返回 StorageError
    pub async fn open(path: impl Into<PathBuf>, policy: UpdatePolicy) -> AppResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::StorageError(format!("Cannot create {}: {e}", parent.display()))
            })?;
        }

        let records: HashMap<String, T> = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::StorageError(format!(
                    "Corrupt {} snapshot {}: {e}",
                    T::KIND,
                    path.display()
                ))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(AppError::StorageError(format!(
                    "Cannot read {}: {e}",
                    path.display()
                )));
            }
        };

        log::info!(
            "Loaded {} {} record(s) from {}",
            records.len(),
            T::KIND,
            path.display()
        );

        Ok(Self {
            path,
            policy,
            records: RwLock::new(records),
        })
    }

    /// 插入或覆盖
    pub async fn save(&self, record: T) -> AppResult<()> {
        let mut records = self.records.write().await;
        self.write_through(&mut records, record).await
    }

    /// 更新已有记录；Upsert 策略下与 save 相同
    pub async fn update(&self, record: T) -> AppResult<()> {
        let mut records = self.records.write().await;
        if self.policy == UpdatePolicy::RequireExisting && !records.contains_key(record.id()) {
            return Err(AppError::NotFound(format!("{} not found", T::KIND)));
        }
        self.write_through(&mut records, record).await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<T> {
        self.records
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("{} not found", T::KIND)))
    }

    /// 按遍历顺序返回第一条匹配记录
    pub async fn find<P>(&self, pred: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.records
            .read()
            .await
            .values()
            .find(|r| pred(*r))
            .cloned()
    }

    pub async fn filter<P>(&self, pred: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.records
            .read()
            .await
            .values()
            .filter(|r| pred(*r))
            .cloned()
            .collect()
    }

    pub async fn list(&self) -> Vec<T> {
        self.records.read().await.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// 写入内存并落盘；落盘失败则回滚内存修改
    async fn write_through(&self, records: &mut HashMap<String, T>, record: T) -> AppResult<()> {
        let id = record.id().to_string();
        let previous = records.insert(id.clone(), record);

        if let Err(e) = self.persist(records).await {
            match previous {
                Some(old) => {
                    records.insert(id, old);
                }
                None => {
                    records.remove(&id);
                }
            }
            log::error!("Failed to persist {} store: {e}", T::KIND);
            return Err(e);
        }
        Ok(())
    }

    async fn persist(&self, records: &HashMap<String, T>) -> AppResult<()> {
        let data = serde_json::to_vec_pretty(records)?;
        let tmp = tmp_path(&self.path);

        tokio::fs::write(&tmp, &data).await.map_err(|e| {
            AppError::StorageError(format!("Cannot write {}: {e}", tmp.display()))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            AppError::StorageError(format!("Cannot replace {}: {e}", self.path.display()))
        })?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        owner: String,
        body: String,
    }

    impl Record for Note {
        const KIND: &'static str = "Note";

        fn id(&self) -> &str {
            &self.id
        }
    }

    fn note(id: &str, owner: &str, body: &str) -> Note {
        Note {
            id: id.to_string(),
            owner: owner.to_string(),
            body: body.to_string(),
        }
    }

    fn temp_file(label: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("record-store-{label}-{}", uuid::Uuid::new_v4()))
            .join("notes.json")
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let store = RecordStore::<Note>::open(temp_file("missing"), UpdatePolicy::Upsert)
            .await
            .unwrap();
        assert!(store.is_empty().await);
        assert!(matches!(
            store.get_by_id("nope").await,
            Err(AppError::NotFound(msg)) if msg == "Note not found"
        ));
    }

    #[tokio::test]
    async fn test_round_trip_reproduces_mapping() {
        let path = temp_file("roundtrip");
        let store = RecordStore::<Note>::open(&path, UpdatePolicy::Upsert)
            .await
            .unwrap();
        store.save(note("a", "alice", "first")).await.unwrap();
        store.save(note("b", "bob", "second")).await.unwrap();
        store.save(note("a", "alice", "overwritten")).await.unwrap();

        let reopened = RecordStore::<Note>::open(&path, UpdatePolicy::Upsert)
            .await
            .unwrap();
        let mut before = store.list().await;
        let mut after = reopened.list().await;
        before.sort_by(|x, y| x.id.cmp(&y.id));
        after.sort_by(|x, y| x.id.cmp(&y.id));
        assert_eq!(before, after);
        assert_eq!(reopened.get_by_id("a").await.unwrap().body, "overwritten");
        assert!(!tmp_path(&path).exists());
    }

    #[tokio::test]
    async fn test_update_policy() {
        let strict = RecordStore::<Note>::open(temp_file("strict"), UpdatePolicy::RequireExisting)
            .await
            .unwrap();
        assert!(matches!(
            strict.update(note("x", "o", "b")).await,
            Err(AppError::NotFound(_))
        ));
        assert!(strict.is_empty().await);
        strict.save(note("x", "o", "b")).await.unwrap();
        strict.update(note("x", "o", "changed")).await.unwrap();
        assert_eq!(strict.get_by_id("x").await.unwrap().body, "changed");

        let upsert = RecordStore::<Note>::open(temp_file("upsert"), UpdatePolicy::Upsert)
            .await
            .unwrap();
        upsert.update(note("y", "o", "b")).await.unwrap();
        assert_eq!(upsert.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_and_filter() {
        let store = RecordStore::<Note>::open(temp_file("scan"), UpdatePolicy::Upsert)
            .await
            .unwrap();
        store.save(note("1", "alice", "a")).await.unwrap();
        store.save(note("2", "bob", "b")).await.unwrap();
        store.save(note("3", "alice", "c")).await.unwrap();

        assert_eq!(store.filter(|n| n.owner == "alice").await.len(), 2);
        assert_eq!(store.find(|n| n.owner == "bob").await.unwrap().id, "2");
        assert!(store.find(|n| n.owner == "carol").await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let path = temp_file("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"{\"a\": {\"id\": ").unwrap();

        let result = RecordStore::<Note>::open(&path, UpdatePolicy::Upsert).await;
        assert!(matches!(result, Err(AppError::StorageError(_))));
    }

    #[tokio::test]
    async fn test_failed_write_rolls_back() {
        let path = temp_file("rollback");
        let store = RecordStore::<Note>::open(&path, UpdatePolicy::Upsert)
            .await
            .unwrap();
        store.save(note("keep", "o", "b")).await.unwrap();

        // 用同名目录占住 tmp 路径，使写入失败
        std::fs::create_dir_all(tmp_path(&path)).unwrap();

        assert!(store.save(note("lost", "o", "b")).await.is_err());
        assert!(store.get_by_id("lost").await.is_err());
        assert_eq!(store.len().await, 1);
    }
}
