use crate::{list::List, set::Set};
use dashmap::DashMap;
use mockall::automock;
use std::{fmt, sync::Arc};

#[automock]
pub trait SharedStoreBase: Send + Sync {
    fn get(&self, key: String) -> Option<DataType>;

    fn set(&self, key: String, value: DataType);

    fn del(&self, keys: Vec<String>);

    fn exists(&self, key: String) -> bool;

    fn keys(&self) -> Vec<String>;

    fn lpush(&self, key: String, values: Vec<String>) -> Result<(), StoreError>;

    fn rpush(&self, key: String, values: Vec<String>) -> Result<(), StoreError>;

    fn lpop(&self, key: String, count: usize) -> Result<Vec<String>, StoreError>;

    fn llen(&self, key: String) -> Result<usize, StoreError>;

    fn lrange(&self, key: String, start: i64, stop: i64) -> Result<Vec<String>, StoreError>;

    fn ltrim(&self, key: String, start: i64, stop: i64) -> Result<(), StoreError>;

    fn lindex(&self, key: String, index: i64) -> Result<Option<String>, StoreError>;

    fn sadd(&self, key: String, values: Vec<String>) -> Result<(), StoreError>;

    fn smembers(&self, key: String) -> Result<Vec<String>, StoreError>;

    fn sismember(&self, key: String, value: String) -> Result<bool, StoreError>;
}

/// Shared Data Store across all the connections
///
/// Cloning `SharedStore` only increments an atomic reference count,
/// It does not copy it deeply, but rather shallowly.
///
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    /// An Arc to provide shared ownership across the Tokio tasks
    shared: Arc<DataStore>,
}

#[derive(Debug, Default)]
pub struct DataStore {
    /// The main key-value data store. The `DataType`
    /// depends on which cmd was used to insert the data
    ///
    /// `DashMap` shards its locks internally, so presence, insertion,
    /// replacement and removal of a key are atomic without a global lock.
    /// List contents are mutated while the entry's shard guard is held.
    /// Set contents carry their own lock, see `Set`.
    data: DashMap<String, DataType>,
}

/// The supported data types which can be stored in the `DataStore`
#[derive(Debug, Clone, PartialEq)]
pub enum DataType {
    String(String),
    List(List),
    Set(Set),
}

/// The kind of a stored value, used when reporting type mismatches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    List,
    Set,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("wrong type for key '{key}': holds {kind}")]
    WrongType { key: String, kind: Kind },
}

impl DataType {
    pub fn kind(&self) -> Kind {
        match self {
            DataType::String(_) => Kind::String,
            DataType::List(_) => Kind::List,
            DataType::Set(_) => Kind::Set,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Kind::String => "string".fmt(fmt),
            Kind::List => "list".fmt(fmt),
            Kind::Set => "set".fmt(fmt),
        }
    }
}

impl SharedStore {
    pub fn new() -> SharedStore {
        SharedStore::default()
    }

    pub fn len(&self) -> usize {
        self.shared.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.data.is_empty()
    }

    /// A point-in-time copy of every entry, sorted by key.
    ///
    /// Lists are copied; sets are copied out of their own lock, so the
    /// returned entries share nothing with the live store.
    pub fn entries(&self) -> Vec<(String, DataType)> {
        let mut entries: Vec<(String, DataType)> = self
            .shared
            .data
            .iter()
            .map(|entry| {
                let value = match entry.value() {
                    DataType::Set(set) => DataType::Set(Set::from(set.members())),
                    other => other.clone(),
                };
                (entry.key().clone(), value)
            })
            .collect();

        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Insert every entry, replacing whatever the keys held before
    pub fn load(&self, entries: Vec<(String, DataType)>) {
        for (key, value) in entries {
            self.shared.data.insert(key, value);
        }
    }

    /// Run `f` against the list at `key`, creating an empty list first if
    /// the key is absent.
    fn with_list<T>(&self, key: String, f: impl FnOnce(&mut List) -> T) -> Result<T, StoreError> {
        let mut entry = self
            .shared
            .data
            .entry(key.clone())
            .or_insert_with(|| DataType::List(List::new()));

        match entry.value_mut() {
            DataType::List(list) => Ok(f(list)),
            other => Err(StoreError::WrongType {
                key,
                kind: other.kind(),
            }),
        }
    }

    /// Fetch a handle to the set at `key`, creating an empty set first if
    /// the key is absent.
    ///
    /// The map entry is released before the handle is returned, so member
    /// access only contends on the set's own lock.
    fn set_handle(&self, key: String) -> Result<Set, StoreError> {
        let entry = self
            .shared
            .data
            .entry(key.clone())
            .or_insert_with(|| DataType::Set(Set::new()));

        match entry.value() {
            DataType::Set(set) => Ok(set.clone()),
            other => Err(StoreError::WrongType {
                key,
                kind: other.kind(),
            }),
        }
    }
}

impl SharedStoreBase for SharedStore {
    /// Get the value associated with a Key
    ///
    /// Will return `None` if no value is found for the corresponding key.
    fn get(&self, key: String) -> Option<DataType> {
        self.shared.data.get(&key).map(|entry| entry.value().clone())
    }

    /// Set the `value` associated with the `key`
    ///
    /// Values are overridden, whatever kind they held before
    fn set(&self, key: String, value: DataType) {
        self.shared.data.insert(key, value);
    }

    fn del(&self, keys: Vec<String>) {
        for key in keys {
            self.shared.data.remove(&key);
        }
    }

    fn exists(&self, key: String) -> bool {
        self.shared.data.contains_key(&key)
    }

    /// Every key in the store, sorted ascending
    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .shared
            .data
            .iter()
            .map(|entry| entry.key().clone())
            .collect();

        keys.sort();
        keys
    }

    fn lpush(&self, key: String, values: Vec<String>) -> Result<(), StoreError> {
        self.with_list(key, |list| list.push_left(values))
    }

    fn rpush(&self, key: String, values: Vec<String>) -> Result<(), StoreError> {
        self.with_list(key, |list| list.push_right(values))
    }

    fn lpop(&self, key: String, count: usize) -> Result<Vec<String>, StoreError> {
        self.with_list(key, |list| list.pop_left(count))
    }

    fn llen(&self, key: String) -> Result<usize, StoreError> {
        self.with_list(key, |list| list.len())
    }

    fn lrange(&self, key: String, start: i64, stop: i64) -> Result<Vec<String>, StoreError> {
        self.with_list(key, |list| list.range(start, stop))
    }

    fn ltrim(&self, key: String, start: i64, stop: i64) -> Result<(), StoreError> {
        self.with_list(key, |list| list.trim(start, stop))
    }

    fn lindex(&self, key: String, index: i64) -> Result<Option<String>, StoreError> {
        self.with_list(key, |list| list.index(index).cloned())
    }

    fn sadd(&self, key: String, values: Vec<String>) -> Result<(), StoreError> {
        self.set_handle(key)?.add(values);
        Ok(())
    }

    fn smembers(&self, key: String) -> Result<Vec<String>, StoreError> {
        Ok(self.set_handle(key)?.members())
    }

    fn sismember(&self, key: String, value: String) -> Result<bool, StoreError> {
        Ok(self.set_handle(key)?.contains(&value))
    }
}
