// fieldops-client/src/store.rs
// 凭证存储 - 本地键值存储 (JSON 文件 / 内存)

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dashmap::DashMap;

use crate::error::{ClientError, ClientResult};

/// Well-known store keys
pub mod keys {
    pub const AUTH_TOKEN: &str = "authToken";
    pub const REFRESH_TOKEN: &str = "refreshToken";
    pub const IS_LOGGED_IN: &str = "isLoggedIn";
    pub const TOKEN_EXPIRATION: &str = "tokenExpiration";
    pub const REFRESH_TOKEN_EXPIRATION: &str = "refreshTokenExpiration";
    pub const USER_LOGIN_NAME: &str = "userLoginName";
    pub const DEALER_NAME_CN: &str = "dealerName_CN";
    pub const DEALER_NAME_EN: &str = "dealerName_EN";
    pub const USER_MOBILE: &str = "userMobile";
    pub const USER_EMAIL: &str = "userEmail";
    pub const DEALER_INFO: &str = "dealerInfo";
    pub const WORK_ORDER_PERMISSIONS: &str = "workOrderPermissions";
    pub const USER_PERMISSIONS: &str = "userPermissions";
}

/// Keys purged when the server answers 401
pub const AUTH_KEYS: &[&str] = &[
    keys::AUTH_TOKEN,
    keys::REFRESH_TOKEN,
    keys::IS_LOGGED_IN,
    keys::TOKEN_EXPIRATION,
];

/// Keys purged on logout
pub const SESSION_KEYS: &[&str] = &[
    keys::AUTH_TOKEN,
    keys::REFRESH_TOKEN,
    keys::TOKEN_EXPIRATION,
    keys::REFRESH_TOKEN_EXPIRATION,
    keys::USER_LOGIN_NAME,
    keys::IS_LOGGED_IN,
    keys::DEALER_NAME_CN,
    keys::DEALER_NAME_EN,
    keys::USER_MOBILE,
    keys::USER_EMAIL,
    keys::DEALER_INFO,
    keys::WORK_ORDER_PERMISSIONS,
    keys::USER_PERMISSIONS,
];

/// Persistent string key/value store for credentials and session data
pub trait KeyValueStore: Send + Sync + Debug {
    fn get(&self, key: &str) -> ClientResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> ClientResult<()>;

    /// Remove every listed key; missing keys are ignored
    fn remove_many(&self, keys: &[&str]) -> ClientResult<()>;

    fn keys(&self) -> ClientResult<Vec<String>>;

    fn set_many(&self, entries: &[(&str, &str)]) -> ClientResult<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Non-empty value of `key`
    fn get_non_empty(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.get(key)?.filter(|v| !v.is_empty()))
    }
}

/// JSON 文件存储
///
/// The whole map is rewritten on every mutation.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, loading existing entries
    ///
    /// A missing file starts an empty store; a corrupt file is an error.
    pub fn open(path: impl Into<PathBuf>) -> ClientResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let json = fs::read_to_string(&path)?;
            if json.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&json).map_err(|e| {
                    ClientError::Storage(format!("corrupt store {}: {}", path.display(), e))
                })?
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> ClientResult<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| ClientError::Storage("store lock poisoned".into()))
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut entries = self.lock()?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove_many(&self, keys: &[&str]) -> ClientResult<()> {
        let mut entries = self.lock()?;
        let before = entries.len();
        for key in keys {
            entries.remove(*key);
        }
        if entries.len() != before {
            self.persist(&entries)?;
        }
        Ok(())
    }

    fn keys(&self) -> ClientResult<Vec<String>> {
        Ok(self.lock()?.keys().cloned().collect())
    }

    fn set_many(&self, pairs: &[(&str, &str)]) -> ClientResult<()> {
        let mut entries = self.lock()?;
        for (key, value) in pairs {
            entries.insert(key.to_string(), value.to_string());
        }
        self.persist(&entries)
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> ClientResult<()> {
        for key in keys {
            self.entries.remove(*key);
        }
        Ok(())
    }

    fn keys(&self) -> ClientResult<Vec<String>> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        Ok(keys)
    }
}
