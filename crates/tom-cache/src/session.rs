//! Per-session data kept in a [`Cache`].

use crate::{Cache, CacheError};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A unique session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Create a new session ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random session ID.
    pub fn generate() -> Self {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        use rand::Rng;

        let bytes: [u8; 18] = rand::thread_rng().gen();
        Self(format!("sess_{}", URL_SAFE_NO_PAD.encode(bytes)))
    }

    /// Get the session ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Envelope stored for each session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData<T> {
    pub id: SessionId,
    pub data: T,
    /// Incremented on every write.
    pub version: u64,
    /// Unix seconds.
    pub created_at: u64,
    /// Unix seconds of the last write.
    pub updated_at: u64,
}

/// Typed session storage under one key namespace.
///
/// # Example
///
/// ```rust,ignore
/// let carts = Session::<Cart>::new(Cache::open_dir(".tom/state")?, "cart");
///
/// let id = SessionId::generate();
/// let mut cart = carts.get(&id)?.unwrap_or_default();
/// cart.add_item(&product, None, None)?;
/// carts.set(&id, &cart)?;
/// ```
#[derive(Debug, Clone)]
pub struct Session<T> {
    cache: Cache,
    namespace: String,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Session<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Sessions stored as `<namespace>:<session id>`.
    pub fn new(cache: Cache, namespace: impl Into<String>) -> Self {
        Self {
            cache,
            namespace: namespace.into(),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Get session data if it exists.
    pub fn get(&self, id: &SessionId) -> Result<Option<T>, CacheError> {
        Ok(self.get_versioned(id)?.map(|s| s.data))
    }

    /// Get full session data including version.
    pub fn get_versioned(&self, id: &SessionId) -> Result<Option<SessionData<T>>, CacheError> {
        self.cache.get(&self.session_key(id))
    }

    /// Get session data, or store and return `init()` if there is none.
    pub fn get_or_create(&self, id: &SessionId, init: impl FnOnce() -> T) -> Result<T, CacheError> {
        match self.get(id)? {
            Some(data) => Ok(data),
            None => {
                let data = init();
                self.set(id, &data)?;
                Ok(data)
            }
        }
    }

    /// Write session data, bumping its version. Returns the new version.
    pub fn set(&self, id: &SessionId, data: &T) -> Result<u64, CacheError> {
        let key = self.session_key(id);
        let now = unix_now();
        let (version, created_at) = match self.cache.get::<SessionData<serde_json::Value>>(&key)? {
            Some(prev) => (prev.version + 1, prev.created_at),
            None => (1, now),
        };

        let envelope = SessionData {
            id: id.clone(),
            data,
            version,
            created_at,
            updated_at: now,
        };
        self.cache.set(&key, &envelope)?;
        tracing::debug!(session = %id, namespace = %self.namespace, version, "session saved");
        Ok(version)
    }

    /// Read-modify-write. A missing session starts from `init()`.
    pub fn update<F>(&self, id: &SessionId, init: impl FnOnce() -> T, f: F) -> Result<T, CacheError>
    where
        F: FnOnce(&mut T),
    {
        let mut data = self.get(id)?.unwrap_or_else(init);
        f(&mut data);
        self.set(id, &data)?;
        Ok(data)
    }

    /// Delete a session.
    pub fn delete(&self, id: &SessionId) -> Result<(), CacheError> {
        self.cache.delete(&self.session_key(id))
    }

    /// Check if a session exists.
    pub fn exists(&self, id: &SessionId) -> Result<bool, CacheError> {
        self.cache.exists(&self.session_key(id))
    }

    fn session_key(&self, id: &SessionId) -> String {
        crate::cache_key!(self.namespace.as_str(), id)
    }
}

fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_generate_format() {
        let id = SessionId::generate();
        let s = id.as_str();

        // Base64 encoded 18 bytes = 24 chars, plus "sess_" = 29 chars
        assert!(s.starts_with("sess_"));
        assert_eq!(s.len(), 29);
        assert_ne!(SessionId::generate(), id);
    }

    #[test]
    fn test_session_id_serialization() {
        let id = SessionId::new("serialize-me");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""serialize-me""#);
        let deserialized: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }

    #[test]
    fn test_versions_increase_and_created_at_sticks() {
        let sessions = Session::<Vec<String>>::new(Cache::memory(), "cart");
        let id = SessionId::new("s1");

        assert_eq!(sessions.set(&id, &vec!["a".into()]).unwrap(), 1);
        let first = sessions.get_versioned(&id).unwrap().unwrap();
        assert_eq!(sessions.set(&id, &vec!["b".into()]).unwrap(), 2);
        let second = sessions.get_versioned(&id).unwrap().unwrap();

        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.data, vec!["b".to_string()]);
    }

    #[test]
    fn test_get_or_create_and_update() {
        let cache = Cache::memory();
        let sessions = Session::<Vec<u32>>::new(cache.clone(), "cart");
        let id = SessionId::new("s2");

        assert_eq!(sessions.get_or_create(&id, || vec![1]).unwrap(), vec![1]);
        assert_eq!(sessions.get_or_create(&id, || vec![9]).unwrap(), vec![1]);
        let updated = sessions.update(&id, Vec::new, |v| v.push(2)).unwrap();
        assert_eq!(updated, vec![1, 2]);
        assert_eq!(cache.keys().unwrap(), vec!["cart:s2"]);

        sessions.delete(&id).unwrap();
        assert!(!sessions.exists(&id).unwrap());
    }

    #[test]
    fn test_sessions_persist_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        let id = SessionId::generate();
        Session::<String>::new(Cache::open_dir(dir.path()).unwrap(), "note")
            .set(&id, &"hello".to_string())
            .unwrap();

        let reopened = Session::<String>::new(Cache::open_dir(dir.path()).unwrap(), "note");
        assert_eq!(reopened.get(&id).unwrap().as_deref(), Some("hello"));
    }
}
