use crate::domain::model::{PublicUser, Role, Session};
use crate::domain::ports::KeyValueStore;
use crate::utils::error::{PortalError, Result};

pub const SESSION_KEY: &str = "dm_auth_v1";

/// Current authenticated identity, mirrored to storage as one JSON blob.
pub struct SessionState<S: KeyValueStore> {
    storage: S,
    current: Session,
}

impl<S: KeyValueStore> SessionState<S> {
    /// 從存儲恢復；缺少或損毀時回到空白 session，不回報錯誤
    pub fn restore(storage: S) -> Self {
        let current = match read_session(&storage) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("{}; starting with an empty session", e);
                Session::default()
            }
        };

        Self { storage, current }
    }

    pub fn login(&mut self, session: Session) {
        self.current = session;

        if let Err(e) = self.persist() {
            tracing::warn!("Failed to persist session: {}", e);
        }
    }

    pub fn logout(&mut self) {
        self.current = Session::default();

        if let Err(e) = self.storage.remove_item(SESSION_KEY) {
            tracing::warn!("Failed to remove persisted session: {}", e);
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_authenticated()
    }

    pub fn token(&self) -> Option<&str> {
        self.current.token.as_deref()
    }

    pub fn role(&self) -> Option<Role> {
        self.current.role
    }

    pub fn user(&self) -> Option<&PublicUser> {
        self.current.user.as_ref()
    }

    pub fn snapshot(&self) -> &Session {
        &self.current
    }

    fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.current)?;
        self.storage.set_item(SESSION_KEY, &raw)
    }
}

fn read_session<S: KeyValueStore>(storage: &S) -> Result<Session> {
    let Some(raw) = storage.get_item(SESSION_KEY)? else {
        return Ok(Session::default());
    };

    let malformed = |reason: String| PortalError::MalformedPersistedState {
        key: SESSION_KEY.to_string(),
        reason,
    };

    // 只接受 `{token, role, user}` 物件格式
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(malformed("session blob is not a JSON object".to_string()));
    }

    serde_json::from_value(value).map_err(|e| malformed(e.to_string()))
}
