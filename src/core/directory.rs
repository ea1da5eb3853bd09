use crate::domain::model::{RegistrationForm, UserRecord};
use crate::domain::ports::KeyValueStore;
use crate::utils::error::{PortalError, Result};
use rand::Rng;

pub const USERS_KEY: &str = "dm_users";

/// Registered users, persisted as one JSON array under [`USERS_KEY`].
///
/// Every mutation reads the whole array, changes it in memory and writes the
/// whole array back. There is no protection against concurrent writers.
#[derive(Debug, Clone)]
pub struct DirectoryStore<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> DirectoryStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn all(&self) -> Result<Vec<UserRecord>> {
        self.read_users()
    }

    /// 以 email 查詢（不分大小寫，完全比對）
    pub fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let users = self.read_users()?;
        Ok(users.into_iter().find(|u| emails_match(&u.business_email, email)))
    }

    pub fn insert(&self, form: &RegistrationForm) -> Result<UserRecord> {
        let mut users = self.read_users()?;

        if users
            .iter()
            .any(|u| emails_match(&u.business_email, &form.business_email))
        {
            return Err(PortalError::DuplicateEmail);
        }

        let record = UserRecord::from_form(generate_user_id(), form);
        users.push(record.clone());
        self.write_users(&users)?;

        tracing::debug!("Directory now holds {} users", users.len());
        Ok(record)
    }

    fn read_users(&self) -> Result<Vec<UserRecord>> {
        let Some(raw) = self.storage.get_item(USERS_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<UserRecord>>(&raw) {
            Ok(users) => Ok(users),
            Err(e) => {
                // 資料損毀時視為空目錄，下一次寫入會覆蓋
                let err = PortalError::MalformedPersistedState {
                    key: USERS_KEY.to_string(),
                    reason: e.to_string(),
                };
                tracing::warn!("{}; treating directory as empty", err);
                Ok(Vec::new())
            }
        }
    }

    fn write_users(&self, users: &[UserRecord]) -> Result<()> {
        let raw = serde_json::to_string(users)?;
        self.storage.set_item(USERS_KEY, &raw)
    }
}

fn emails_match(stored: &str, candidate: &str) -> bool {
    stored.to_lowercase() == candidate.to_lowercase()
}

/// `U` 加上六位隨機數字；不檢查碰撞
fn generate_user_id() -> String {
    let digits: u32 = rand::thread_rng().gen_range(100_000..=999_999);
    format!("U{}", digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStorage;
    use crate::domain::model::Tier;

    fn form(email: &str) -> RegistrationForm {
        RegistrationForm {
            first_name: "Sam".to_string(),
            last_name: "Lee".to_string(),
            business_email: email.to_string(),
            company_name: "Lee Audio".to_string(),
            tier: Tier::Gold,
            password: "Passw0rd!".to_string(),
            confirm_password: "Passw0rd!".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_insert_assigns_prefixed_six_digit_id() {
        let store = DirectoryStore::new(MemoryStorage::new());
        let record = store.insert(&form("sam@lee.com")).unwrap();

        assert!(record.user_id.starts_with('U'));
        assert_eq!(record.user_id.len(), 7);
        assert!(record.user_id[1..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_find_by_email_is_case_insensitive() {
        let store = DirectoryStore::new(MemoryStorage::new());
        store.insert(&form("Sam@Lee.com")).unwrap();

        let found = store.find_by_email("sam@lee.COM").unwrap();
        assert_eq!(found.map(|u| u.company_name), Some("Lee Audio".to_string()));
        assert!(store.find_by_email("other@lee.com").unwrap().is_none());
    }

    #[test]
    fn test_insert_rejects_duplicate_email() {
        let store = DirectoryStore::new(MemoryStorage::new());
        store.insert(&form("A@B.com")).unwrap();

        let err = store.insert(&form("a@b.com")).unwrap_err();
        assert!(matches!(err, PortalError::DuplicateEmail));
        assert_eq!(store.all().unwrap().len(), 1);
    }

    #[test]
    fn test_persisted_array_omits_confirm_password() {
        let storage = MemoryStorage::new();
        let store = DirectoryStore::new(storage.clone());
        store.insert(&form("sam@lee.com")).unwrap();

        let raw = storage.get_item(USERS_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["businessEmail"], "sam@lee.com");
        assert_eq!(json[0]["password"], "Passw0rd!");
        assert!(json[0].get("confirmPassword").is_none());
    }

    #[test]
    fn test_malformed_directory_reads_as_empty() {
        let storage = MemoryStorage::new();
        storage.set_item(USERS_KEY, "{not json").unwrap();
        let store = DirectoryStore::new(storage);

        assert!(store.all().unwrap().is_empty());
        assert!(store.insert(&form("fresh@start.com")).is_ok());
        assert_eq!(store.all().unwrap().len(), 1);
    }
}
