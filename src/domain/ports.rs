use crate::domain::model::{LoginForm, LoginResponse, RegisterResponse, RegistrationForm};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Synchronous string key-value storage, the shape of a browser's local storage.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn register(&self, form: &RegistrationForm) -> Result<RegisterResponse>;
    async fn login(&self, form: &LoginForm) -> Result<LoginResponse>;
}
