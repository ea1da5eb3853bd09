use crate::core::directory::DirectoryStore;
use crate::domain::model::{
    LoginForm, LoginResponse, PublicUser, RegisterResponse, RegistrationForm, Role, Tier,
};
use crate::domain::ports::{AuthApi, KeyValueStore};
use crate::utils::error::{PortalError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

pub const DEV_ACCOUNT_EMAIL: &str = "test@test.com";
pub const DEV_ACCOUNT_PASSWORD: &str = "123456";

/// 模擬網路延遲
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub register: Duration,
    pub login: Duration,
}

impl Latency {
    pub fn none() -> Self {
        Self {
            register: Duration::ZERO,
            login: Duration::ZERO,
        }
    }

    pub fn from_millis(register_ms: u64, login_ms: u64) -> Self {
        Self {
            register: Duration::from_millis(register_ms),
            login: Duration::from_millis(login_ms),
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::from_millis(700, 600)
    }
}

/// Registration and login against a [`DirectoryStore`], resolving once after
/// a fixed delay. Tokens are opaque, unsigned and never expire.
pub struct MockAuthService<S: KeyValueStore> {
    directory: DirectoryStore<S>,
    latency: Latency,
    last_token_millis: AtomicI64,
}

impl<S: KeyValueStore> MockAuthService<S> {
    pub fn new(directory: DirectoryStore<S>) -> Self {
        Self::with_latency(directory, Latency::default())
    }

    pub fn with_latency(directory: DirectoryStore<S>, latency: Latency) -> Self {
        Self {
            directory,
            latency,
            last_token_millis: AtomicI64::new(0),
        }
    }

    pub fn directory(&self) -> &DirectoryStore<S> {
        &self.directory
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    /// 每次呼叫產生新 token；同一毫秒內的呼叫使用遞增的時間戳
    fn mint_token(&self, user_id: &str) -> String {
        let now = chrono::Utc::now().timestamp_millis();
        let next = |last: i64| now.max(last + 1);
        let previous = match self.last_token_millis.fetch_update(
            Ordering::SeqCst,
            Ordering::SeqCst,
            |last| Some(next(last)),
        ) {
            Ok(previous) | Err(previous) => previous,
        };
        make_token(user_id, next(previous))
    }
}

#[async_trait]
impl<S: KeyValueStore> AuthApi for MockAuthService<S> {
    async fn register(&self, form: &RegistrationForm) -> Result<RegisterResponse> {
        simulate_latency(self.latency.register).await;

        let record = match self.directory.insert(form) {
            Ok(record) => record,
            Err(PortalError::DuplicateEmail) => {
                tracing::info!("Registration rejected: email already registered");
                return Err(PortalError::DuplicateEmail);
            }
            Err(e) => return Err(e),
        };

        tracing::info!("Registered dealer {} ({})", record.user_id, record.tier);

        Ok(RegisterResponse {
            message: "Registration successful".to_string(),
            token: self.mint_token(&record.user_id),
            user_id: record.user_id.clone(),
            user: record.public_view(),
        })
    }

    async fn login(&self, form: &LoginForm) -> Result<LoginResponse> {
        simulate_latency(self.latency.login).await;

        let user = match self.directory.find_by_email(&form.email)? {
            Some(record) if record.password == form.password => Some(record.public_view()),
            _ if form.email == DEV_ACCOUNT_EMAIL && form.password == DEV_ACCOUNT_PASSWORD => {
                tracing::debug!("Falling back to development account");
                Some(dev_user())
            }
            _ => None,
        };

        // 不區分「帳號不存在」與「密碼錯誤」
        let Some(user) = user else {
            tracing::info!("Login rejected: invalid credentials");
            return Err(PortalError::InvalidCredentials);
        };

        tracing::info!("Dealer {} signed in", user.user_id);

        Ok(LoginResponse {
            message: "Login successful".to_string(),
            token: self.mint_token(&user.user_id),
            user,
            role: Role::Dealer,
        })
    }
}

async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

pub fn make_token(user_id: &str, timestamp_millis: i64) -> String {
    format!("mock-token-{}-{}", user_id, timestamp_millis)
}

fn dev_user() -> PublicUser {
    PublicUser {
        user_id: "dev-user".to_string(),
        first_name: "Dev".to_string(),
        last_name: "User".to_string(),
        business_email: DEV_ACCOUNT_EMAIL.to_string(),
        company_name: "Dev Co".to_string(),
        tier: Tier::Bronze,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStorage;

    fn service() -> MockAuthService<MemoryStorage> {
        MockAuthService::with_latency(DirectoryStore::new(MemoryStorage::new()), Latency::none())
    }

    fn form(email: &str, password: &str) -> RegistrationForm {
        RegistrationForm {
            first_name: "Kim".to_string(),
            last_name: "Park".to_string(),
            business_email: email.to_string(),
            company_name: "Park Systems".to_string(),
            tier: Tier::Platinum,
            password: password.to_string(),
            confirm_password: password.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_token_format() {
        let token = service().mint_token("U123456");
        let suffix = token.strip_prefix("mock-token-U123456-").unwrap();
        assert!(suffix.parse::<i64>().is_ok());
        assert_eq!(make_token("dev-user", 42), "mock-token-dev-user-42");
    }

    #[tokio::test]
    async fn test_back_to_back_logins_never_repeat_a_token() {
        let auth = service();
        let form = LoginForm {
            email: DEV_ACCOUNT_EMAIL.to_string(),
            password: DEV_ACCOUNT_PASSWORD.to_string(),
        };

        let mut seen = std::collections::HashSet::new();
        let mut last_stamp = 0i64;
        for _ in 0..100 {
            let token = auth.login(&form).await.unwrap().token;
            let stamp: i64 = token
                .strip_prefix("mock-token-dev-user-")
                .unwrap()
                .parse()
                .unwrap();
            assert!(stamp > last_stamp);
            last_stamp = stamp;
            assert!(seen.insert(token));
        }
    }

    #[test]
    fn test_default_latency_matches_mock_network() {
        let latency = Latency::default();
        assert_eq!(latency.register, Duration::from_millis(700));
        assert_eq!(latency.login, Duration::from_millis(600));
    }

    #[tokio::test]
    async fn test_register_returns_public_view() {
        let auth = service();
        let response = auth.register(&form("kim@park.io", "Secret12!")).await.unwrap();

        assert_eq!(response.message, "Registration successful");
        assert_eq!(response.user.user_id, response.user_id);
        assert_eq!(response.user.tier, Tier::Platinum);
        assert!(response
            .token
            .starts_with(&format!("mock-token-{}-", response.user_id)));

        let json = serde_json::to_value(&response.user).unwrap();
        assert!(json.get("password").is_none());
    }

    #[tokio::test]
    async fn test_login_matches_email_case_insensitively_and_password_exactly() {
        let auth = service();
        auth.register(&form("Kim@Park.io", "Secret12!")).await.unwrap();

        let ok = auth
            .login(&LoginForm {
                email: "kim@PARK.io".to_string(),
                password: "Secret12!".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(ok.role, Role::Dealer);
        assert_eq!(ok.message, "Login successful");

        let wrong_case_password = auth
            .login(&LoginForm {
                email: "kim@park.io".to_string(),
                password: "secret12!".to_string(),
            })
            .await;
        assert!(matches!(wrong_case_password, Err(PortalError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_are_indistinguishable() {
        let auth = service();
        auth.register(&form("kim@park.io", "Secret12!")).await.unwrap();

        let unknown = auth
            .login(&LoginForm {
                email: "nobody@park.io".to_string(),
                password: "Secret12!".to_string(),
            })
            .await
            .unwrap_err();
        let wrong = auth
            .login(&LoginForm {
                email: "kim@park.io".to_string(),
                password: "nope".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[test]
    fn test_register_rejects_second_registration_of_same_email() {
        let auth = service();

        tokio_test::assert_ok!(tokio_test::block_on(
            auth.register(&form("dup@park.io", "Secret12!"))
        ));
        let err = tokio_test::assert_err!(tokio_test::block_on(
            auth.register(&form("DUP@park.io", "Other12!x"))
        ));
        assert!(matches!(err, PortalError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_dev_account_requires_exact_email() {
        let auth = service();
        let result = auth
            .login(&LoginForm {
                email: "TEST@test.com".to_string(),
                password: DEV_ACCOUNT_PASSWORD.to_string(),
            })
            .await;
        assert!(matches!(result, Err(PortalError::InvalidCredentials)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_for_configured_latency() {
        let auth = MockAuthService::with_latency(
            DirectoryStore::new(MemoryStorage::new()),
            Latency::from_millis(700, 600),
        );
        let started = tokio::time::Instant::now();

        auth.login(&LoginForm {
            email: DEV_ACCOUNT_EMAIL.to_string(),
            password: DEV_ACCOUNT_PASSWORD.to_string(),
        })
        .await
        .unwrap();

        assert!(started.elapsed() >= Duration::from_millis(600));
    }
}
