use crate::core::auth::{Latency, MockAuthService};
use crate::core::dealer::{DealerState, DealerUpdate};
use crate::core::directory::DirectoryStore;
use crate::core::services::ServiceList;
use crate::core::session::SessionState;
use crate::domain::model::{
    LoginForm, LoginResponse, RegisterResponse, RegistrationForm, Role, Session,
};
use crate::domain::ports::{AuthApi, KeyValueStore};
use crate::utils::error::{PortalError, Result};
use crate::utils::validation::Validate;

/// Client-side portal context: validates forms, calls the auth service and
/// keeps session, dealer and services state. All collaborators are injected.
pub struct DealerPortal<S: KeyValueStore, A: AuthApi> {
    storage: S,
    auth: A,
    session: SessionState<S>,
    dealer: DealerState,
    services: ServiceList,
}

impl<S: KeyValueStore + Clone> DealerPortal<S, MockAuthService<S>> {
    pub fn with_mock_auth(storage: S, latency: Latency) -> Result<Self> {
        let auth = MockAuthService::with_latency(DirectoryStore::new(storage.clone()), latency);
        Self::new(storage, auth)
    }
}

impl<S: KeyValueStore + Clone, A: AuthApi> DealerPortal<S, A> {
    pub fn new(storage: S, auth: A) -> Result<Self> {
        let session = SessionState::restore(storage.clone());
        let dealer = session
            .user()
            .map(DealerState::from_user)
            .unwrap_or_default();
        let services = ServiceList::load(&storage)?;

        tracing::debug!(
            "Portal started (authenticated: {}, services: {})",
            session.is_authenticated(),
            services.len()
        );

        Ok(Self {
            storage,
            auth,
            session,
            dealer,
            services,
        })
    }

    pub async fn register(&mut self, form: &RegistrationForm) -> Result<RegisterResponse> {
        form.validate()?;

        let response = self.auth.register(form).await?;

        // 註冊成功後直接登入
        self.session.login(Session::new(
            response.token.clone(),
            Role::Dealer,
            response.user.clone(),
        ));
        self.dealer.update(DealerUpdate::from(&response.user));

        Ok(response)
    }

    pub async fn login(&mut self, form: &LoginForm) -> Result<LoginResponse> {
        form.validate()?;

        let response = self.auth.login(form).await?;

        self.session.login(Session::new(
            response.token.clone(),
            response.role,
            response.user.clone(),
        ));
        self.dealer.update(DealerUpdate::from(&response.user));

        Ok(response)
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.dealer = DealerState::default();
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// 需要登入的操作先呼叫此檢查
    pub fn require_session(&self) -> Result<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(PortalError::NotAuthenticated)
        }
    }

    pub fn session(&self) -> &SessionState<S> {
        &self.session
    }

    pub fn dealer(&self) -> &DealerState {
        &self.dealer
    }

    pub fn dealer_mut(&mut self) -> &mut DealerState {
        &mut self.dealer
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    pub fn services(&self) -> &ServiceList {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut ServiceList {
        &mut self.services
    }

    pub fn seed_demo_services_if_empty(&mut self) -> bool {
        if !self.services.is_empty() {
            return false;
        }
        self.services = ServiceList::with_demo_services();
        true
    }

    pub fn save_services(&self) -> Result<()> {
        self.services.save(&self.storage)
    }
}
