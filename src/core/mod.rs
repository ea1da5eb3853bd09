pub mod auth;
pub mod dealer;
pub mod directory;
pub mod portal;
pub mod services;
pub mod session;

pub use crate::domain::model::{
    LoginForm, LoginResponse, PublicUser, RegisterResponse, RegistrationForm, Role, ServiceForm,
    ServiceItem, Session, Tier, UserRecord, VisibleLimit,
};
pub use crate::domain::ports::{AuthApi, KeyValueStore};
pub use crate::utils::error::Result;
