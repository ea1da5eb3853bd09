pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::PortalConfig;

pub use crate::adapters::{LocalStorage, MemoryStorage};
pub use crate::core::{
    auth::{Latency, MockAuthService},
    dealer::DealerState,
    directory::DirectoryStore,
    portal::DealerPortal,
    services::ServiceList,
    session::SessionState,
};
pub use utils::error::{PortalError, Result};
