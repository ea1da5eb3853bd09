use crate::domain::model::{PublicUser, Tier};

/// The signed-in dealer's tier and contact name, used to drive tier limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealerState {
    pub tier: Tier,
    pub name: String,
    pub email: String,
}

impl Default for DealerState {
    fn default() -> Self {
        Self {
            tier: Tier::Gold,
            name: String::new(),
            email: String::new(),
        }
    }
}

/// 部分更新：只覆蓋有值的欄位
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealerUpdate {
    pub tier: Option<Tier>,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl DealerState {
    pub fn from_user(user: &PublicUser) -> Self {
        let mut state = Self::default();
        state.update(DealerUpdate::from(user));
        state
    }

    pub fn update(&mut self, patch: DealerUpdate) {
        if let Some(tier) = patch.tier {
            self.tier = tier;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
    }
}

impl From<&PublicUser> for DealerUpdate {
    fn from(user: &PublicUser) -> Self {
        Self {
            tier: Some(user.tier),
            name: Some(format!("{} {}", user.first_name, user.last_name).trim().to_string()),
            email: Some(user.business_email.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tier_is_gold() {
        assert_eq!(DealerState::default().tier, Tier::Gold);
    }

    #[test]
    fn test_update_merges_only_given_fields() {
        let mut state = DealerState {
            tier: Tier::Silver,
            name: "Old".to_string(),
            email: "old@x.com".to_string(),
        };
        state.update(DealerUpdate {
            name: Some("New".to_string()),
            ..Default::default()
        });

        assert_eq!(state.tier, Tier::Silver);
        assert_eq!(state.name, "New");
        assert_eq!(state.email, "old@x.com");
    }

    #[test]
    fn test_from_user() {
        let user = PublicUser {
            user_id: "dev-user".to_string(),
            first_name: "Dev".to_string(),
            last_name: "User".to_string(),
            business_email: "test@test.com".to_string(),
            company_name: "Dev Co".to_string(),
            tier: Tier::Bronze,
        };
        let state = DealerState::from_user(&user);
        assert_eq!(state.tier, Tier::Bronze);
        assert_eq!(state.name, "Dev User");
        assert_eq!(state.email, "test@test.com");
    }
}
