use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Bronze, Tier::Silver, Tier::Gold, Tier::Platinum];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Bronze => "bronze",
            Tier::Silver => "silver",
            Tier::Gold => "gold",
            Tier::Platinum => "platinum",
        }
    }

    /// 公開列表顯示的服務數量上限（僅供提示，不修改資料）
    pub fn visible_limit(&self) -> VisibleLimit {
        match self {
            Tier::Bronze | Tier::Silver => VisibleLimit::Limited(3),
            Tier::Gold => VisibleLimit::Limited(5),
            Tier::Platinum => VisibleLimit::Unlimited,
        }
    }

    pub fn benefits(&self) -> TierBenefits {
        let (title, features): (&str, &[&str]) = match self {
            Tier::Bronze => (
                "Bronze - Basic Listing",
                &[
                    "Basic store listing",
                    "Top 3 services shown",
                    "No lead form",
                    "Standard placement",
                ],
            ),
            Tier::Silver => (
                "Silver - Lead Form Enabled",
                &[
                    "Basic store listing",
                    "All services listed",
                    "Lead generation form",
                    "Better placement",
                ],
            ),
            Tier::Gold => (
                "Gold - Gallery Rich Profile",
                &[
                    "Premium large listing",
                    "Up to 5 project photos",
                    "Social media links",
                    "Rich HTML descriptions",
                    "Lead generation form",
                ],
            ),
            Tier::Platinum => (
                "Platinum - Full Premium Listing",
                &[
                    "Top placement in region",
                    "Unlimited photos",
                    "Social media links",
                    "Rich HTML descriptions",
                    "Lead generation form",
                    "Awards/affiliations section",
                ],
            ),
        };

        TierBenefits {
            title: title.to_string(),
            features: features.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bronze" => Ok(Tier::Bronze),
            "silver" => Ok(Tier::Silver),
            "gold" => Ok(Tier::Gold),
            "platinum" => Ok(Tier::Platinum),
            other => Err(format!(
                "unknown tier '{}', expected one of bronze, silver, gold, platinum",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibleLimit {
    Limited(usize),
    Unlimited,
}

impl VisibleLimit {
    pub fn allows(&self, count: usize) -> bool {
        match self {
            VisibleLimit::Limited(limit) => count <= *limit,
            VisibleLimit::Unlimited => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierBenefits {
    pub title: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Dealer,
    Guest,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Admin => "admin",
            Role::Dealer => "dealer",
            Role::Guest => "guest",
        };
        f.write_str(name)
    }
}

/// Directory entry as persisted under the users key. The password is kept in
/// plaintext; this store is a mock and must not hold real credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub business_email: String,
    pub phone_number: String,
    pub company_name: String,
    pub business_website_url: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub tier: Tier,
    pub password: String,
}

impl UserRecord {
    pub fn from_form(user_id: String, form: &RegistrationForm) -> Self {
        Self {
            user_id,
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            business_email: form.business_email.clone(),
            phone_number: form.phone_number.clone(),
            company_name: form.company_name.clone(),
            business_website_url: form.business_website_url.clone(),
            address: form.address.clone(),
            city: form.city.clone(),
            state: form.state.clone(),
            tier: form.tier,
            password: form.password.clone(),
        }
    }

    pub fn public_view(&self) -> PublicUser {
        PublicUser {
            user_id: self.user_id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            business_email: self.business_email.clone(),
            company_name: self.company_name.clone(),
            tier: self.tier,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub business_email: String,
    pub company_name: String,
    pub tier: Tier,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub user: Option<PublicUser>,
}

impl Session {
    pub fn new(token: String, role: Role, user: PublicUser) -> Self {
        Self {
            token: Some(token),
            role: Some(role),
            user: Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceItem {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    pub visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub business_email: String,
    pub phone_number: String,
    pub company_name: String,
    pub business_website_url: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub tier: Tier,
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceForm {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: String,
    pub token: String,
    pub user: PublicUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
    pub role: Role,
}
