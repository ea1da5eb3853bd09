use crate::domain::model::{ServiceForm, ServiceItem, Tier, VisibleLimit};
use crate::domain::ports::KeyValueStore;
use crate::utils::error::{PortalError, Result};
use std::collections::HashSet;
use uuid::Uuid;

pub const SERVICES_KEY: &str = "dm_services_v1";

/// Ordered list of a dealer's services. Position in the vector is the display
/// order; there is no separate rank field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceList {
    items: Vec<ServiceItem>,
}

impl ServiceList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<ServiceItem>) -> Self {
        Self { items }
    }

    /// 空列表時使用的示範資料
    pub fn with_demo_services() -> Self {
        let mut list = Self::new();
        for (title, description, price) in [
            ("Home Theater Installation", "Turnkey design & install", "₹25,000"),
            ("Multiroom Audio", "Whole-home audio setup", "₹18,000"),
            ("Automation Setup", "Smart home automation", "₹40,000"),
        ] {
            list.add(ServiceForm {
                title: title.to_string(),
                description: Some(description.to_string()),
                price: Some(price.to_string()),
            });
        }
        list
    }

    pub fn items(&self) -> &[ServiceItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ServiceItem> {
        self.items.iter().find(|s| s.id == id)
    }

    /// Appends a new visible entry and returns its id.
    pub fn add(&mut self, form: ServiceForm) -> String {
        let item = ServiceItem {
            id: Uuid::new_v4().to_string(),
            title: form.title.trim().to_string(),
            description: non_blank(form.description),
            price: non_blank(form.price),
            visible: true,
        };
        let id = item.id.clone();
        self.items.push(item);
        id
    }

    /// Replaces the entry with the same id. Unknown ids are ignored.
    pub fn update(&mut self, item: ServiceItem) -> bool {
        match self.items.iter_mut().find(|s| s.id == item.id) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Applies edited form values to an existing entry. The id is kept and the
    /// entry becomes visible again.
    pub fn edit(&mut self, id: &str, form: ServiceForm) -> bool {
        let Some(current) = self.get(id) else {
            return false;
        };

        let item = ServiceItem {
            id: current.id.clone(),
            title: form.title.trim().to_string(),
            description: non_blank(form.description),
            price: non_blank(form.price),
            // 編輯後一律重新公開
            visible: true,
        };
        self.update(item)
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|s| s.id != id);
        self.items.len() != before
    }

    /// Replaces the whole sequence. The caller must supply a permutation of
    /// the current entries; see [`ServiceList::reorder_checked`].
    pub fn reorder(&mut self, sequence: Vec<ServiceItem>) {
        self.items = sequence;
    }

    pub fn reorder_checked(&mut self, sequence: Vec<ServiceItem>) -> Result<()> {
        if sequence.len() != self.items.len() {
            return Err(PortalError::InvalidReorder {
                message: format!(
                    "expected {} services, got {}",
                    self.items.len(),
                    sequence.len()
                ),
            });
        }

        let current: HashSet<&str> = self.items.iter().map(|s| s.id.as_str()).collect();
        let mut seen = HashSet::new();
        for item in &sequence {
            if !current.contains(item.id.as_str()) {
                return Err(PortalError::InvalidReorder {
                    message: format!("unknown service id '{}'", item.id),
                });
            }
            if !seen.insert(item.id.as_str()) {
                return Err(PortalError::InvalidReorder {
                    message: format!("service id '{}' appears twice", item.id),
                });
            }
        }

        self.reorder(sequence);
        Ok(())
    }

    /// 拖放結束：把 `active_id` 移到 `over_id` 所在位置
    pub fn move_item(&mut self, active_id: &str, over_id: &str) -> bool {
        if active_id == over_id {
            return false;
        }

        let old_index = self.items.iter().position(|s| s.id == active_id);
        let new_index = self.items.iter().position(|s| s.id == over_id);
        let (Some(old_index), Some(new_index)) = (old_index, new_index) else {
            return false;
        };

        let mut sequence = self.items.clone();
        let moved = sequence.remove(old_index);
        sequence.insert(new_index, moved);
        self.reorder(sequence);
        true
    }

    pub fn toggle_visible(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|s| s.id == id) {
            Some(item) => {
                item.visible = !item.visible;
                true
            }
            None => false,
        }
    }

    /// The entries that would appear publicly for `tier`: the first N in
    /// list order, regardless of their `visible` flags.
    pub fn public_preview(&self, tier: Tier) -> &[ServiceItem] {
        match tier.visible_limit() {
            VisibleLimit::Limited(limit) => &self.items[..limit.min(self.items.len())],
            VisibleLimit::Unlimited => &self.items,
        }
    }

    pub fn exceeds_limit(&self, tier: Tier) -> bool {
        !tier.visible_limit().allows(self.items.len())
    }

    pub fn load<S: KeyValueStore>(storage: &S) -> Result<Self> {
        let Some(raw) = storage.get_item(SERVICES_KEY)? else {
            return Ok(Self::new());
        };

        match serde_json::from_str::<Vec<ServiceItem>>(&raw) {
            Ok(items) => Ok(Self::from_items(items)),
            Err(e) => {
                tracing::warn!(
                    "{}; starting with an empty services list",
                    PortalError::MalformedPersistedState {
                        key: SERVICES_KEY.to_string(),
                        reason: e.to_string(),
                    }
                );
                Ok(Self::new())
            }
        }
    }

    pub fn save<S: KeyValueStore>(&self, storage: &S) -> Result<()> {
        let raw = serde_json::to_string(&self.items)?;
        storage.set_item(SERVICES_KEY, &raw)
    }
}

pub fn tier_note(tier: Tier) -> String {
    match tier.visible_limit() {
        VisibleLimit::Unlimited => format!("Your {} tier allows unlimited public services.", tier),
        VisibleLimit::Limited(limit) => format!(
            "Your {} tier shows top {} services in public listing.",
            tier, limit
        ),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
