use crate::store::KeyValueStore;

pub const RECENT_KEY: &str = "recentCountries";
pub const RECENT_CAP: usize = 5;

/// Most-recent-first list of searched place names, unique ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentQueries {
    items: Vec<String>,
}

impl RecentQueries {
    /// Read the list from `store`; anything unreadable counts as empty.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let items = store
            .get(RECENT_KEY)
            .and_then(|raw| match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(items) => Some(items),
                Err(e) => {
                    tracing::warn!("Ignoring unreadable recent searches: {e}");
                    None
                }
            })
            .unwrap_or_default();

        let mut recent = Self::default();
        for name in items.iter().rev() {
            recent.push(name);
        }
        recent
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> anyhow::Result<()> {
        let json = serde_json::to_string(&self.items)?;
        store.set(RECENT_KEY, &json)
    }

    pub fn push(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        let lower = name.to_lowercase();
        self.items.retain(|existing| existing.to_lowercase() != lower);
        self.items.insert(0, name.to_string());
        self.items.truncate(RECENT_CAP);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn first(&self) -> Option<&str> {
        self.items.first().map(String::as_str)
    }
}
