//! Suggestion categories and the default registry.
//!
//! Category order is significant: it defines aggregation precedence, and an
//! unexpired exclusive category that yields anything hides everything after it.

use serde::{Deserialize, Serialize};

use crate::clock::MILLIS_PER_DAY;

pub const CATEGORY_PREFIX: &str = "suggested.category.";

pub const CATEGORY_KEY_DEFERRED_SETUP: &str = "suggested.category.deferred_setup";
pub const CATEGORY_KEY_FIRST_IMPRESSION: &str = "suggested.category.first_impression";

/// Exclusivity window of the default exclusive categories.
const EXCLUSIVE_EXPIRE_DAYS: i64 = 14;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub tag: String,
    #[serde(default)]
    pub exclusive: bool,
    /// Negative means the exclusivity never expires.
    #[serde(default = "never_expires")]
    pub exclusive_expire_days: i64,
}

const fn never_expires() -> i64 {
    -1
}

impl Category {
    #[must_use]
    pub fn normal(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            exclusive: false,
            exclusive_expire_days: -1,
        }
    }

    #[must_use]
    pub fn exclusive(tag: impl Into<String>, expire_days: i64) -> Self {
        Self {
            tag: tag.into(),
            exclusive: true,
            exclusive_expire_days: expire_days,
        }
    }

    /// Exclusivity window in millis, or `None` when it never expires.
    #[must_use]
    pub const fn exclusive_expire_millis(&self) -> Option<i64> {
        if self.exclusive_expire_days < 0 {
            None
        } else {
            Some(self.exclusive_expire_days.saturating_mul(MILLIS_PER_DAY))
        }
    }

    /// Key under which the category's first-seen time is persisted.
    #[must_use]
    pub fn setup_key(&self) -> String {
        format!("category:{}", self.tag)
    }
}

/// The built-in category order.
#[must_use]
pub fn default_categories() -> Vec<Category> {
    let mut categories = vec![
        Category::exclusive(CATEGORY_KEY_DEFERRED_SETUP, EXCLUSIVE_EXPIRE_DAYS),
        Category::exclusive(CATEGORY_KEY_FIRST_IMPRESSION, EXCLUSIVE_EXPIRE_DAYS),
    ];
    categories.extend(
        [
            "lock_screen",
            "trust_agent",
            "email",
            "partner_account",
            "gesture",
            "hotword",
            "default",
            "settings_only",
        ]
        .into_iter()
        .map(|name| Category::normal(format!("{CATEGORY_PREFIX}{name}"))),
    );
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_ten_categories() {
        assert_eq!(default_categories().len(), 10);
    }

    #[test]
    fn only_setup_categories_are_exclusive() {
        let exclusive: Vec<_> = default_categories()
            .into_iter()
            .filter(|c| c.exclusive)
            .map(|c| c.tag)
            .collect();
        assert_eq!(
            exclusive,
            vec![CATEGORY_KEY_DEFERRED_SETUP, CATEGORY_KEY_FIRST_IMPRESSION]
        );
    }

    #[test]
    fn negative_expiry_never_expires() {
        assert_eq!(Category::normal("x").exclusive_expire_millis(), None);
        assert_eq!(
            Category::exclusive("x", 2).exclusive_expire_millis(),
            Some(2 * MILLIS_PER_DAY)
        );
        assert_eq!(Category::exclusive("x", 0).exclusive_expire_millis(), Some(0));
    }

    #[test]
    fn setup_key_does_not_collide_with_component_ids() {
        let key = Category::normal("suggested.category.email").setup_key();
        assert!(key.starts_with("category:"));
        assert!(!key.contains('/'));
    }
}
