//! # Rules Store
//!
//! Publishes the current [`RulesConfig`] to every service.
//!
//! ## Snapshot Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   RwLock<Arc<RulesConfig>>                                             │
//! │        │                                                                │
//! │        ├── snapshot() ──► Arc clone (readers keep their copy)          │
//! │        │                                                                │
//! │        └── replace(new) ──► validate ──► swap whole Arc                │
//! │                                                                         │
//! │   A pricing run holds one snapshot from start to finish, so it never   │
//! │   sees half of an old rule set and half of a new one.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The lock is only held to clone or swap the `Arc`, never across `.await`.

use parking_lot::RwLock;
use rulequote_core::RulesConfig;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::error::ServiceResult;

/// Holder of the active pricing rules.
#[derive(Debug)]
pub struct RulesStore {
    current: RwLock<Arc<RulesConfig>>,
}

impl RulesStore {
    /// Creates a store after validating `rules`.
    pub fn new(rules: RulesConfig) -> ServiceResult<Self> {
        rules.validate()?;
        Ok(RulesStore {
            current: RwLock::new(Arc::new(rules)),
        })
    }

    /// Returns the rules in effect right now.
    pub fn snapshot(&self) -> Arc<RulesConfig> {
        Arc::clone(&self.current.read())
    }

    /// Validates `rules` and makes them current. On error the old rules stay.
    pub fn replace(&self, rules: RulesConfig) -> ServiceResult<()> {
        rules.validate()?;
        *self.current.write() = Arc::new(rules);
        info!("Pricing rules replaced");
        Ok(())
    }

    /// Reads a rules file (TOML, same shape as `[rules]` in the config) and
    /// replaces the current rules with it.
    pub fn reload_from(&self, path: &Path) -> ServiceResult<Arc<RulesConfig>> {
        info!(?path, "Reloading pricing rules");
        let contents = std::fs::read_to_string(path)?;
        let rules: RulesConfig = toml::from_str(&contents)?;
        self.replace(rules)?;
        Ok(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use rulequote_core::CustomerTier;
    use rust_decimal_macros::dec;

    #[test]
    fn test_snapshot_survives_replace() {
        let store = RulesStore::new(RulesConfig::default()).unwrap();
        let before = store.snapshot();

        store
            .replace(RulesConfig::default().with_discounts_enabled(false))
            .unwrap();

        // The old snapshot is unchanged; new readers see the new rules
        assert!(before.discounts.enabled);
        assert!(!store.snapshot().discounts.enabled);
    }

    #[test]
    fn test_invalid_replace_keeps_old_rules() {
        let store = RulesStore::new(RulesConfig::default()).unwrap();
        let mut bad = RulesConfig::default();
        bad.discounts.standard.threshold = dec!(-1);

        assert!(matches!(store.replace(bad), Err(ServiceError::Core(_))));
        assert_eq!(*store.snapshot(), RulesConfig::default());
    }

    #[test]
    fn test_reload_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.toml");
        std::fs::write(
            &path,
            "[discounts.premium]\nthreshold = 50\npercentage = \"0.15\"\n",
        )
        .unwrap();

        let store = RulesStore::new(RulesConfig::default()).unwrap();
        let rules = store.reload_from(&path).unwrap();

        let premium = rules.discounts.rule_for(CustomerTier::Premium);
        assert_eq!(premium.threshold, dec!(50));
        assert_eq!(premium.percentage.value(), dec!(0.15));
    }

    #[test]
    fn test_reload_missing_file_fails() {
        let store = RulesStore::new(RulesConfig::default()).unwrap();
        let result = store.reload_from(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ServiceError::Io(_))));
    }
}
