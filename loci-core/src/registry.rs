//! Entity registry: canonical names and their surface forms.
//!
//! The registry is built once, before any scan, and is read-only afterwards.
//! Iteration order is registration order, and within an entity the canonical
//! name always comes first, followed by the aliases in the order given.

use indexmap::IndexMap;
use tracing::warn;

use crate::config::EntityConfig;
use crate::error::{LociError, Result};

/// Fixed mapping from canonical entity name to its ordered surface forms.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    /// canonical → `[canonical, alias…]`
    entities: IndexMap<String, Vec<String>>,
}

impl EntityRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configured entities, in order.
    ///
    /// # Errors
    /// Fails on the first duplicate canonical name or empty surface form.
    pub fn from_config(entities: &[EntityConfig]) -> Result<Self> {
        let mut registry = Self::new();
        for entity in entities {
            registry.register(&entity.canonical, &entity.aliases)?;
        }
        Ok(registry)
    }

    /// Register one entity with its aliases.
    ///
    /// Aliases repeated within the same entity (or equal to the canonical
    /// name) are dropped so the same text is not counted twice.
    ///
    /// # Errors
    /// - [`LociError::DuplicateEntity`] if `canonical` is already registered.
    /// - [`LociError::EmptySurfaceForm`] if `canonical` or any alias is empty.
    pub fn register<S: AsRef<str>>(&mut self, canonical: &str, aliases: &[S]) -> Result<()> {
        if self.entities.contains_key(canonical) {
            return Err(LociError::DuplicateEntity(canonical.to_string()));
        }
        if canonical.is_empty() || aliases.iter().any(|a| AsRef::<str>::as_ref(a).is_empty()) {
            return Err(LociError::EmptySurfaceForm {
                entity: canonical.to_string(),
            });
        }

        let mut forms = Vec::with_capacity(aliases.len() + 1);
        forms.push(canonical.to_string());
        for alias in aliases {
            let alias: &str = alias.as_ref();
            if forms.iter().any(|f| f == alias) {
                warn!(entity = canonical, alias, "Ignoring repeated surface form");
                continue;
            }
            forms.push(alias.to_string());
        }

        self.entities.insert(canonical.to_string(), forms);
        Ok(())
    }

    /// Iterate `(canonical, forms)` in registration order.
    ///
    /// `forms[0]` is always the canonical name itself.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entities
            .iter()
            .map(|(name, forms)| (name.as_str(), forms.as_slice()))
    }

    /// Canonical names in registration order.
    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    /// Surface forms of one entity, canonical first.
    #[must_use]
    pub fn forms(&self, canonical: &str) -> Option<&[String]> {
        self.entities.get(canonical).map(Vec::as_slice)
    }

    /// Whether `canonical` is registered.
    #[must_use]
    pub fn contains(&self, canonical: &str) -> bool {
        self.entities.contains_key(canonical)
    }

    /// Number of registered entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether no entity has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LociConfig;

    #[test]
    fn canonical_form_comes_first() {
        let mut registry = EntityRegistry::new();
        registry.register("南京", &["金陵", "建康"]).expect("register");
        let (name, forms) = registry.iter().next().expect("one entity");
        assert_eq!(name, "南京");
        assert_eq!(forms, ["南京", "金陵", "建康"]);
    }

    #[test]
    fn iteration_follows_registration_order() {
        let mut registry = EntityRegistry::new();
        registry.register("B", &["b"]).expect("register");
        registry.register("A", &["a"]).expect("register");
        registry.register("C", &[] as &[&str]).expect("register");
        let names: Vec<_> = registry.canonical_names().collect();
        assert_eq!(names, ["B", "A", "C"]);
    }

    #[test]
    fn duplicate_canonical_is_rejected() {
        let mut registry = EntityRegistry::new();
        registry.register("A", &["a1"]).expect("first");
        let err = registry.register("A", &["a2"]).expect_err("should fail");
        assert!(matches!(err, LociError::DuplicateEntity(ref name) if name == "A"));
        assert_eq!(registry.forms("A"), Some(["A".to_string(), "a1".to_string()].as_slice()));
    }

    #[test]
    fn empty_forms_are_rejected() {
        let mut registry = EntityRegistry::new();
        assert!(matches!(
            registry.register("", &[] as &[&str]),
            Err(LociError::EmptySurfaceForm { .. })
        ));
        assert!(matches!(
            registry.register("A", &["a", ""]),
            Err(LociError::EmptySurfaceForm { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn repeated_aliases_collapse() {
        let mut registry = EntityRegistry::new();
        registry.register("A", &["a", "A", "a", "b"]).expect("register");
        assert_eq!(
            registry.forms("A"),
            Some(["A".to_string(), "a".to_string(), "b".to_string()].as_slice())
        );
    }

    #[test]
    fn default_config_builds_seven_entities() {
        let registry =
            EntityRegistry::from_config(&LociConfig::default().entities).expect("defaults valid");
        assert_eq!(registry.len(), 7);
        assert!(registry.contains("揚州"));
        assert_eq!(
            registry.forms("揚州").map(<[String]>::len),
            Some(3)
        );
    }

    #[test]
    fn from_config_surfaces_duplicates() {
        let entities = vec![EntityConfig::new("A", &[]), EntityConfig::new("A", &["x"])];
        assert!(matches!(
            EntityRegistry::from_config(&entities),
            Err(LociError::DuplicateEntity(_))
        ));
    }
}
