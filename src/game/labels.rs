//! The ordered six-label category set and its rename-only customization.

use std::collections::BTreeMap;

/// Number of categories is fixed; customization renames, never resizes.
pub const LABEL_COUNT: usize = 6;

pub const DEFAULT_LABELS: [&str; LABEL_COUNT] = [
    "Friends",
    "Lovers",
    "Affectionate",
    "Marriage",
    "Enemy",
    "Sibling",
];

/// Rejections raised while renaming categories. The label set is left
/// untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CustomizationError {
    #[error("categories cannot be empty")]
    EmptyLabel,
    #[error("category '{0}' must contain only letters and spaces")]
    InvalidLabelCharacters(String),
    #[error("category '{0}' must be unique")]
    DuplicateLabel(String),
    #[error("'{0}' is not a current category")]
    UnknownLabel(String),
}

/// Ordered collection of exactly six distinct category labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl Default for LabelSet {
    fn default() -> Self {
        Self {
            labels: DEFAULT_LABELS.iter().map(|label| label.to_string()).collect(),
        }
    }
}

impl LabelSet {
    /// Current labels in cyclic elimination order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|current| current == label)
    }

    /// Apply a batch of old-name to new-name renames atomically.
    ///
    /// Every rename is validated against the fully renamed set before
    /// anything mutates, so a rejected batch leaves the set exactly as it
    /// was. Returns the `(old, new)` pairs that actually changed so the
    /// caller can re-key any state indexed by label.
    pub fn rename(
        &mut self,
        renames: &BTreeMap<String, String>,
    ) -> Result<Vec<(String, String)>, CustomizationError> {
        let mut next = self.labels.clone();

        for (old, new) in renames {
            let position = self
                .labels
                .iter()
                .position(|label| label == old)
                .ok_or_else(|| CustomizationError::UnknownLabel(old.clone()))?;

            let new = new.trim();
            if new.is_empty() {
                return Err(CustomizationError::EmptyLabel);
            }
            if !new.chars().all(|c| c.is_alphabetic() || c == ' ') {
                return Err(CustomizationError::InvalidLabelCharacters(new.to_string()));
            }

            next[position] = new.to_string();
        }

        for (position, label) in next.iter().enumerate() {
            if next[..position].contains(label) {
                return Err(CustomizationError::DuplicateLabel(label.clone()));
            }
        }

        let applied = self
            .labels
            .iter()
            .zip(&next)
            .filter(|(old, new)| old != new)
            .map(|(old, new)| (old.clone(), new.clone()))
            .collect();

        self.labels = next;
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renames(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(old, new)| (old.to_string(), new.to_string()))
            .collect()
    }

    #[test]
    fn default_set_carries_the_six_flames_categories() {
        let set = LabelSet::default();
        assert_eq!(set.labels().len(), LABEL_COUNT);
        assert_eq!(set.labels()[0], "Friends");
        assert_eq!(set.labels()[5], "Sibling");
    }

    #[test]
    fn rename_replaces_text_in_place() {
        let mut set = LabelSet::default();
        let applied = set
            .rename(&renames(&[("Enemy", "Rivals")]))
            .expect("rename accepted");
        assert_eq!(applied, vec![("Enemy".to_string(), "Rivals".to_string())]);
        assert_eq!(set.labels()[4], "Rivals");
        assert_eq!(set.labels().len(), LABEL_COUNT);
    }

    #[test]
    fn swapping_two_labels_is_allowed() {
        let mut set = LabelSet::default();
        set.rename(&renames(&[("Friends", "Lovers"), ("Lovers", "Friends")]))
            .expect("swap accepted");
        assert_eq!(set.labels()[0], "Lovers");
        assert_eq!(set.labels()[1], "Friends");
    }

    #[test]
    fn rejects_empty_and_invalid_labels() {
        let mut set = LabelSet::default();
        assert_eq!(
            set.rename(&renames(&[("Enemy", "  ")])),
            Err(CustomizationError::EmptyLabel)
        );
        assert_eq!(
            set.rename(&renames(&[("Enemy", "Best Friends 4ever")])),
            Err(CustomizationError::InvalidLabelCharacters(
                "Best Friends 4ever".to_string()
            ))
        );
        assert_eq!(set.labels()[4], "Enemy", "failed rename must not mutate");
    }

    #[test]
    fn rejects_duplicate_results() {
        let mut set = LabelSet::default();
        assert_eq!(
            set.rename(&renames(&[("Enemy", "Friends")])),
            Err(CustomizationError::DuplicateLabel("Friends".to_string()))
        );
        assert_eq!(set, LabelSet::default());
    }

    #[test]
    fn rejects_unknown_old_labels() {
        let mut set = LabelSet::default();
        assert_eq!(
            set.rename(&renames(&[("Nemesis", "Rivals")])),
            Err(CustomizationError::UnknownLabel("Nemesis".to_string()))
        );
    }
}
