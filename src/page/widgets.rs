use std::collections::{BTreeMap, BTreeSet};

/// Decorative widgets enabled on flagged elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WidgetKind {
    Popover,
    Confirmation,
}

impl WidgetKind {
    pub fn toggle_value(&self) -> &'static str {
        match self {
            Self::Popover => "popover",
            Self::Confirmation => "confirmation",
        }
    }
}

/// Which elements currently have a widget enabled, and how many enablement
/// passes each kind has seen.
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    enabled: BTreeMap<WidgetKind, BTreeSet<String>>,
    passes: BTreeMap<WidgetKind, u32>,
}

impl WidgetRegistry {
    /// Record an enablement pass. Enabling an already-enabled element is a no-op
    /// for that element; returns how many elements were newly enabled.
    pub fn enable<I>(&mut self, kind: WidgetKind, ids: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        *self.passes.entry(kind).or_default() += 1;
        let set = self.enabled.entry(kind).or_default();
        ids.into_iter().filter(|id| set.insert(id.clone())).count()
    }

    pub fn is_enabled(&self, kind: WidgetKind, id: &str) -> bool {
        self.enabled.get(&kind).is_some_and(|s| s.contains(id))
    }

    pub fn enabled(&self, kind: WidgetKind) -> Vec<&str> {
        self.enabled
            .get(&kind)
            .map(|s| s.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn passes(&self, kind: WidgetKind) -> u32 {
        self.passes.get(&kind).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_pass_only_counts_new_elements() {
        let mut reg = WidgetRegistry::default();
        assert_eq!(reg.enable(WidgetKind::Confirmation, vec!["a".to_string()]), 1);
        assert_eq!(reg.enable(WidgetKind::Confirmation, vec!["a".to_string(), "b".to_string()]), 1);
        assert_eq!(reg.passes(WidgetKind::Confirmation), 2);
        assert_eq!(reg.enabled(WidgetKind::Confirmation), vec!["a", "b"]);
        assert_eq!(reg.passes(WidgetKind::Popover), 0);
    }
}
