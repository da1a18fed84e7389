//! Item Names

use rustc_hash::FxHashSet;

/// Command keywords used by the register prompt. None of them may name an item.
pub const DEFAULT_RESERVED_NAMES: [&str; 6] =
    ["Remove", "Cart", "Items", "Deals", "Checkout", "Options"];

/// Canonicalize a name: the first letter of each whitespace-delimited token is
/// uppercased and every other letter lowercased. Whitespace is preserved as-is.
pub fn canonicalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut capitalize_next = true;

    for ch in name.chars() {
        if ch.is_whitespace() {
            capitalize_next = true;
            out.push(ch);
        } else if capitalize_next {
            out.extend(ch.to_uppercase());
            capitalize_next = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }

    out
}

/// Set of names that cannot be added to a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedNames {
    names: FxHashSet<String>,
}

impl ReservedNames {
    /// Create a reserved name set from the given names.
    ///
    /// Names are matched exactly, so they should already be canonical.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `name` is reserved.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of reserved names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing is reserved.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ReservedNames {
    fn default() -> Self {
        Self::new(DEFAULT_RESERVED_NAMES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize_capitalizes_each_token() {
        assert_eq!(canonicalize("sWEET potato"), "Sweet Potato");
        assert_eq!(canonicalize("soda"), "Soda");
    }

    #[test]
    fn canonicalize_preserves_whitespace_runs() {
        assert_eq!(canonicalize("  hot  sauce"), "  Hot  Sauce");
    }

    #[test]
    fn canonicalize_leaves_digits_alone() {
        assert_eq!(canonicalize("milk 2l"), "Milk 2l");
    }

    #[test]
    fn default_reserved_names_cover_commands() {
        let reserved = ReservedNames::default();

        for name in DEFAULT_RESERVED_NAMES {
            assert!(reserved.contains(name), "{name} should be reserved");
        }

        assert_eq!(reserved.len(), 6);
        assert!(!reserved.contains("remove"));
    }

    #[test]
    fn custom_names_replace_defaults() {
        let reserved = ReservedNames::new(["Help"]);

        assert!(!reserved.is_empty());
        assert!(reserved.contains("Help"));
        assert!(!reserved.contains("Checkout"));
    }
}
