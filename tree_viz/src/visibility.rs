// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// What the renderer does with a node and its subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// No lines at all. Siblings are connected as if the node did not exist.
    Hidden,
    /// The node and its subtree, in full.
    #[default]
    Shown,
    /// One line, `name: …`, without descending.
    Collapsed,
}

/// What a visibility filter gets to see of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeInfo<'a> {
    pub name: &'a str,
    pub from: usize,
    pub to: usize,
}

/// Decides a node's [`Visibility`]. Called at most once per node and render.
pub type VisibilityFilter<'a> = &'a dyn Fn(&NodeInfo<'_>) -> Visibility;

/// The default filter.
#[must_use]
pub fn show_all(_node: &NodeInfo<'_>) -> Visibility { Visibility::Shown }

/// Decides visibility by node name. Hiding wins when a name is in both lists.
///
/// ```rust
/// use r3bl_tree_viz::{NameFilter, NodeInfo, Visibility};
///
/// let filter = NameFilter::default().hide_names(["Comment"]).collapse_names(["Body"]);
/// let node = NodeInfo { name: "Body", from: 0, to: 4 };
/// assert_eq!(filter.decide(&node), Visibility::Collapsed);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilter {
    pub hidden: Vec<String>,
    pub collapsed: Vec<String>,
}

impl NameFilter {
    #[must_use]
    pub fn hide_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hidden.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn collapse_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collapsed.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn decide(&self, node: &NodeInfo<'_>) -> Visibility {
        if self.hidden.iter().any(|it| it == node.name) {
            Visibility::Hidden
        } else if self.collapsed.iter().any(|it| it == node.name) {
            Visibility::Collapsed
        } else {
            Visibility::Shown
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case("Comment", Visibility::Hidden)]
    #[test_case("Body", Visibility::Collapsed)]
    #[test_case("Both", Visibility::Hidden)]
    #[test_case("Program", Visibility::Shown)]
    fn name_filter_decides_by_name(name: &str, expected: Visibility) {
        let filter = NameFilter::default()
            .hide_names(["Comment", "Both"])
            .collapse_names(vec!["Body".to_string(), "Both".to_string()]);
        let node = NodeInfo {
            name,
            from: 0,
            to: 0,
        };
        assert_eq!(filter.decide(&node), expected);
    }

    #[test]
    fn show_all_shows_everything() {
        let node = NodeInfo {
            name: "anything",
            from: 1,
            to: 2,
        };
        assert_eq!(show_all(&node), Visibility::Shown);
        assert_eq!(Visibility::default(), Visibility::Shown);
    }
}
