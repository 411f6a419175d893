//! Category and comment marker tokens
//!
//! Categories carry payer and personal-expense tags as whole tokens joined by
//! a separator, e.g. `Personal_Food_A`. Comments carry a directive on their
//! first line.

use serde::{Deserialize, Serialize};

use super::payment::CommentDirective;

/// The recognized marker tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerSet {
    /// Separator between category tokens
    #[serde(default = "default_separator")]
    pub separator: char,

    /// Token marking a personal (non-shared) expense
    #[serde(default = "default_self_marker")]
    pub self_marker: String,

    /// Token marking party A as payer
    #[serde(default = "default_party_a_marker")]
    pub party_a_marker: String,

    /// Token marking party B as payer
    #[serde(default = "default_party_b_marker")]
    pub party_b_marker: String,

    /// Comment first line excluding an expense from the owed split
    #[serde(default = "default_deferred_sentinel")]
    pub deferred_sentinel: String,

    /// Comment first line marking an expense paid with an employee ID
    #[serde(default = "default_paid_by_id_sentinel")]
    pub paid_by_id_sentinel: String,
}

fn default_separator() -> char {
    '_'
}

fn default_self_marker() -> String {
    "Personal".to_string()
}

fn default_party_a_marker() -> String {
    "A".to_string()
}

fn default_party_b_marker() -> String {
    "B".to_string()
}

fn default_deferred_sentinel() -> String {
    "dp".to_string()
}

fn default_paid_by_id_sentinel() -> String {
    "id".to_string()
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            self_marker: default_self_marker(),
            party_a_marker: default_party_a_marker(),
            party_b_marker: default_party_b_marker(),
            deferred_sentinel: default_deferred_sentinel(),
            paid_by_id_sentinel: default_paid_by_id_sentinel(),
        }
    }
}

/// Marker tokens found in a category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTags {
    pub is_self: bool,
    pub party_a: bool,
    pub party_b: bool,
    /// Category with every marker token removed
    pub normalized: String,
}

impl MarkerSet {
    /// Split a category into tokens and pull out the markers
    pub fn tag_category(&self, category: &str) -> CategoryTags {
        let mut tags = CategoryTags::default();
        let mut rest: Vec<&str> = Vec::new();

        for token in category.trim().split(self.separator) {
            if token == self.self_marker {
                tags.is_self = true;
            } else if token == self.party_a_marker {
                tags.party_a = true;
            } else if token == self.party_b_marker {
                tags.party_b = true;
            } else {
                rest.push(token);
            }
        }

        tags.normalized = rest.join(&self.separator.to_string());
        tags
    }

    /// Read the directive from the trimmed first line of a comment
    pub fn comment_directive(&self, comment: &str) -> CommentDirective {
        let first_line = comment.trim().lines().next().unwrap_or("").trim();
        if first_line.is_empty() {
            CommentDirective::None
        } else if first_line == self.deferred_sentinel {
            CommentDirective::Deferred
        } else if first_line == self.paid_by_id_sentinel {
            CommentDirective::PaidById
        } else {
            CommentDirective::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_category_strips_all_markers() {
        let markers = MarkerSet::default();

        let tags = markers.tag_category("Personal_Food_A");
        assert!(tags.is_self && tags.party_a && !tags.party_b);
        assert_eq!(tags.normalized, "Food");

        let tags = markers.tag_category("A_Food_B");
        assert!(tags.party_a && tags.party_b);
        assert_eq!(tags.normalized, "Food");
    }

    #[test]
    fn test_tag_category_whole_tokens_only() {
        let markers = MarkerSet::default();

        // "BBQ" and "Personality" contain marker substrings but are not markers
        let tags = markers.tag_category("BBQ_Personality");
        assert!(!tags.is_self && !tags.party_a && !tags.party_b);
        assert_eq!(tags.normalized, "BBQ_Personality");

        let tags = markers.tag_category("Eating_Out_B");
        assert_eq!(tags.normalized, "Eating_Out");
    }

    #[test]
    fn test_tag_category_without_markers() {
        let tags = MarkerSet::default().tag_category("Food");
        assert_eq!(tags, CategoryTags {
            normalized: "Food".into(),
            ..Default::default()
        });
    }

    #[test]
    fn test_custom_markers() {
        let markers = MarkerSet {
            self_marker: "個人".into(),
            party_a_marker: "alpha".into(),
            party_b_marker: "beta".into(),
            ..Default::default()
        };
        let tags = markers.tag_category("個人_食費_beta");
        assert!(tags.is_self && tags.party_b);
        assert_eq!(tags.normalized, "食費");
    }

    #[test]
    fn test_comment_directive() {
        let markers = MarkerSet::default();
        assert_eq!(markers.comment_directive(""), CommentDirective::None);
        assert_eq!(markers.comment_directive("dp"), CommentDirective::Deferred);
        assert_eq!(
            markers.comment_directive("  dp  \nsettled in cash"),
            CommentDirective::Deferred
        );
        assert_eq!(markers.comment_directive("id"), CommentDirective::PaidById);
        assert_eq!(markers.comment_directive("note\ndp"), CommentDirective::None);
        assert_eq!(markers.comment_directive("dpx"), CommentDirective::None);
    }

    #[test]
    fn test_serde_defaults() {
        let markers: MarkerSet = serde_json::from_str("{\"party_a_marker\":\"alpha\"}").unwrap();
        assert_eq!(markers.party_a_marker, "alpha");
        assert_eq!(markers.party_b_marker, "B");
        assert_eq!(markers.separator, '_');
    }
}
