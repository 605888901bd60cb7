use std::collections::BTreeMap;

use crate::aggregate::{KeywordGroup, weight_or_zero};

/// Two-level weighted tree consumed by the packer: root, one keyword node
/// per group, one package leaf per group member.
#[derive(Clone, Debug)]
pub enum Node {
    Root { children: Vec<Node> },
    Keyword { key: String, children: Vec<Node> },
    Package { name: String, downloads: Option<f64> },
}

impl Node {
    /// Weight is derived on demand, bottom-up, so leaf weights can never go
    /// stale in an aggregate.
    pub fn weight(&self) -> f64 {
        match self {
            Self::Root { children } | Self::Keyword { children, .. } => {
                children.iter().map(Node::weight).sum()
            }
            Self::Package { downloads, .. } => weight_or_zero(*downloads),
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Self::Root { children } | Self::Keyword { children, .. } => children,
            Self::Package { .. } => &[],
        }
    }
}

pub fn build(groups: &BTreeMap<String, KeywordGroup>) -> Node {
    let children = groups
        .values()
        .map(|group| Node::Keyword {
            key: group.key.clone(),
            children: group
                .members
                .iter()
                .map(|member| Node::Package {
                    name: member.name.clone(),
                    downloads: member.downloads,
                })
                .collect(),
        })
        .collect();

    Node::Root { children }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::aggregate::aggregate;
    use crate::data::PackageRecord;

    use super::*;

    fn record(name: &str, keywords: &[&str], downloads: Option<f64>) -> PackageRecord {
        PackageRecord {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            downloads,
        }
    }

    #[test]
    fn keyword_weight_is_sum_of_leaves() {
        let records = vec![
            record("a", &["x"], Some(10.0)),
            record("b", &["x", "y"], Some(20.0)),
        ];
        let groups = aggregate(&records, &HashSet::new());
        let root = build(&groups);

        assert_eq!(root.children().len(), 2);
        let x = &root.children()[0];
        assert_eq!(x.weight(), 30.0);
        assert_eq!(root.weight(), 50.0);
    }

    #[test]
    fn missing_downloads_weigh_nothing() {
        let records = vec![record("a", &["x"], None)];
        let groups = aggregate(&records, &HashSet::new());
        let root = build(&groups);

        let x = &root.children()[0];
        assert_eq!(x.children().len(), 1);
        assert_eq!(x.weight(), 0.0);
    }

    #[test]
    fn single_member_group_still_nests() {
        let records = vec![record("a", &["solo"], Some(7.0))];
        let groups = aggregate(&records, &HashSet::new());
        let root = build(&groups);

        let solo = &root.children()[0];
        assert_eq!(solo.children().len(), 1);
        assert_eq!(solo.children()[0].weight(), 7.0);
    }
}
