use std::collections::{BTreeMap, HashSet};

use crate::data::PackageRecord;

use super::stats::{Stats, Weighted};

/// One membership of a package in a keyword group. Each group owns an
/// independent annotated copy of the record, so a package appearing under
/// several keywords never shares mutable state across groups.
#[derive(Clone, Debug)]
pub struct GroupMember {
    pub name: String,
    pub downloads: Option<f64>,
    /// The record's full keyword list after exclusion filtering, in the
    /// record's original order.
    pub keywords: Vec<String>,
}

impl Weighted for GroupMember {
    fn weight(&self) -> Option<f64> {
        self.downloads
    }
}

#[derive(Clone, Debug)]
pub struct KeywordGroup {
    pub key: String,
    pub members: Vec<GroupMember>,
    pub stats: Stats,
    pub co_keyword_counts: BTreeMap<String, usize>,
}

/// Distributes records into keyword groups. A record with N surviving
/// keywords lands in N groups; a record with none after filtering produces
/// no group at all, so every group's member list is non-empty.
pub fn aggregate(
    records: &[PackageRecord],
    excluded: &HashSet<String>,
) -> BTreeMap<String, KeywordGroup> {
    let mut groups: BTreeMap<String, KeywordGroup> = BTreeMap::new();

    for record in records {
        let mut seen = HashSet::new();
        let filtered = record
            .keywords
            .iter()
            .filter(|keyword| !excluded.contains(*keyword) && seen.insert(keyword.as_str()))
            .cloned()
            .collect::<Vec<_>>();

        for keyword in &filtered {
            groups
                .entry(keyword.clone())
                .or_insert_with(|| KeywordGroup {
                    key: keyword.clone(),
                    members: Vec::new(),
                    stats: Stats::default(),
                    co_keyword_counts: BTreeMap::new(),
                })
                .members
                .push(GroupMember {
                    name: record.name.clone(),
                    downloads: record.downloads,
                    keywords: filtered.clone(),
                });
        }
    }

    for group in groups.values_mut() {
        group.stats = Stats::compute(&group.members);

        for member in &group.members {
            for keyword in &member.keywords {
                *group.co_keyword_counts.entry(keyword.clone()).or_default() += 1;
            }
        }
    }

    groups
}
