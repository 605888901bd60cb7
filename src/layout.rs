use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::aggregate::{Stats, aggregate};
use crate::color::ColorScale;
use crate::data::PackageRecord;
use crate::hierarchy::{self, Node};
use crate::pack::{Circle, PackConfig, pack};

/// Tunables for one layout pass. Explicit configuration rather than process
/// globals, so the same pipeline serves different canvases and exclusion
/// policies without reinitialization.
#[derive(Clone, Debug)]
pub struct LayoutConfig {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub min_radius: f64,
    /// Keywords stripped from every record before grouping.
    pub excluded: HashSet<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 500.0,
            padding: 3.0,
            min_radius: 5.0,
            excluded: ["gatsby", "gatsby-plugin"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Finalized geometry snapshot handed to the renderer. Coordinates are
/// centered on the origin; keyword circles in absolute canvas space, package
/// circles likewise (already translated into their parent).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub enclosing: Circle,
    pub keywords: Vec<KeywordCircle>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordCircle {
    pub key: String,
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub fill: String,
    pub stats: Stats,
    pub co_keyword_counts: BTreeMap<String, usize>,
    pub packages: Vec<PackageCircle>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageCircle {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub downloads: Option<f64>,
}

impl Layout {
    /// All terminal package circles, flat, in packing order.
    pub fn leaves(&self) -> impl Iterator<Item = &PackageCircle> {
        self.keywords.iter().flat_map(|group| group.packages.iter())
    }
}

/// Runs the whole pipeline: group records by keyword, build the two-level
/// hierarchy, pack keyword circles against the canvas, then pack each
/// keyword's packages against that keyword's own diameter.
pub fn compute_layout(records: &[PackageRecord], config: &LayoutConfig) -> Layout {
    let groups = aggregate(records, &config.excluded);
    let root = hierarchy::build(&groups);

    let keyword_weights = root
        .children()
        .iter()
        .map(Node::weight)
        .collect::<Vec<_>>();
    let packed = pack(
        &keyword_weights,
        &PackConfig {
            width: config.width,
            height: config.height,
            padding: config.padding,
            min_radius: config.min_radius,
        },
    );

    let domain_max = groups
        .values()
        .map(|group| group.stats.total_plugins)
        .max()
        .unwrap_or(0) as f64;
    let scale = ColorScale::default();

    let keywords = groups
        .values()
        .zip(root.children())
        .zip(&packed.circles)
        .map(|((group, node), circle)| {
            let fill = scale
                .color_for(group.stats.total_plugins as f64, domain_max)
                .to_hex();

            let leaf_weights = node
                .children()
                .iter()
                .map(Node::weight)
                .collect::<Vec<_>>();
            let inner = pack(
                &leaf_weights,
                &PackConfig {
                    width: circle.r * 2.0,
                    height: circle.r * 2.0,
                    padding: config.padding,
                    min_radius: config.min_radius,
                },
            );

            let packages = group
                .members
                .iter()
                .zip(&inner.circles)
                .map(|(member, leaf)| PackageCircle {
                    name: member.name.clone(),
                    x: circle.x + leaf.x,
                    y: circle.y + leaf.y,
                    r: leaf.r,
                    downloads: member.downloads,
                })
                .collect();

            KeywordCircle {
                key: group.key.clone(),
                x: circle.x,
                y: circle.y,
                r: circle.r,
                fill,
                stats: group.stats,
                co_keyword_counts: group.co_keyword_counts.clone(),
                packages,
            }
        })
        .collect();

    Layout {
        width: config.width,
        height: config.height,
        enclosing: packed.enclosing,
        keywords,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, keywords: &[&str], downloads: Option<f64>) -> PackageRecord {
        PackageRecord {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            downloads,
        }
    }

    fn sample_records() -> Vec<PackageRecord> {
        vec![
            record("alpha", &["images", "gatsby"], Some(1200.0)),
            record("beta", &["images", "seo"], Some(300.0)),
            record("gamma", &["seo"], Some(900.0)),
            record("delta", &["images"], None),
            record("epsilon", &["offline", "gatsby-plugin"], Some(50.0)),
        ]
    }

    #[test]
    fn builds_one_circle_per_group_and_member() {
        let layout = compute_layout(&sample_records(), &LayoutConfig::default());

        let keys = layout
            .keywords
            .iter()
            .map(|k| k.key.as_str())
            .collect::<Vec<_>>();
        assert_eq!(keys, vec!["images", "offline", "seo"]);

        let images = &layout.keywords[0];
        assert_eq!(images.packages.len(), 3);
        assert_eq!(images.stats.total_plugins, 3);
        assert_eq!(images.stats.total_downloads, 1500.0);

        assert_eq!(layout.leaves().count(), 6);
    }

    #[test]
    fn packages_stay_inside_their_keyword_circle() {
        let layout = compute_layout(&sample_records(), &LayoutConfig::default());

        for keyword in &layout.keywords {
            for package in &keyword.packages {
                let dist =
                    ((package.x - keyword.x).powi(2) + (package.y - keyword.y).powi(2)).sqrt();
                assert!(
                    dist + package.r <= keyword.r + 1e-6,
                    "package {} escapes keyword {}",
                    package.name,
                    keyword.key
                );
            }
        }
    }

    #[test]
    fn keyword_circles_do_not_overlap() {
        let layout = compute_layout(&sample_records(), &LayoutConfig::default());

        for i in 0..layout.keywords.len() {
            for j in (i + 1)..layout.keywords.len() {
                let (a, b) = (&layout.keywords[i], &layout.keywords[j]);
                let dist = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
                assert!(dist >= a.r + b.r - 1e-6, "{} overlaps {}", a.key, b.key);
            }
        }
    }

    #[test]
    fn darker_fill_for_larger_groups() {
        let layout = compute_layout(&sample_records(), &LayoutConfig::default());

        let images = &layout.keywords[0];
        let offline = &layout.keywords[1];
        assert!(images.stats.total_plugins > offline.stats.total_plugins);
        assert_ne!(images.fill, offline.fill);
        // The largest group sits at the dark endpoint of the scale.
        assert_eq!(images.fill, "#08306b");
    }

    #[test]
    fn weightless_member_still_gets_a_visible_circle() {
        let records = vec![record("ghost", &["spooky"], None)];
        let layout = compute_layout(&records, &LayoutConfig::default());

        let group = &layout.keywords[0];
        assert_eq!(group.stats.total_downloads, 0.0);
        let package = &group.packages[0];
        assert!(package.r >= 5.0 - 1e-9);
    }

    #[test]
    fn excluded_only_records_disappear() {
        let records = vec![record("plain", &["gatsby"], Some(10.0))];
        let layout = compute_layout(&records, &LayoutConfig::default());
        assert!(layout.keywords.is_empty());
        assert_eq!(layout.leaves().count(), 0);
    }

    #[test]
    fn identical_input_reproduces_identical_layout() {
        let records = sample_records();
        let config = LayoutConfig::default();
        let first = serde_json::to_string(&compute_layout(&records, &config)).unwrap();
        let second = serde_json::to_string(&compute_layout(&records, &config)).unwrap();
        assert_eq!(first, second);
    }
}
