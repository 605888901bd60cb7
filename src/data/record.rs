use serde::Deserialize;

/// A single package as supplied by the upstream registry feed. Immutable
/// input; the pipeline never writes back into it.
#[derive(Clone, Debug, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, alias = "downloadsLast30Days")]
    pub downloads: Option<f64>,
}
