use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

use super::record::PackageRecord;

#[derive(Debug, Deserialize)]
struct Edge {
    node: PackageRecord,
}

#[derive(Debug, Deserialize)]
struct EdgeList {
    edges: Vec<Edge>,
}

/// Parses the raw registry feed. Accepts either a bare array of records or
/// the npm-API edge list shape (`{"edges":[{"node":{...}}]}`), optionally
/// wrapped under `data.allNpmPackage`.
pub fn parse_records(raw: &str) -> Result<Vec<PackageRecord>> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in package feed")?;

    if parsed.is_array() {
        let records = Vec::<PackageRecord>::deserialize(parsed)
            .context("invalid package record array")?;
        return Ok(records);
    }

    let object = parsed
        .as_object()
        .ok_or_else(|| anyhow!("unexpected JSON type in package feed"))?;

    let edge_list = if let Some(wrapped) = object
        .get("data")
        .and_then(|data| data.get("allNpmPackage"))
    {
        wrapped.clone()
    } else if object.contains_key("edges") {
        parsed.clone()
    } else {
        return Err(anyhow!(
            "could not parse package feed JSON; expected an array or an edge list"
        ));
    };

    let edge_list =
        EdgeList::deserialize(edge_list).context("invalid edge list in package feed")?;
    Ok(edge_list.edges.into_iter().map(|edge| edge.node).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_array() {
        let raw = r#"[{"name":"a","keywords":["x"],"downloads":10.0}]"#;
        let records = parse_records(raw).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "a");
        assert_eq!(records[0].keywords, vec!["x"]);
        assert_eq!(records[0].downloads, Some(10.0));
    }

    #[test]
    fn parses_edge_list() {
        let raw = r#"{"edges":[{"node":{"name":"a","keywords":[]}}]}"#;
        let records = parse_records(raw).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].keywords.is_empty());
        assert_eq!(records[0].downloads, None);
    }

    #[test]
    fn parses_wrapped_query_result() {
        let raw = r#"{"data":{"allNpmPackage":{"edges":[
            {"node":{"name":"a","keywords":["x"],"downloadsLast30Days":42}},
            {"node":{"name":"b","keywords":["y"]}}
        ]}}}"#;
        let records = parse_records(raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].downloads, Some(42.0));
    }

    #[test]
    fn rejects_unknown_shape() {
        assert!(parse_records(r#"{"nodes":[]}"#).is_err());
        assert!(parse_records("17").is_err());
        assert!(parse_records("not json").is_err());
    }
}
