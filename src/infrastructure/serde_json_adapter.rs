use crate::domain::error::SccError;
use crate::domain::graph::Graph;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::fs;

/// On-disk graph: `{"max_vertex": 8, "edges": [[0, 1], [1, 2]]}`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GraphFileDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_vertex: Option<i64>,

    #[serde(default)]
    pub edges: Vec<(i64, i64)>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl GraphFileDto {
    /// Explicit bound if present, otherwise the largest edge endpoint.
    pub fn resolve_max_vertex(&self) -> Result<i64, SccError> {
        if let Some(v) = self.max_vertex {
            return Ok(v);
        }
        self.edges
            .iter()
            .map(|&(u, v)| u.max(v))
            .max()
            .ok_or_else(|| {
                SccError::InvalidInput("no edges and no max_vertex given".to_string())
            })
    }

    pub fn to_graph(&self) -> Result<Graph, SccError> {
        Graph::build(self.resolve_max_vertex()?, &self.edges)
    }
}

pub async fn read_graph_file(path: &str) -> Result<GraphFileDto> {
    let raw = fs::read_to_string(path).await?;
    let dto: GraphFileDto = serde_json::from_str(&raw)?;
    Ok(dto)
}

pub async fn write_graph_file(path: &str, dto: &GraphFileDto) -> Result<()> {
    let pretty = serde_json::to_string_pretty(dto)?;
    fs::write(path, pretty).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn read_write_round_trip_preserves_edges_and_extra() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("graph.json");

        let dto = GraphFileDto {
            max_vertex: Some(3),
            edges: vec![(0, 1), (1, 0), (0, 1)],
            extra: BTreeMap::from([("name".to_string(), Value::String("demo".to_string()))]),
        };

        write_graph_file(path.to_str().unwrap(), &dto)
            .await
            .expect("write");
        let reread = read_graph_file(path.to_str().unwrap())
            .await
            .expect("read");

        assert_eq!(reread, dto);
    }

    #[tokio::test]
    async fn read_accepts_plain_edge_arrays() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("graph.json");
        std::fs::write(&path, r#"{"edges": [[0, 1], [1, 2], [2, 0]]}"#).expect("write");

        let dto = read_graph_file(path.to_str().unwrap())
            .await
            .expect("read");
        assert_eq!(dto.max_vertex, None);
        assert_eq!(dto.resolve_max_vertex(), Ok(2));

        let g = dto.to_graph().expect("graph");
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn resolve_max_vertex_requires_edges_or_bound() {
        let dto = GraphFileDto::default();
        assert!(matches!(
            dto.resolve_max_vertex(),
            Err(SccError::InvalidInput(_))
        ));

        let dto = GraphFileDto {
            max_vertex: Some(4),
            ..GraphFileDto::default()
        };
        assert_eq!(dto.to_graph().expect("graph").node_count(), 5);
    }

    #[test]
    fn to_graph_surfaces_invalid_vertex() {
        let dto = GraphFileDto {
            max_vertex: Some(2),
            edges: vec![(0, 5)],
            ..GraphFileDto::default()
        };
        assert!(matches!(
            dto.to_graph(),
            Err(SccError::InvalidVertex { vertex: 5, .. })
        ));
    }
}
