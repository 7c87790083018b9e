//! 顶点定义
//!
//! 顶点携带邻接表以及遍历算法写入的临时状态

use crate::graph::edge::Edge;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 顶点 ID（图内唯一）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub u64);

impl VertexId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VertexId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 未到达顶点的距离标记
pub const UNREACHED: i64 = -1;

/// 顶点
#[derive(Debug, Clone)]
pub struct Vertex {
    /// 顶点 ID
    id: VertexId,
    /// 名称（如城市名）
    name: Option<String>,
    /// 出边（邻接表）
    edges: Vec<Edge>,
    /// DFS / Prim 的访问标记
    visited: bool,
    /// BFS 跳数，-1 表示未到达
    distance: i64,
    /// 父顶点在所属图中的下标
    parent: Option<usize>,
}

impl Vertex {
    /// 创建新顶点
    pub fn new(id: VertexId, name: Option<String>) -> Self {
        Self {
            id,
            name,
            edges: Vec::new(),
            visited: false,
            distance: UNREACHED,
            parent: None,
        }
    }

    /// 获取顶点 ID
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// 获取名称
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// 设置名称
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// 用于输出的标签：有名称用名称，否则用 ID
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.id.to_string(),
        }
    }

    /// 获取出边
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub(crate) fn edges_mut(&mut self) -> &mut [Edge] {
        &mut self.edges
    }

    pub(crate) fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// 出度
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub(crate) fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    /// BFS 距离，-1 表示未到达
    pub fn distance(&self) -> i64 {
        self.distance
    }

    pub(crate) fn set_distance(&mut self, distance: i64) {
        self.distance = distance;
    }

    /// 父顶点下标
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<usize>) {
        self.parent = parent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_defaults() {
        let v = Vertex::new(VertexId::new(4205407), Some("Florianópolis".to_string()));

        assert_eq!(v.id().as_u64(), 4205407);
        assert_eq!(v.name(), Some("Florianópolis"));
        assert!(!v.is_visited());
        assert_eq!(v.distance(), UNREACHED);
        assert!(v.parent().is_none());
        assert_eq!(v.degree(), 0);
    }

    #[test]
    fn test_vertex_label_falls_back_to_id() {
        let mut v = Vertex::new(VertexId::new(7), None);
        assert_eq!(v.label(), "7");

        v.set_name("Joinville");
        assert_eq!(v.label(), "Joinville");
    }
}
