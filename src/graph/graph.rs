//! 图数据结构
//!
//! 顶点按插入顺序保存在稠密集合中，边与父指针都通过下标引用顶点

use super::edge::Edge;
use super::vertex::{Vertex, VertexId, UNREACHED};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use tracing::debug;

/// 带权无向图
#[derive(Debug, Clone)]
pub struct Graph {
    /// 图 ID
    id: u64,
    /// 顶点集合（插入顺序即发现顺序）
    vertices: IndexMap<VertexId, Vertex>,
}

impl Graph {
    /// 创建空图
    pub fn new(id: u64) -> Self {
        Self {
            id,
            vertices: IndexMap::new(),
        }
    }

    /// 获取图 ID
    pub fn id(&self) -> u64 {
        self.id
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点，ID 重复时返回 `DuplicateVertex`
    pub fn add_vertex(&mut self, id: VertexId, name: Option<String>) -> Result<&mut Vertex> {
        if self.vertices.contains_key(&id) {
            return Err(Error::DuplicateVertex(id));
        }

        debug!(graph = self.id, vertex = %id, name = ?name, "add vertex");

        let entry = self.vertices.entry(id).or_insert(Vertex::new(id, name));
        Ok(entry)
    }

    /// 按 ID 查找顶点
    pub fn find_vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// 按 ID 查找顶点（可变）
    pub fn find_vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertices.get_mut(&id)
    }

    /// 顶点 ID 对应的稠密下标
    pub fn index_of(&self, id: VertexId) -> Option<usize> {
        self.vertices.get_index_of(&id)
    }

    /// 按下标获取顶点
    pub fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get_index(index).map(|(_, v)| v)
    }

    /// 按插入顺序遍历顶点
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    pub(crate) fn at(&self, index: usize) -> &Vertex {
        &self.vertices[index]
    }

    pub(crate) fn at_mut(&mut self, index: usize) -> &mut Vertex {
        &mut self.vertices[index]
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 父顶点的 ID（由遍历或生成树算法写入）
    pub fn parent_of(&self, id: VertexId) -> Option<VertexId> {
        let parent = self.find_vertex(id)?.parent()?;
        self.vertex(parent).map(Vertex::id)
    }

    // ==================== 边操作 ====================

    /// 连接两个顶点，插入一对互逆的边
    pub fn connect(&mut self, u: VertexId, v: VertexId, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight(weight));
        }

        let ui = self.index_of(u).ok_or(Error::VertexNotFound(u))?;
        let vi = self.index_of(v).ok_or(Error::VertexNotFound(v))?;

        self.at_mut(ui).push_edge(Edge::new(vi, weight));
        self.at_mut(vi).push_edge(Edge::new(ui, weight));

        debug!(graph = self.id, %u, %v, weight, "connect");
        Ok(())
    }

    /// 按顺序为顶点添加多条邻接边：`(目标 ID, 权重)`
    pub fn add_adjacent(&mut self, u: VertexId, adjacent: &[(VertexId, f64)]) -> Result<()> {
        if self.index_of(u).is_none() {
            return Err(Error::VertexNotFound(u));
        }
        for &(v, weight) in adjacent {
            self.connect(u, v, weight)?;
        }
        Ok(())
    }

    /// 插入单向边，仅供生成树构造使用
    pub(crate) fn add_arc(&mut self, from: usize, to: usize, weight: f64) {
        self.at_mut(from).push_edge(Edge::new(to, weight));
    }

    /// 两个顶点之间是否已有边 u -> v
    pub fn is_adjacent(&self, u: VertexId, v: VertexId) -> bool {
        match (self.find_vertex(u), self.index_of(v)) {
            (Some(vertex), Some(vi)) => vertex.edges().iter().any(|e| e.target() == vi),
            _ => false,
        }
    }

    /// 获取有向边记录数量（无向连接计两条）
    pub fn edge_count(&self) -> usize {
        self.vertices.values().map(Vertex::degree).sum()
    }

    /// 所有有向边记录的权重之和
    pub fn total_weight(&self) -> f64 {
        self.vertices
            .values()
            .flat_map(|v| v.edges().iter().map(Edge::weight))
            .sum()
    }

    // ==================== 遍历状态 ====================

    /// 清除 BFS 写入的距离与父指针
    pub(crate) fn reset_distances(&mut self) {
        for v in self.vertices.values_mut() {
            v.set_parent(None);
            v.set_distance(UNREACHED);
        }
    }

    /// 清除访问标记
    pub(crate) fn reset_visited(&mut self) {
        for v in self.vertices.values_mut() {
            v.set_visited(false);
        }
    }
}
