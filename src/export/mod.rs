//! 图导出模块
//!
//! DOT 文本与 JSON 视图。DOT 导出会写入边的 `exported` 标记：
//! 对称图中每条无向连接只输出一次，生成树的单向边各输出一次。

use crate::algorithm::Coverage;
use crate::error::{Error, Result};
use crate::graph::{Graph, Vertex, VertexId};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// 以 DOT 格式写出图
///
/// 返回输出的连接数量。
pub fn write_dot<W: Write>(graph: &mut Graph, mut out: W) -> Result<usize> {
    let mut written = 0usize;
    writeln!(out, "graph {{")?;

    for u in 0..graph.vertex_count() {
        for slot in 0..graph.at(u).degree() {
            let edge = &graph.at(u).edges()[slot];
            if edge.is_exported() {
                continue;
            }
            let (v, weight) = (edge.target(), edge.weight());

            graph.at_mut(u).edges_mut()[slot].set_exported(true);
            mark_reciprocal(graph, v, u, weight);

            writeln!(
                out,
                "\t{} -- {} [label = {:.6}];",
                quote(graph.at(u)),
                quote(graph.at(v)),
                weight
            )?;
            written += 1;
        }
    }

    writeln!(out, "}}")?;
    out.flush()?;
    Ok(written)
}

/// 标记反向边 v -> u（权重相同且尚未导出的第一条）
fn mark_reciprocal(graph: &mut Graph, v: usize, u: usize, weight: f64) {
    let reciprocal = graph
        .at_mut(v)
        .edges_mut()
        .iter_mut()
        .find(|e| e.target() == u && e.weight() == weight && !e.is_exported());
    if let Some(edge) = reciprocal {
        edge.set_exported(true);
    }
}

fn quote(vertex: &Vertex) -> String {
    format!("\"{}\"", vertex.label().replace('"', "\\\""))
}

/// 将图导出为 DOT 文件
pub fn export_dot<P: AsRef<Path>>(graph: &mut Graph, path: P) -> Result<usize> {
    let file = File::create(path.as_ref())?;
    let written = write_dot(graph, BufWriter::new(file))?;
    info!(path = %path.as_ref().display(), edges = written, "dot exported");
    Ok(written)
}

/// 清除所有导出标记，以便再次导出
pub fn reset_exported(graph: &mut Graph) {
    for u in 0..graph.vertex_count() {
        for edge in graph.at_mut(u).edges_mut() {
            edge.set_exported(false);
        }
    }
}

/// 图的可序列化视图
#[derive(Debug, Clone, Serialize)]
pub struct GraphView {
    pub id: u64,
    pub vertex_count: usize,
    pub total_weight: f64,
    pub vertices: Vec<VertexView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VertexView {
    pub id: VertexId,
    pub name: Option<String>,
    pub edges: Vec<EdgeView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeView {
    pub target: VertexId,
    pub weight: f64,
}

impl GraphView {
    pub fn of(graph: &Graph) -> Self {
        let vertices = graph
            .vertices()
            .map(|v| VertexView {
                id: v.id(),
                name: v.name().map(str::to_owned),
                edges: v
                    .edges()
                    .iter()
                    .map(|e| EdgeView {
                        target: graph.at(e.target()).id(),
                        weight: e.weight(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            id: graph.id(),
            vertex_count: graph.vertex_count(),
            total_weight: graph.total_weight(),
            vertices,
        }
    }
}

/// 生成树及其覆盖情况
#[derive(Debug, Clone, Serialize)]
pub struct TreeReport {
    #[serde(flatten)]
    pub coverage: Coverage,
    pub tree: GraphView,
}

impl TreeReport {
    pub fn of(source: &Graph, tree: &Graph) -> Self {
        Self {
            coverage: Coverage::of(source, tree),
            tree: GraphView::of(tree),
        }
    }
}

/// 以 JSON 输出图
pub fn to_json(graph: &Graph) -> Result<String> {
    render_json(&GraphView::of(graph))
}

/// 以 JSON 输出生成树报告（覆盖情况 + 树）
pub fn tree_json(source: &Graph, tree: &Graph) -> Result<String> {
    render_json(&TreeReport::of(source, tree))
}

fn render_json<T: Serialize>(view: &T) -> Result<String> {
    serde_json::to_string_pretty(view).map_err(|e| Error::SerializationError(e.to_string()))
}
