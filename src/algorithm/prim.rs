//! 最小生成树（Prim 算法）
//!
//! 候选边保存在未排序的槽位数组中：取最小值时线性扫描，取出后只把槽位置空，
//! 不做压缩。同一顶点可能被多条候选边指向，过期的候选在取出时才丢弃。
//! 单次取最小为 O(E)，总体 O(V·E)。

use crate::error::{Error, Result};
use crate::graph::{EdgeRef, Graph, VertexId};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Prim 候选边集合
///
/// 槽位保存的是某张图内的下标，`push_all` 与 `take_lightest` 必须传入同一张图。
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    /// 候选槽位，`None` 表示已取出
    slots: Vec<Option<EdgeRef>>,
    /// 仍有效的候选数量
    live: usize,
}

impl Frontier {
    /// 创建候选集合；每个顶点至多整表压入一次，容量上界为有向边总数
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    /// 追加一条候选边
    pub(crate) fn push(&mut self, edge: EdgeRef) {
        self.slots.push(Some(edge));
        self.live += 1;
    }

    /// 追加顶点的全部出边，不过滤已访问的目标
    pub(crate) fn push_all(&mut self, graph: &Graph, vertex: usize) {
        for slot in 0..graph.at(vertex).degree() {
            self.push(EdgeRef::new(vertex, slot));
        }
    }

    /// 有效候选数量
    pub(crate) fn live(&self) -> usize {
        self.live
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// 已使用的槽位数（含已置空的）
    pub(crate) fn slots_used(&self) -> usize {
        self.slots.len()
    }

    /// 取出权重最小的候选边
    ///
    /// 从左到右扫描，权重相同时保留最先遇到的一条。
    pub(crate) fn take_lightest(&mut self, graph: &Graph) -> Option<EdgeRef> {
        let mut best: Option<(usize, f64)> = None;

        for (index, entry) in self.slots.iter().enumerate() {
            let Some(edge) = entry else { continue };
            let weight = graph.at(edge.source).edges()[edge.slot].weight();
            match best {
                Some((_, lightest)) if weight >= lightest => {}
                _ => best = Some((index, weight)),
            }
        }

        let (index, _) = best?;
        self.live -= 1;
        self.slots[index].take()
    }
}

/// 计算从 `start` 可达部分的最小生成树
///
/// 返回一张新图：顶点 ID 与名称从源图复制，每条被接受的边以父 -> 子的单向边保存，
/// 子顶点的 `parent` 指向树中的父顶点。源图的 `visited` 标记被用作"已入树"标记，
/// 运行前会被清空。起点不可达的顶点不会出现在结果中。
pub fn prim(graph: &mut Graph, start: VertexId) -> Result<Graph> {
    let root = graph.index_of(start).ok_or(Error::VertexNotFound(start))?;

    graph.reset_visited();

    let mut tree = Graph::new(start.as_u64());
    tree_index(&mut tree, graph, root)?;
    graph.at_mut(root).set_visited(true);

    let limit = graph.vertex_count().saturating_sub(1);
    let mut frontier = Frontier::with_capacity(graph.edge_count());
    frontier.push_all(graph, root);

    let mut accepted = 0usize;
    let mut discarded = 0usize;

    while !frontier.is_empty() && accepted < limit {
        let Some(edge) = frontier.take_lightest(graph) else {
            break;
        };

        let link = &graph.at(edge.source).edges()[edge.slot];
        let (child, weight) = (link.target(), link.weight());

        if graph.at(child).is_visited() {
            discarded += 1;
            continue;
        }

        let parent_in_tree = tree_index(&mut tree, graph, edge.source)?;
        let child_in_tree = tree_index(&mut tree, graph, child)?;
        tree.add_arc(parent_in_tree, child_in_tree, weight);
        tree.at_mut(child_in_tree).set_parent(Some(parent_in_tree));

        graph.at_mut(child).set_visited(true);
        frontier.push_all(graph, child);
        accepted += 1;

        debug!(
            from = %graph.at(edge.source).id(),
            to = %graph.at(child).id(),
            weight,
            "accept edge"
        );
    }

    info!(
        graph = graph.id(),
        %start,
        vertices = tree.vertex_count(),
        edges = accepted,
        discarded,
        slots = frontier.slots_used(),
        pending = frontier.live(),
        total_weight = tree.total_weight(),
        "prim done"
    );

    if tree.vertex_count() < graph.vertex_count() {
        warn!(
            reached = tree.vertex_count(),
            total = graph.vertex_count(),
            "spanning tree covers only the component reachable from start"
        );
    }

    Ok(tree)
}

/// 源图顶点在树中的下标，不存在时复制过去
fn tree_index(tree: &mut Graph, graph: &Graph, index: usize) -> Result<usize> {
    let vertex = graph.at(index);
    if let Some(existing) = tree.index_of(vertex.id()) {
        return Ok(existing);
    }
    tree.add_vertex(vertex.id(), vertex.name().map(str::to_owned))?;
    Ok(tree.vertex_count() - 1)
}

/// 生成树对源图的覆盖情况
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "coverage", rename_all = "snake_case")]
pub enum Coverage {
    /// 覆盖全部顶点
    Complete,
    /// 只覆盖起点所在的连通分量
    Partial { reached: usize, total: usize },
}

impl Coverage {
    pub fn of(source: &Graph, tree: &Graph) -> Self {
        let (reached, total) = (tree.vertex_count(), source.vertex_count());
        if reached >= total {
            Coverage::Complete
        } else {
            Coverage::Partial { reached, total }
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Coverage::Complete)
    }

    /// 要求完整覆盖，否则返回 `Disconnected`
    pub fn ensure_complete(self) -> Result<()> {
        match self {
            Coverage::Complete => Ok(()),
            Coverage::Partial { reached, total } => Err(Error::Disconnected { reached, total }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::dfs;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn id(n: u64) -> VertexId {
        VertexId::new(n)
    }

    fn build(vertices: &[u64], edges: &[(u64, u64, f64)]) -> Graph {
        let mut graph = Graph::new(100);
        for &n in vertices {
            graph.add_vertex(id(n), Some(format!("city-{n}"))).unwrap();
        }
        for &(u, v, w) in edges {
            graph.connect(id(u), id(v), w).unwrap();
        }
        graph
    }

    /// Kruskal 求最小生成森林总权重，用于对照
    fn kruskal_weight(n: usize, edges: &[(usize, usize, f64)]) -> f64 {
        fn find(parent: &mut [usize], x: usize) -> usize {
            if parent[x] != x {
                parent[x] = find(parent, parent[x]);
            }
            parent[x]
        }

        let mut sorted = edges.to_vec();
        sorted.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap());
        let mut parent: Vec<usize> = (0..n).collect();
        let mut total = 0.0;
        for (a, b, w) in sorted {
            let (ra, rb) = (find(&mut parent, a), find(&mut parent, b));
            if ra != rb {
                parent[ra] = rb;
                total += w;
            }
        }
        total
    }

    /// 检查结果是一棵以起点为根的树
    fn assert_tree(tree: &mut Graph, root: VertexId) {
        assert_eq!(tree.edge_count(), tree.vertex_count() - 1);

        for v in tree.vertices() {
            let incoming = tree
                .vertices()
                .flat_map(|u| u.edges())
                .filter(|e| tree.vertex(e.target()).unwrap().id() == v.id())
                .count();
            if v.id() == root {
                assert_eq!(incoming, 0);
                assert!(v.parent().is_none());
            } else {
                assert_eq!(incoming, 1, "vertex {} has {} parents", v.id(), incoming);
                assert!(v.parent().is_some());
            }
        }

        dfs(tree, root).unwrap();
        assert!(tree.vertices().all(|v| v.is_visited()));
    }

    #[test]
    fn test_prim_scenario() {
        let mut graph = build(
            &[1, 2, 3, 4],
            &[(1, 2, 5.0), (1, 3, 3.0), (2, 3, 1.0), (3, 4, 2.0)],
        );

        let mut tree = prim(&mut graph, id(1)).unwrap();

        assert_eq!(tree.id(), 1);
        assert_eq!(tree.vertex_count(), 4);
        assert_eq!(tree.edge_count(), 3);
        assert_eq!(tree.total_weight(), 6.0);
        assert_eq!(tree.parent_of(id(3)), Some(id(1)));
        assert_eq!(tree.parent_of(id(2)), Some(id(3)));
        assert_eq!(tree.parent_of(id(4)), Some(id(3)));
        assert_eq!(tree.find_vertex(id(4)).unwrap().name(), Some("city-4"));

        let order: Vec<u64> = tree.vertices().map(|v| v.id().as_u64()).collect();
        assert_eq!(order, vec![1, 3, 2, 4]);

        assert_tree(&mut tree, id(1));
        assert!(Coverage::of(&graph, &tree).is_complete());
    }

    #[test]
    fn test_prim_missing_start() {
        let mut graph = build(&[1, 2], &[(1, 2, 1.0)]);

        let err = prim(&mut graph, id(7)).unwrap_err();
        assert!(matches!(err, Error::VertexNotFound(v) if v == id(7)));
        assert!(graph.vertices().all(|v| !v.is_visited()));
    }

    #[test]
    fn test_prim_tie_break_first_minimum() {
        let mut graph = build(&[1, 2, 3], &[(1, 2, 4.0), (1, 3, 4.0), (2, 3, 1.0)]);

        let tree = prim(&mut graph, id(1)).unwrap();

        assert_eq!(tree.total_weight(), 5.0);
        assert_eq!(tree.parent_of(id(2)), Some(id(1)));
        assert_eq!(tree.parent_of(id(3)), Some(id(2)));
    }

    #[test]
    fn test_prim_disconnected() {
        let mut graph = build(&[1, 2, 3, 4], &[(1, 2, 1.0), (3, 4, 1.0)]);

        let tree = prim(&mut graph, id(1)).unwrap();

        assert_eq!(tree.vertex_count(), 2);
        assert_eq!(tree.edge_count(), 1);
        let coverage = Coverage::of(&graph, &tree);
        assert_eq!(coverage, Coverage::Partial { reached: 2, total: 4 });
        assert!(matches!(
            coverage.ensure_complete(),
            Err(Error::Disconnected { reached: 2, total: 4 })
        ));
    }

    #[test]
    fn test_prim_isolated_start() {
        let mut graph = build(&[1, 2], &[]);

        let tree = prim(&mut graph, id(2)).unwrap();

        assert_eq!(tree.vertex_count(), 1);
        assert_eq!(tree.edge_count(), 0);
        assert_eq!(tree.find_vertex(id(2)).unwrap().name(), Some("city-2"));
    }

    #[test]
    fn test_prim_repeatable_and_source_untouched() {
        let mut graph = build(
            &[1, 2, 3, 4, 5],
            &[
                (1, 2, 2.0),
                (1, 3, 2.0),
                (2, 3, 2.0),
                (3, 4, 7.0),
                (2, 4, 3.0),
                (4, 5, 1.0),
                (1, 5, 9.0),
            ],
        );
        let edges_before = graph.edge_count();

        let first = prim(&mut graph, id(1)).unwrap();
        let second = prim(&mut graph, id(1)).unwrap();

        assert_eq!(first.total_weight(), second.total_weight());
        assert_eq!(first.total_weight(), 8.0);
        assert_eq!(graph.edge_count(), edges_before);
        assert!(graph.vertices().all(|v| !v.edges().iter().any(|e| e.is_exported())));
    }

    #[test]
    fn test_frontier_lazy_deletion() {
        let graph = build(&[1, 2, 3], &[(1, 2, 3.0), (1, 3, 1.0)]);
        let root = graph.index_of(id(1)).unwrap();

        let mut frontier = Frontier::with_capacity(graph.edge_count());
        frontier.push_all(&graph, root);
        assert_eq!(frontier.live(), 2);

        let first = frontier.take_lightest(&graph).unwrap();
        assert_eq!(first, EdgeRef::new(root, 1));
        assert_eq!(frontier.live(), 1);
        assert_eq!(frontier.slots_used(), 2);

        let second = frontier.take_lightest(&graph).unwrap();
        assert_eq!(second, EdgeRef::new(root, 0));
        assert!(frontier.is_empty());
        assert!(frontier.take_lightest(&graph).is_none());
    }

    #[test]
    fn test_prim_matches_kruskal_on_random_graphs() {
        let mut rng = StdRng::seed_from_u64(2016);

        for round in 0..20 {
            let n = rng.gen_range(2..30usize);
            let mut edges = Vec::new();
            for a in 0..n {
                for b in (a + 1)..n {
                    if rng.gen_bool(0.3) {
                        edges.push((a, b, f64::from(rng.gen_range(1..100u32))));
                    }
                }
            }
            // 保证连通
            for b in 1..n {
                let a = rng.gen_range(0..b);
                edges.push((a, b, f64::from(rng.gen_range(100..200u32))));
            }

            let vertices: Vec<u64> = (0..n as u64).collect();
            let labelled: Vec<(u64, u64, f64)> = edges
                .iter()
                .map(|&(a, b, w)| (a as u64, b as u64, w))
                .collect();
            let mut graph = build(&vertices, &labelled);

            let mut tree = prim(&mut graph, id(0)).unwrap();

            assert_eq!(tree.vertex_count(), n, "round {round}");
            assert_eq!(tree.total_weight(), kruskal_weight(n, &edges), "round {round}");
            assert_tree(&mut tree, id(0));
        }
    }
}
