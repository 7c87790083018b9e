//! 广度优先与深度优先遍历
//!
//! 结果直接写入顶点的 `distance` / `parent` / `visited` 字段

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId, UNREACHED};
use std::collections::VecDeque;
use tracing::debug;

/// 广度优先搜索
///
/// 先清空所有顶点的父指针与距离，再从 `source` 出发按跳数标记。
/// 只有距离仍为 -1 的顶点会被入队，因此每个顶点最多入队一次。
pub fn bfs(graph: &mut Graph, source: VertexId) -> Result<()> {
    let start = graph.index_of(source).ok_or(Error::VertexNotFound(source))?;

    graph.reset_distances();
    graph.at_mut(start).set_distance(0);

    let mut queue = VecDeque::new();
    queue.push_back(start);
    let mut reached = 1usize;

    while let Some(u) = queue.pop_front() {
        let next = graph.at(u).distance() + 1;
        for slot in 0..graph.at(u).degree() {
            let v = graph.at(u).edges()[slot].target();
            if graph.at(v).distance() != UNREACHED {
                continue;
            }
            let vertex = graph.at_mut(v);
            vertex.set_parent(Some(u));
            vertex.set_distance(next);
            queue.push_back(v);
            reached += 1;
        }
    }

    debug!(graph = graph.id(), %source, reached, "bfs done");
    Ok(())
}

/// 深度优先搜索
///
/// 使用显式栈；每条出边检查一次，未访问的目标被标记并压栈。
pub fn dfs(graph: &mut Graph, source: VertexId) -> Result<()> {
    let pushed = dfs_pushes(graph, source)?;
    debug!(graph = graph.id(), %source, reached = pushed.len(), "dfs done");
    Ok(())
}

/// 执行 DFS 并返回按压栈顺序排列的顶点下标
///
/// 顶点在压栈时即被标记，因此每个顶点在一次运行中至多压栈一次。
pub(crate) fn dfs_pushes(graph: &mut Graph, source: VertexId) -> Result<Vec<usize>> {
    let start = graph.index_of(source).ok_or(Error::VertexNotFound(source))?;

    graph.reset_visited();
    graph.at_mut(start).set_visited(true);

    let mut pushed = vec![start];
    let mut stack = vec![start];

    while let Some(u) = stack.pop() {
        for slot in 0..graph.at(u).degree() {
            let v = graph.at(u).edges()[slot].target();
            if graph.at(v).is_visited() {
                continue;
            }
            graph.at_mut(v).set_visited(true);
            stack.push(v);
            pushed.push(v);
        }
    }

    Ok(pushed)
}

/// 沿 BFS 父指针从 `target` 回溯到源点
///
/// 返回源点到 `target` 的顶点序列；`target` 未被到达时返回空序列。
pub fn path_to(graph: &Graph, target: VertexId) -> Result<Vec<VertexId>> {
    let mut current = graph.index_of(target).ok_or(Error::VertexNotFound(target))?;
    if graph.at(current).distance() == UNREACHED {
        return Ok(Vec::new());
    }

    let mut path = vec![graph.at(current).id()];
    while let Some(parent) = graph.at(current).parent() {
        path.push(graph.at(parent).id());
        current = parent;
    }
    path.reverse();

    Ok(path)
}
