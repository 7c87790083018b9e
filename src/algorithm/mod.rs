//! 图算法模块
//!
//! 包含 BFS / DFS 遍历和 Prim 最小生成树

mod prim;
mod traversal;

pub use prim::{prim, Coverage};
pub use traversal::{bfs, dfs, path_to};
