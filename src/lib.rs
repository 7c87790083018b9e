//! TravelGraph - 行程时间图与最小生成树
//!
//! 从行程时间表构造带权无向图，支持：
//! - 广度优先 / 深度优先遍历标记
//! - 基于惰性删除候选集的 Prim 最小生成树
//! - CSV 行程时间矩阵导入
//! - DOT 与 JSON 导出

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod export;
pub mod graph;
pub mod import;

// 重导出常用类型
pub use algorithm::{bfs, dfs, path_to, prim, Coverage};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, Vertex, VertexId};
pub use import::{TableImporter, TableOptions, TravelTable};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
