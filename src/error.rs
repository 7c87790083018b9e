//! 错误类型定义

use crate::graph::VertexId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("顶点已存在: {0}")]
    DuplicateVertex(VertexId),

    #[error("顶点不存在: {0}")]
    VertexNotFound(VertexId),

    #[error("无效的边权重: {0}")]
    InvalidWeight(f64),

    #[error("生成树未覆盖全部顶点: 已到达 {reached}, 共 {total}")]
    Disconnected { reached: usize, total: usize },

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("导入错误: {0}")]
    ImportError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV 错误: {0}")]
    CsvError(#[from] csv::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),
}
