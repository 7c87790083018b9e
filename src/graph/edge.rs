//! 边定义
//!
//! 有向带权边；无向连接由一对互逆的边表示

/// 边
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// 目标顶点在所属图中的下标
    target: usize,
    /// 权重（行程时间）
    weight: f64,
    /// DOT 导出标记
    exported: bool,
}

impl Edge {
    /// 创建新边
    pub fn new(target: usize, weight: f64) -> Self {
        Self {
            target,
            weight,
            exported: false,
        }
    }

    /// 获取目标顶点下标
    pub fn target(&self) -> usize {
        self.target
    }

    /// 获取权重
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn is_exported(&self) -> bool {
        self.exported
    }

    pub fn set_exported(&mut self, exported: bool) {
        self.exported = exported;
    }
}

/// 边的位置：源顶点下标 + 邻接表中的槽位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRef {
    pub source: usize,
    pub slot: usize,
}

impl EdgeRef {
    pub fn new(source: usize, slot: usize) -> Self {
        Self { source, slot }
    }
}
