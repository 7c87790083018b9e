//! 结果打印器
//!
//! 以表格或垂直格式输出顶点标记与图统计

use crate::graph::{Graph, Vertex, UNREACHED};
use prettytable::{format, row, Cell, Row, Table};

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式
    Vertical,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 设置打印模式
    pub fn set_mode(&mut self, mode: PrintMode) {
        self.mode = mode;
    }

    /// 打印遍历后的顶点标记（距离、父顶点、访问标记）
    pub fn print_labels(&self, graph: &Graph) -> String {
        let columns: Vec<String> = ["id", "name", "distance", "parent", "visited"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let rows: Vec<Vec<String>> = graph.vertices().map(|v| label_row(graph, v)).collect();

        if rows.is_empty() {
            return "Empty graph\n".to_string();
        }

        let output = match self.mode {
            PrintMode::Table => self.format_table(&columns, &rows),
            PrintMode::Vertical => self.format_vertical(&columns, &rows),
        };
        format!("{}\n{} vertex(es)\n", output, rows.len())
    }

    /// 表格格式
    fn format_table(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
        table.set_titles(Row::new(header));

        for row_data in rows {
            let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }

    /// 垂直格式
    fn format_vertical(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        let max_col_width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        let mut output = String::new();

        for (i, row_data) in rows.iter().enumerate() {
            output.push_str(&format!(
                "*************************** {}. row ***************************\n",
                i + 1
            ));

            for (j, col) in columns.iter().enumerate() {
                let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
                output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
            }
        }

        output
    }

    /// 打印统计信息
    pub fn print_stats(&self, title: &str, graph: &Graph) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row![title, "Value"]);
        table.add_row(row!["Graph Id", graph.id().to_string()]);
        table.add_row(row!["Vertex Count", graph.vertex_count().to_string()]);
        table.add_row(row!["Edge Count", graph.edge_count().to_string()]);
        table.add_row(row!["Total Weight", format!("{:.2}", graph.total_weight())]);
        table.to_string()
    }
}

fn label_row(graph: &Graph, vertex: &Vertex) -> Vec<String> {
    let distance = match vertex.distance() {
        UNREACHED => "-".to_string(),
        d => d.to_string(),
    };
    let parent = vertex
        .parent()
        .and_then(|p| graph.vertex(p))
        .map(|p| p.id().to_string())
        .unwrap_or_else(|| "-".to_string());

    vec![
        vertex.id().to_string(),
        vertex.name().unwrap_or("").to_string(),
        distance,
        parent,
        vertex.is_visited().to_string(),
    ]
}
