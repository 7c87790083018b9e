//! 数据导入模块
//!
//! 读取行程时间矩阵 CSV：
//!
//! ```text
//! 标签,,<列顶点 ID 1>,...,<列顶点 ID n>
//! <忽略的第二行>
//! <ID>,<名称>,<t1>,...,<tn>
//! ```
//!
//! 每个数据行对应一个顶点，`tj` 为该顶点与第 j 列顶点之间的行程时间，`-1` 表示无边。

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// 默认"无边"标记
pub const NO_EDGE: f64 = -1.0;

/// 表格读取选项
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// 字段分隔符
    pub delimiter: u8,
    /// 表示"无边"的权重
    pub sentinel: f64,
    /// 数据行之前的表头行数（第一行为列顶点 ID）
    pub header_rows: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            sentinel: NO_EDGE,
            header_rows: 2,
        }
    }
}

impl TableOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_sentinel(mut self, sentinel: f64) -> Self {
        self.sentinel = sentinel;
        self
    }

    pub fn with_header_rows(mut self, rows: usize) -> Self {
        self.header_rows = rows.max(1);
        self
    }
}

/// 导入统计
#[derive(Debug, Default, Clone)]
pub struct ImportStats {
    pub vertices_imported: usize,
    pub edges_imported: usize,
    pub sentinel_skipped: usize,
    pub duplicates_skipped: usize,
    pub self_links_skipped: usize,
    pub duration_ms: u64,
}

/// 解析后的行程时间表
#[derive(Debug, Clone, Default)]
pub struct TravelTable {
    /// `(ID, 名称)`，按行顺序；名称为空时为 `None`
    pub places: Vec<(VertexId, Option<String>)>,
    /// `(列顶点, 行顶点, 权重)`，包含无边标记
    pub links: Vec<(VertexId, VertexId, f64)>,
    /// 解析时使用的无边标记
    pub sentinel: f64,
}

impl TravelTable {
    /// 构造图：先加入全部顶点，再连接有效边
    ///
    /// 对称矩阵中同一对顶点出现两次，已连接的顶点对和对角线会被跳过。
    pub fn to_graph(&self, graph_id: u64) -> Result<(Graph, ImportStats)> {
        let start = Instant::now();
        let mut graph = Graph::new(graph_id);
        let mut stats = ImportStats::default();

        for (id, name) in &self.places {
            graph.add_vertex(*id, name.clone())?;
            stats.vertices_imported += 1;
        }

        for &(u, v, weight) in &self.links {
            if weight == self.sentinel {
                stats.sentinel_skipped += 1;
                continue;
            }
            if u == v {
                stats.self_links_skipped += 1;
                continue;
            }
            if graph.is_adjacent(u, v) {
                debug!(%u, %v, weight, "pair already connected");
                stats.duplicates_skipped += 1;
                continue;
            }
            graph.connect(u, v, weight)?;
            stats.edges_imported += 1;
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            graph = graph_id,
            vertices = stats.vertices_imported,
            edges = stats.edges_imported,
            sentinel = stats.sentinel_skipped,
            duplicates = stats.duplicates_skipped,
            "graph built from table"
        );

        Ok((graph, stats))
    }
}

/// 行程时间表导入器
#[derive(Debug, Clone, Default)]
pub struct TableImporter {
    options: TableOptions,
}

impl TableImporter {
    /// 创建导入器
    pub fn new(options: TableOptions) -> Self {
        Self { options }
    }

    /// 从文件读取表格
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<TravelTable> {
        let file = File::open(path.as_ref())?;
        info!(path = %path.as_ref().display(), "reading travel table");
        self.read_from(file)
    }

    /// 从任意输入读取表格
    pub fn read_from<R: Read>(&self, reader: R) -> Result<TravelTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(self.options.delimiter)
            .from_reader(reader);

        let mut records = reader.records();

        let header = records
            .next()
            .ok_or_else(|| Error::ImportError("表格为空".to_string()))??;
        let columns = parse_columns(&header)?;
        if columns.is_empty() {
            return Err(Error::ImportError("表头中没有列顶点 ID".to_string()));
        }

        for _ in 1..self.options.header_rows {
            if records.next().transpose()?.is_none() {
                break;
            }
        }

        let mut table = TravelTable {
            sentinel: self.options.sentinel,
            ..TravelTable::default()
        };

        for (offset, record) in records.enumerate() {
            let record = record?;
            let line = self.options.header_rows + offset + 1;

            if record.iter().all(str::is_empty) {
                continue;
            }
            self.parse_row(&record, line, &columns, &mut table)?;
        }

        debug!(
            places = table.places.len(),
            links = table.links.len(),
            "travel table parsed"
        );
        Ok(table)
    }

    /// 读取文件并直接构造图
    pub fn import_path<P: AsRef<Path>>(
        &self,
        path: P,
        graph_id: u64,
    ) -> Result<(Graph, ImportStats)> {
        self.read_path(path)?.to_graph(graph_id)
    }

    fn parse_row(
        &self,
        record: &StringRecord,
        line: usize,
        columns: &[(usize, VertexId)],
        table: &mut TravelTable,
    ) -> Result<()> {
        let needed = columns.last().map_or(2, |&(col, _)| col + 1);
        if record.len() < needed {
            return Err(Error::ImportError(format!(
                "第 {} 行字段不足: 需要 {}, 实际 {}",
                line,
                needed,
                record.len()
            )));
        }

        let id = parse_id(&record[0], line, 1)?;
        let name = match &record[1] {
            "" => {
                warn!(line, vertex = %id, "row has no name");
                None
            }
            name => Some(name.to_string()),
        };
        table.places.push((id, name));

        for &(col, column) in columns {
            let cell = &record[col];
            let weight = if cell.is_empty() {
                self.options.sentinel
            } else {
                cell.parse::<f64>().map_err(|e| {
                    Error::ParseError(format!("第 {} 行第 {} 列 {:?}: {}", line, col + 1, cell, e))
                })?
            };
            table.links.push((column, id, weight));
        }

        Ok(())
    }
}

/// 解析首行中的列顶点 ID（从第三列开始）
///
/// 返回 `(字段下标, 顶点 ID)`；空表头单元格所在的列没有顶点，数据行中对应的值被忽略。
fn parse_columns(header: &StringRecord) -> Result<Vec<(usize, VertexId)>> {
    header
        .iter()
        .enumerate()
        .skip(2)
        .filter(|(_, cell)| !cell.is_empty())
        .map(|(col, cell)| Ok((col, parse_id(cell, 1, col + 1)?)))
        .collect()
}

fn parse_id(cell: &str, line: usize, col: usize) -> Result<VertexId> {
    cell.parse::<u64>()
        .map(VertexId::new)
        .map_err(|e| Error::ParseError(format!("第 {} 行第 {} 列 {:?}: {}", line, col, cell, e)))
}

/// 从默认格式的 CSV 文件构造图
pub fn import_table<P: AsRef<Path>>(path: P, graph_id: u64) -> Result<(Graph, ImportStats)> {
    TableImporter::default().import_path(path, graph_id)
}
