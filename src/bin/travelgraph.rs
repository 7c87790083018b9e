//! TravelGraph 命令行工具
//!
//! 读取行程时间表，执行遍历并输出 Prim 最小生成树

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use travelgraph::algorithm::{bfs, dfs, prim, Coverage};
use travelgraph::cli::{PrintMode, Printer};
use travelgraph::export::{export_dot, tree_json};
use travelgraph::graph::VertexId;
use travelgraph::import::{TableImporter, TableOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Traversal {
    None,
    Bfs,
    Dfs,
}

#[derive(Parser, Debug)]
#[command(name = "travelgraph")]
#[command(about = "行程时间图：遍历与 Prim 最小生成树")]
struct Args {
    /// 行程时间表（CSV）
    #[arg(short, long)]
    table: PathBuf,

    /// 起点顶点 ID
    #[arg(short, long)]
    start: u64,

    /// 源图 ID
    #[arg(long, default_value = "100")]
    graph_id: u64,

    /// 字段分隔符
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// 表示"无边"的权重
    #[arg(long, default_value = "-1", allow_hyphen_values = true)]
    sentinel: f64,

    /// 源图 DOT 输出路径
    #[arg(long)]
    dot: Option<PathBuf>,

    /// 生成树 DOT 输出路径
    #[arg(long)]
    tree_dot: Option<PathBuf>,

    /// 以 JSON 输出生成树及覆盖情况（不打印表格）
    #[arg(long)]
    json: bool,

    /// 生成树之前执行的遍历
    #[arg(long, value_enum, default_value_t = Traversal::None)]
    traversal: Traversal,

    /// 垂直格式输出顶点标记
    #[arg(long)]
    vertical: bool,

    /// 生成树未覆盖全部顶点时报错
    #[arg(long)]
    require_connected: bool,

    /// 日志级别（RUST_LOG 优先）
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    if !args.delimiter.is_ascii() {
        bail!("分隔符必须是 ASCII 字符: {:?}", args.delimiter);
    }

    let options = TableOptions::default()
        .with_delimiter(args.delimiter as u8)
        .with_sentinel(args.sentinel);
    let (mut graph, stats) = TableImporter::new(options)
        .import_path(&args.table, args.graph_id)
        .with_context(|| format!("导入行程时间表失败: {}", args.table.display()))?;

    let mode = if args.vertical {
        PrintMode::Vertical
    } else {
        PrintMode::Table
    };
    let printer = Printer::new(mode);
    let start = VertexId::new(args.start);

    if !args.json {
        println!("TravelGraph - 行程时间图");
        println!("========================");
        println!("输入文件: {}", args.table.display());
        println!("  顶点导入: {}", stats.vertices_imported);
        println!("  边导入: {}", stats.edges_imported);
        println!("  无边标记: {}", stats.sentinel_skipped);
        println!("  重复连接: {}", stats.duplicates_skipped);
        println!("  耗时: {} ms\n", stats.duration_ms);
        println!("{}", printer.print_stats("Graph", &graph));
    }

    match args.traversal {
        Traversal::None => {}
        Traversal::Bfs => {
            bfs(&mut graph, start).context("BFS 失败")?;
            if !args.json {
                println!("BFS 起点 {}:\n{}", start, printer.print_labels(&graph));
            }
        }
        Traversal::Dfs => {
            dfs(&mut graph, start).context("DFS 失败")?;
            if !args.json {
                println!("DFS 起点 {}:\n{}", start, printer.print_labels(&graph));
            }
        }
    }

    if let Some(path) = &args.dot {
        export_dot(&mut graph, path)
            .with_context(|| format!("写入 DOT 失败: {}", path.display()))?;
    }

    let mut tree = prim(&mut graph, start).context("最小生成树计算失败")?;
    let coverage = Coverage::of(&graph, &tree);

    if args.json {
        println!("{}", tree_json(&graph, &tree)?);
    } else {
        println!("{}", printer.print_stats("Spanning Tree", &tree));
        if let Coverage::Partial { reached, total } = coverage {
            println!("注意: 生成树只覆盖 {} / {} 个顶点", reached, total);
        }
    }

    if let Some(path) = &args.tree_dot {
        export_dot(&mut tree, path)
            .with_context(|| format!("写入 DOT 失败: {}", path.display()))?;
    }

    if args.require_connected {
        coverage.ensure_complete()?;
    }

    Ok(())
}
