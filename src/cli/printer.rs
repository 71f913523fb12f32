//! 结果打印器
//!
//! 提供表格和垂直格式的图内容输出

use crate::graph::Graph;
use crate::metrics::MetricsSnapshot;
use prettytable::{format, row, Cell, Row, Table};

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式 (\G)
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

    /// 打印顶点和边列表
    pub fn print_graph(&self, graph: &Graph) -> String {
        let vertex_columns = ["Vertex", "Label", "Degree"];
        let vertex_rows: Vec<Vec<String>> = graph
            .vertices()
            .map(|v| {
                vec![
                    v.id().to_string(),
                    v.label().to_string(),
                    graph.degree(v.id()).to_string(),
                ]
            })
            .collect();

        let edge_columns = ["Edge", "Endpoints", "Label"];
        let edge_rows: Vec<Vec<String>> = graph
            .edges()
            .map(|e| {
                vec![
                    e.id().to_string(),
                    format!("{} - {}", e.v1(), e.v2()),
                    e.label().to_string(),
                ]
            })
            .collect();

        format!(
            "{}{}",
            self.print_rows("vertex", &vertex_columns, &vertex_rows),
            self.print_rows("edge", &edge_columns, &edge_rows)
        )
    }

    fn print_rows(&self, noun: &str, columns: &[&str], rows: &[Vec<String>]) -> String {
        if rows.is_empty() {
            return format!("Empty {} set\n", noun);
        }

        let output = match self.mode {
            PrintMode::Table => self.format_table(columns, rows),
            PrintMode::Vertical => self.format_vertical(columns, rows),
        };

        format!("{}{} {} row(s)\n", output, rows.len(), noun)
    }

    /// 表格格式
    fn format_table(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
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
    fn format_vertical(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
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

    /// 打印图统计信息
    pub fn print_stats(&self, graph: &Graph) -> String {
        let max_degree = graph
            .vertices()
            .map(|v| graph.degree(v.id()))
            .max()
            .unwrap_or(0);
        let labeled_vertices = graph.vertices().filter(|v| !v.label().is_empty()).count();
        let labeled_edges = graph.edges().filter(|e| !e.label().is_empty()).count();

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Vertex Count", graph.vertex_count().to_string()]);
        table.add_row(row!["Edge Count", graph.edge_count().to_string()]);
        table.add_row(row!["Max Degree", max_degree.to_string()]);
        table.add_row(row!["Labeled Vertices", labeled_vertices.to_string()]);
        table.add_row(row!["Labeled Edges", labeled_edges.to_string()]);
        table.to_string()
    }

    /// 打印搜索指标
    pub fn print_metrics(&self, snapshot: &MetricsSnapshot) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Metric", "Value"]);
        table.add_row(row!["Searches Started", snapshot.searches_started.to_string()]);
        table.add_row(row!["Searches Completed", snapshot.searches_completed.to_string()]);
        table.add_row(row!["Searches Cancelled", snapshot.searches_cancelled.to_string()]);
        table.add_row(row!["Candidates Evaluated", snapshot.candidates_evaluated.to_string()]);
        table.add_row(row!["Labelings Found", snapshot.labelings_found.to_string()]);
        table.add_row(row![
            "Avg Search (ms)",
            format!("{:.2}", snapshot.avg_search_duration_ms)
        ]);
        table.add_row(row![
            "Candidates/s",
            format!("{:.2}", snapshot.candidates_per_second)
        ]);
        table.to_string()
    }

    /// 打印帮助信息
    pub fn print_help() -> String {
        r#"
═══════════════════════════════════════════════════════════════
                   LabelGraph CLI 命令帮助
═══════════════════════════════════════════════════════════════

基础命令:
  help, h, ?                    显示帮助
  quit, exit, q                 退出程序
  stats, info                   显示图统计信息
  show [\G]                     列出顶点和边 (\G 垂直显示)
  metrics                       显示搜索指标
  clear                         清空图

编辑图:
  vertex add [标签]             添加顶点
  vertex rm <顶点>              删除顶点（连同关联边）
  vertex label <顶点> <标签>    设置顶点标签
  edge add <顶点> <顶点> [标签] 添加边
  edge rm <顶点> <顶点>         删除边
  edge label <顶点> <顶点> <标签>
                                设置边标签
  neighbors, n <顶点>           查看顶点邻居
                                顶点可写作 v3 或 3

生成图:
  tree <n>                      加入 n 个顶点的随机树
  family path|star|cycle|complete <n>
                                加入常见图族

标号搜索:
  antimagic [all]               反魔术标号
  graceful [all]                优美标号
  dominating <k> [all]          基数为 k 的支配集
                                加 all 时穷举并计数，否则找到第一个即停止
                                搜索中按 Ctrl-C 取消

═══════════════════════════════════════════════════════════════
"#
        .to_string()
    }
}

/// 文本进度条
pub fn progress_bar(value: u128, max: u128, width: usize) -> String {
    let filled = if max == 0 {
        width
    } else {
        (value.min(max).saturating_mul(width as u128) / max) as usize
    };
    format!(
        "[{}{}] {}/{}",
        "=".repeat(filled),
        " ".repeat(width - filled),
        value,
        max
    )
}

/// 检查命令是否以 \G 结尾（垂直显示）
pub fn check_vertical_display(input: &str) -> (String, bool) {
    let trimmed = input.trim();
    if trimmed.ends_with("\\G") || trimmed.ends_with("\\g") {
        let clean = trimmed[..trimmed.len() - 2].trim().to_string();
        (clean, true)
    } else {
        (trimmed.to_string(), false)
    }
}
