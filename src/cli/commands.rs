//! 控制台命令处理
//!
//! 把一行输入解析为 [`Command`]，并在 [`Session`] 持有的图上执行

use std::io::Write;

use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::printer::{check_vertical_display, progress_bar, PrintMode, Printer};
use crate::config::SearchConfig;
use crate::driver::{CancelHandle, Driver, Reporter, Step};
use crate::error::{Error, Result};
use crate::generators;
use crate::graph::{Graph, VertexId};
use crate::labeling::{
    search_antimagic_with, search_dominating_set_with, search_graceful_with, Labeling, Search,
    SearchOutcome,
};
use crate::metrics::global_metrics;
use crate::types::Label;

/// 图族
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Path,
    Star,
    Cycle,
    Complete,
}

/// 解析后的命令
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Quit,
    Stats,
    Show { vertical: bool },
    Metrics,
    Clear,
    AddVertex(Label),
    RemoveVertex(VertexId),
    LabelVertex(VertexId, Label),
    AddEdge(VertexId, VertexId, Label),
    RemoveEdge(VertexId, VertexId),
    LabelEdge(VertexId, VertexId, Label),
    Neighbors(VertexId),
    Tree(usize),
    Family(Family, usize),
    Antimagic { all: bool },
    Graceful { all: bool },
    Dominating { cardinality: usize, all: bool },
}

/// 命令执行结果
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// 继续运行
    Continue,
    /// 退出程序
    Exit,
    /// 显示消息
    Message(String),
    /// 搜索结果
    Search { message: String, found: bool },
    /// 错误
    Error(String),
}

impl CommandResult {
    /// 终端上显示的文本（搜索结果着色）
    pub fn render(&self) -> Option<String> {
        match self {
            CommandResult::Continue | CommandResult::Exit => None,
            CommandResult::Message(msg) => Some(msg.clone()),
            CommandResult::Search { message, found: true } => Some(message.green().bold().to_string()),
            CommandResult::Search { message, found: false } => Some(message.yellow().to_string()),
            CommandResult::Error(msg) => Some(format!("{} {}", "错误:".red().bold(), msg)),
        }
    }
}

/// 解析顶点引用：`v3` 或 `3`
pub fn parse_vertex_id(s: &str) -> Result<VertexId> {
    let digits = s.strip_prefix('v').unwrap_or(s);
    digits
        .parse::<u64>()
        .map(VertexId::new)
        .map_err(|_| Error::ParseError(format!("无效的顶点: {}", s)))
}

fn parse_count(s: Option<&str>, usage: &str) -> Result<usize> {
    s.and_then(|n| n.parse::<usize>().ok())
        .ok_or_else(|| Error::ParseError(format!("用法: {}", usage)))
}

fn parse_all(s: Option<&str>, usage: &str) -> Result<bool> {
    match s {
        None => Ok(false),
        Some(w) if w.eq_ignore_ascii_case("all") => Ok(true),
        Some(_) => Err(Error::ParseError(format!("用法: {}", usage))),
    }
}

/// 取出前 `n` 个空白分隔的词，剩余部分原样作为标签
fn split_words(args: &str, n: usize) -> (Vec<&str>, &str) {
    let mut words = Vec::with_capacity(n);
    let mut rest = args.trim_start();
    while words.len() < n && !rest.is_empty() {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        words.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    (words, rest.trim_end())
}

/// 解析一行命令
pub fn parse_command(input: &str) -> Result<Command> {
    let (line, vertical) = check_vertical_display(input);
    let (head, args) = split_words(&line, 1);
    let Some(cmd) = head.first().map(|c| c.to_lowercase()) else {
        return Err(Error::ParseError("空命令".to_string()));
    };

    let command = match cmd.as_str() {
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "stats" | "info" => Command::Stats,
        "show" | "ls" => Command::Show { vertical },
        "metrics" => Command::Metrics,
        "clear" => Command::Clear,

        "vertex" | "v" => {
            let (sub, rest) = split_words(args, 1);
            match sub.first().map(|s| s.to_lowercase()).as_deref() {
                Some("add") => Command::AddVertex(Label::parse(rest)),
                Some("rm") | Some("remove") => {
                    Command::RemoveVertex(parse_vertex_id(rest)?)
                }
                Some("label") => {
                    let (ids, label) = split_words(rest, 1);
                    let id = ids
                        .first()
                        .ok_or_else(|| Error::ParseError("用法: vertex label <顶点> <标签>".to_string()))?;
                    Command::LabelVertex(parse_vertex_id(id)?, Label::parse(label))
                }
                _ => {
                    return Err(Error::ParseError(
                        "用法: vertex add|rm|label ...".to_string(),
                    ))
                }
            }
        }

        "edge" | "e" => {
            let (sub, rest) = split_words(args, 1);
            let sub = sub.first().map(|s| s.to_lowercase());
            let (ids, label) = split_words(rest, 2);
            if ids.len() < 2 {
                return Err(Error::ParseError(
                    "用法: edge add|rm|label <顶点> <顶点> [标签]".to_string(),
                ));
            }
            let (a, b) = (parse_vertex_id(ids[0])?, parse_vertex_id(ids[1])?);
            match sub.as_deref() {
                Some("add") => Command::AddEdge(a, b, Label::parse(label)),
                Some("rm") | Some("remove") => Command::RemoveEdge(a, b),
                Some("label") => Command::LabelEdge(a, b, Label::parse(label)),
                _ => {
                    return Err(Error::ParseError(
                        "用法: edge add|rm|label <顶点> <顶点> [标签]".to_string(),
                    ))
                }
            }
        }

        "neighbors" | "n" => Command::Neighbors(parse_vertex_id(args)?),

        "tree" => Command::Tree(parse_count(Some(args), "tree <n>")?),

        "family" => {
            let usage = "family path|star|cycle|complete <n>";
            let (words, _) = split_words(args, 2);
            let family = match words.first().map(|w| w.to_lowercase()).as_deref() {
                Some("path") => Family::Path,
                Some("star") => Family::Star,
                Some("cycle") => Family::Cycle,
                Some("complete") => Family::Complete,
                _ => return Err(Error::ParseError(format!("用法: {}", usage))),
            };
            Command::Family(family, parse_count(words.get(1).copied(), usage)?)
        }

        "antimagic" => Command::Antimagic {
            all: parse_all(split_words(args, 1).0.first().copied(), "antimagic [all]")?,
        },
        "graceful" => Command::Graceful {
            all: parse_all(split_words(args, 1).0.first().copied(), "graceful [all]")?,
        },
        "dominating" => {
            let usage = "dominating <k> [all]";
            let (words, _) = split_words(args, 2);
            Command::Dominating {
                cardinality: parse_count(words.first().copied(), usage)?,
                all: parse_all(words.get(1).copied(), usage)?,
            }
        }

        _ => {
            return Err(Error::ParseError(format!(
                "未知命令: {}。输入 'help' 查看帮助。",
                cmd
            )))
        }
    };
    Ok(command)
}

/// 终端报告器：在 stderr 上刷新进度条，保存结果文本
pub struct TerminalReporter {
    show_progress: bool,
    drawn: bool,
    message: Option<String>,
}

impl TerminalReporter {
    pub fn new(show_progress: bool) -> Self {
        Self {
            show_progress,
            drawn: false,
            message: None,
        }
    }

    /// 结束进度行，返回结果文本
    pub fn finish(self) -> String {
        if self.drawn {
            eprintln!();
        }
        self.message.unwrap_or_default()
    }
}

impl Reporter for TerminalReporter {
    fn progress(&mut self, value: u128, max: u128) {
        if self.show_progress {
            eprint!("\r{}", progress_bar(value, max, 40));
            let _ = std::io::stderr().flush();
            self.drawn = true;
        }
    }

    fn result(&mut self, message: &str) {
        self.message = Some(message.to_string());
    }
}

/// 控制台会话：持有当前图、配置和取消句柄
pub struct Session {
    graph: Graph,
    config: SearchConfig,
    cancel: CancelHandle,
    rng: StdRng,
    show_progress: bool,
}

impl Session {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            graph: Graph::new(),
            config,
            cancel: CancelHandle::new(),
            rng: StdRng::from_entropy(),
            show_progress: true,
        }
    }

    /// 固定随机种子（测试用）
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// 是否绘制进度条
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// 宿主用来取消当前搜索的句柄
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// 解析并执行一行输入；错误转为 [`CommandResult::Error`]
    pub async fn execute_line(&mut self, input: &str) -> CommandResult {
        let result = match parse_command(input) {
            Ok(command) => self.execute(command).await,
            Err(e) => Err(e),
        };
        result.unwrap_or_else(|e| CommandResult::Error(e.to_string()))
    }

    /// 执行命令
    pub async fn execute(&mut self, command: Command) -> Result<CommandResult> {
        debug!(?command, "执行命令");
        let result = match command {
            Command::Help => CommandResult::Message(Printer::print_help()),
            Command::Quit => CommandResult::Exit,
            Command::Stats => CommandResult::Message(Printer::default().print_stats(&self.graph)),
            Command::Show { vertical } => {
                let mode = if vertical {
                    PrintMode::Vertical
                } else {
                    PrintMode::Table
                };
                CommandResult::Message(Printer::new(mode).print_graph(&self.graph))
            }
            Command::Metrics => {
                let snapshot = global_metrics().snapshot();
                CommandResult::Message(Printer::default().print_metrics(&snapshot))
            }
            Command::Clear => {
                self.graph.clear();
                CommandResult::Message("图已清空".to_string())
            }

            Command::AddVertex(label) => {
                let id = self.graph.create_vertex(label);
                CommandResult::Message(format!("已添加顶点 {}", id))
            }
            Command::RemoveVertex(id) => {
                if !self.graph.delete_vertex(id) {
                    return Err(Error::VertexNotFound(id.to_string()));
                }
                CommandResult::Message(format!("已删除顶点 {}", id))
            }
            Command::LabelVertex(id, label) => {
                self.graph.set_vertex_label(id, label)?;
                CommandResult::Continue
            }
            Command::AddEdge(a, b, label) => match self.graph.add_edge((a, b), label)? {
                Some(id) => CommandResult::Message(format!("已添加边 {} ({} - {})", id, a, b)),
                None => CommandResult::Message(format!("边 {} - {} 已存在", a, b)),
            },
            Command::RemoveEdge(a, b) => {
                if !self.graph.delete_edge((a, b)) {
                    return Err(Error::EdgeNotFound(format!("{} - {}", a, b)));
                }
                CommandResult::Message(format!("已删除边 {} - {}", a, b))
            }
            Command::LabelEdge(a, b, label) => {
                let id = self
                    .graph
                    .get_edge((a, b))
                    .map(|e| e.id())
                    .ok_or_else(|| Error::EdgeNotFound(format!("{} - {}", a, b)))?;
                self.graph.set_edge_label(id, label)?;
                CommandResult::Continue
            }
            Command::Neighbors(id) => {
                if !self.graph.contains_vertex(id) {
                    return Err(Error::VertexNotFound(id.to_string()));
                }
                let neighbors: Vec<String> =
                    self.graph.neighbors(id).iter().map(|n| n.to_string()).collect();
                CommandResult::Message(format!("{} 的邻居: [{}]", id, neighbors.join(", ")))
            }

            Command::Tree(order) => {
                let tree = generators::random_tree(&mut self.graph, order, &mut self.rng)?;
                CommandResult::Message(format!(
                    "已加入 {} 个顶点的随机树（覆盖步数 {}）",
                    tree.vertices.len(),
                    tree.cover_steps
                ))
            }
            Command::Family(family, n) => {
                let vertices = match family {
                    Family::Path => generators::path(&mut self.graph, n)?,
                    Family::Star => generators::star(&mut self.graph, n)?,
                    Family::Cycle => generators::cycle(&mut self.graph, n)?,
                    Family::Complete => generators::complete(&mut self.graph, n)?,
                };
                CommandResult::Message(format!("已加入 {:?}，{} 个顶点", family, vertices.len()))
            }

            Command::Antimagic { all } => {
                let search = search_antimagic_with(&mut self.graph, self.config.search_options(all));
                drive(search, &self.config, &self.cancel, self.show_progress).await?
            }
            Command::Graceful { all } => {
                let search = search_graceful_with(&mut self.graph, self.config.search_options(all));
                drive(search, &self.config, &self.cancel, self.show_progress).await?
            }
            Command::Dominating { cardinality, all } => {
                let search = search_dominating_set_with(
                    &mut self.graph,
                    cardinality,
                    self.config.search_options(all),
                );
                drive(search, &self.config, &self.cancel, self.show_progress).await?
            }
        };
        Ok(result)
    }
}

/// 通过协作式驱动运行一次搜索
async fn drive<L: Labeling>(
    search: Search<'_, L>,
    config: &SearchConfig,
    cancel: &CancelHandle,
    show_progress: bool,
) -> Result<CommandResult> {
    config.admit(search.total())?;
    info!(kind = %search.kind(), total = %search.total(), "开始搜索");

    cancel.reset();
    let mut reporter = TerminalReporter::new(show_progress);
    let mut driver = Driver::from_config(search, config).with_cancel_handle(cancel.clone());
    let step = driver.run_async(&mut reporter).await;

    if let Step::Finished(SearchOutcome::Aborted { .. }) = step {
        let message = reporter.finish();
        return Ok(CommandResult::Error(match driver.search().failure() {
            Some(err) => format!("{}: {}", message, err),
            None => message,
        }));
    }

    let found = matches!(step, Step::Finished(outcome) if outcome.is_found());
    Ok(CommandResult::Search {
        message: reporter.finish(),
        found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(SearchConfig::default())
            .with_seed(42)
            .with_progress(false)
    }

    #[test]
    fn test_parse_vertex_id() {
        assert_eq!(parse_vertex_id("v3").unwrap(), VertexId::new(3));
        assert_eq!(parse_vertex_id("12").unwrap(), VertexId::new(12));
        assert!(parse_vertex_id("x").is_err());
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("help").unwrap(), Command::Help);
        assert_eq!(parse_command("show\\G").unwrap(), Command::Show { vertical: true });
        assert_eq!(
            parse_command("vertex add hello world").unwrap(),
            Command::AddVertex(Label::Text("hello world".to_string()))
        );
        assert_eq!(
            parse_command("vertex add").unwrap(),
            Command::AddVertex(Label::Empty)
        );
        assert_eq!(
            parse_command("edge add v1 2 5").unwrap(),
            Command::AddEdge(VertexId::new(1), VertexId::new(2), Label::Integer(5))
        );
        assert_eq!(
            parse_command("family Star 3").unwrap(),
            Command::Family(Family::Star, 3)
        );
        assert_eq!(
            parse_command("dominating 2 all").unwrap(),
            Command::Dominating {
                cardinality: 2,
                all: true
            }
        );
        assert_eq!(
            parse_command("antimagic").unwrap(),
            Command::Antimagic { all: false }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_command(""), Err(Error::ParseError(_))));
        assert!(matches!(parse_command("bogus"), Err(Error::ParseError(_))));
        assert!(matches!(parse_command("dominating -1"), Err(Error::ParseError(_))));
        assert!(matches!(parse_command("graceful some"), Err(Error::ParseError(_))));
        assert!(matches!(parse_command("edge add v1"), Err(Error::ParseError(_))));
    }

    #[tokio::test]
    async fn test_session_edits_graph() {
        let mut session = session();
        let a = session.graph_mut().create_vertex("");
        let b = session.graph_mut().create_vertex("");

        let result = session.execute_line(&format!("edge add {} {}", a, b)).await;
        assert!(matches!(result, CommandResult::Message(_)));
        assert_eq!(session.graph().edge_count(), 1);

        // 重复添加不报错
        let result = session.execute_line(&format!("edge add {} {}", b, a)).await;
        assert!(matches!(result, CommandResult::Message(ref m) if m.contains("已存在")));

        session.execute_line(&format!("edge label {} {} 9", a, b)).await;
        let edge = session.graph().get_edge((a, b)).unwrap();
        assert_eq!(edge.label(), &Label::Integer(9));

        session.execute_line(&format!("vertex rm {}", a)).await;
        assert_eq!(session.graph().vertex_count(), 1);
        assert_eq!(session.graph().edge_count(), 0);

        let result = session.execute_line(&format!("vertex rm {}", a)).await;
        assert!(matches!(result, CommandResult::Error(_)));
    }

    #[tokio::test]
    async fn test_session_self_loop_is_error() {
        let mut session = session();
        let a = session.graph_mut().create_vertex("");
        let result = session.execute_line(&format!("edge add {} {}", a, a)).await;
        assert!(matches!(result, CommandResult::Error(_)));
    }

    #[tokio::test]
    async fn test_session_searches() {
        let mut session = session();
        session.execute_line("family star 3").await;

        let result = session.execute_line("dominating 1 all").await;
        assert_eq!(
            result,
            CommandResult::Search {
                message: "1 out of 4 (0.25) are dominating sets".to_string(),
                found: true
            }
        );

        session.execute_line("clear").await;
        session.execute_line("family path 2").await;
        let result = session.execute_line("graceful all").await;
        assert_eq!(
            result,
            CommandResult::Search {
                message: "2 out of 2 (1) are graceful".to_string(),
                found: true
            }
        );
    }

    #[tokio::test]
    async fn test_session_rejects_large_search() {
        let config = SearchConfig {
            max_candidates: 10,
            ..Default::default()
        };
        let mut session = Session::new(config).with_progress(false);
        session.execute_line("family path 5").await;

        let result = session.execute_line("antimagic all").await;
        assert!(matches!(result, CommandResult::Error(ref m) if m.contains("24")));
    }

    #[tokio::test]
    async fn test_session_tree() {
        let mut session = session();
        session.execute_line("tree 6").await;
        assert_eq!(session.graph().vertex_count(), 6);
        assert_eq!(session.graph().edge_count(), 5);
    }
}
