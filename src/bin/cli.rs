//! LabelGraph CLI 工具
//!
//! 交互式命令行界面

use anyhow::Context;
use clap::Parser;
use labelgraph::cli::{CommandCompleter, CommandResult, Session};
use labelgraph::config::SearchConfig;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "labelgraph-cli")]
#[command(about = "LabelGraph 命令行工具：编辑小图并穷举搜索组合标号")]
struct Args {
    /// JSON 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 每批评估的候选数（覆盖配置文件）
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// 启动时加入 N 个顶点的随机树
    #[arg(short, long)]
    tree: Option<usize>,

    /// 执行单个命令后退出
    #[arg(short = 'e', long)]
    execute: Option<String>,

    /// 日志详细程度（-v info，-vv debug）
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> anyhow::Result<SearchConfig> {
    let mut config = match &args.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("无法加载配置文件 {}", path.display()))?,
        None => SearchConfig::default(),
    };
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    config.validate()?;
    Ok(config)
}

fn print_result(result: &CommandResult) {
    if let Some(text) = result.render() {
        println!("{}", text);
    }
}

fn history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".labelgraph_history"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    info!(?config, "配置已加载");
    let mut session = Session::new(config);

    // 搜索期间 Ctrl-C 只取消当前搜索
    let cancel = session.cancel_handle();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    if let Some(order) = args.tree {
        print_result(&session.execute_line(&format!("tree {}", order)).await);
    }

    // 单个命令模式
    if let Some(command) = args.execute {
        let result = session.execute_line(&command).await;
        print_result(&result);
        if let CommandResult::Error(msg) = result {
            anyhow::bail!(msg);
        }
        return Ok(());
    }

    println!("LabelGraph CLI - 小图组合标号搜索");
    println!("=================================");
    println!("\n输入 'help' 查看命令列表，'quit' 退出\n");

    let mut rl: Editor<CommandCompleter, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CommandCompleter::new()));
    let history = history_path();
    if let Some(path) = &history {
        // 首次运行时没有历史文件
        let _ = rl.load_history(path);
    }

    loop {
        match rl.readline("labelgraph> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)?;

                let result = session.execute_line(line).await;
                print_result(&result);
                if result == CommandResult::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(path) = &history {
        if let Err(e) = rl.save_history(path) {
            warn!(error = %e, "无法保存历史记录");
        }
    }

    println!("再见！");
    Ok(())
}
