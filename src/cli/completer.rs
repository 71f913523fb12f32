//! 命令补全器
//!
//! 基于 rustyline 实现 Tab 补全功能

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// 顶层命令列表
const COMMANDS: &[&str] = &[
    "help", "quit", "exit", "stats", "info", "show", "metrics", "clear",
    "vertex", "edge", "neighbors",
    "tree", "family",
    "antimagic", "graceful", "dominating",
];

/// 子命令映射
fn get_sub_commands(command: &str) -> Option<&'static [&'static str]> {
    match command {
        "vertex" | "v" => Some(&["add", "rm", "label"]),
        "edge" | "e" => Some(&["add", "rm", "label"]),
        "family" => Some(&["path", "star", "cycle", "complete"]),
        "antimagic" | "graceful" => Some(&["all"]),
        _ => None,
    }
}

fn to_pairs<'a>(words: impl Iterator<Item = &'a &'static str>) -> Vec<Pair> {
    words
        .map(|w| Pair {
            display: w.to_string(),
            replacement: w.to_string(),
        })
        .collect()
}

/// LabelGraph CLI 补全器
#[derive(Default)]
pub struct CommandCompleter;

impl CommandCompleter {
    pub fn new() -> Self {
        Self
    }

    /// 计算补全候选，返回替换起始位置
    pub fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let line_to_cursor = &line[..pos];
        let words: Vec<&str> = line_to_cursor.split_whitespace().collect();

        let Some(last) = words.last() else {
            return (pos, to_pairs(COMMANDS.iter()));
        };

        if line_to_cursor.ends_with(char::is_whitespace) {
            // 在空格后，提供子命令建议
            if words.len() == 1 {
                if let Some(sub_cmds) = get_sub_commands(&last.to_lowercase()) {
                    return (pos, to_pairs(sub_cmds.iter()));
                }
            }
            return (pos, vec![]);
        }

        // 补全当前正在输入的单词
        let current = last.to_lowercase();
        let start_pos = pos - last.len();
        match words.len() {
            1 => (
                start_pos,
                to_pairs(COMMANDS.iter().filter(|c| c.starts_with(&current))),
            ),
            2 => {
                let prev = words[0].to_lowercase();
                let completions = get_sub_commands(&prev)
                    .map(|subs| to_pairs(subs.iter().filter(|s| s.starts_with(&current))))
                    .unwrap_or_default();
                (start_pos, completions)
            }
            _ => (start_pos, vec![]),
        }
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(line, pos))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}

impl Validator for CommandCompleter {}

impl Helper for CommandCompleter {}
