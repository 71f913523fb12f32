//! 命令行宿主
//!
//! 命令解析与执行、补全、表格输出

mod commands;
mod completer;
mod printer;

pub use commands::{
    parse_command, parse_vertex_id, Command, CommandResult, Family, Session, TerminalReporter,
};
pub use completer::CommandCompleter;
pub use printer::{check_vertical_display, progress_bar, PrintMode, Printer};
