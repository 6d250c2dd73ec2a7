//! # 美化输出工具
//!
//! 提供统一的终端输出样式。错误写到 stderr，其余写到 stdout。
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs`, `chart/mod.rs`, `chart/viewer.rs`, `main.rs` 使用
//! - 使用 `colored` crate

use colored::Colorize;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 逐条打印警告（配置回退等）
pub fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        print_warning(warning);
    }
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}
