//! # plotspec - 合成光谱绘图工具
//!
//! 根据配置文件为每个输入文件合成一条吸收、发射或圆二色光谱，
//! 在共享坐标轴上绘制并导出为 SVG、PNG、JPEG、EPS 或 PDF。
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (运行流程)
//!   │     ├── sources/   (输入源解析)
//!   │     ├── config/    (配置获取)
//!   │     ├── spectrum/  (光谱合成、坐标轴)
//!   │     ├── chart/     (图表组合与导出)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod chart;
mod cli;
mod commands;
mod config;
mod error;
mod models;
mod sources;
mod spectrum;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
