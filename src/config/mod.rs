//! # 配置获取模块
//!
//! 查找并读取 `spectrum_config.toml`，叠加个人覆盖文件、环境变量和命令行选项，
//! 得到最终的 `ParameterRecord`。配置文件只在 `load_parameters` 调用内读取，
//! 不保留任何跨阶段状态。
//!
//! ## 查找顺序
//! 1. `--config <path>` / `SPECTRUM_CONFIG`
//! 2. `./spectrum_config.toml`
//! 3. `$HOME/spectrum_config.toml`
//!
//! 之后若存在 `$HOME/.spectrum_user_config.toml`，其中出现的键覆盖主配置和环境开关。
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 调用
//! - 子模块: file, resolve

pub mod file;
pub mod resolve;

pub use file::{ConfigLayers, RawConfig};
pub use resolve::{CliOverrides, EnvOverrides, Resolved};

use crate::error::{PlotspecError, Result};
use crate::models::InputSource;

use std::path::{Path, PathBuf};

/// 主配置文件名
pub const CONFIG_FILE_NAME: &str = "spectrum_config.toml";

/// 个人覆盖配置文件名（位于 home 目录）
pub const USER_CONFIG_FILE_NAME: &str = ".spectrum_user_config.toml";

/// 配置文件定位器
#[derive(Debug, Clone)]
pub struct ConfigLocator {
    /// 当前工作目录
    cwd: PathBuf,
    /// home 目录（可能不存在）
    home: Option<PathBuf>,
}

impl ConfigLocator {
    pub fn new(cwd: PathBuf, home: Option<PathBuf>) -> Self {
        Self { cwd, home }
    }

    /// 使用进程的工作目录和 `$HOME`
    pub fn from_env() -> Self {
        Self {
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            home: std::env::var_os("HOME").map(PathBuf::from),
        }
    }

    /// 查找主配置文件
    pub fn find_config(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            if path.is_file() {
                return Ok(path.to_path_buf());
            }
            return Err(PlotspecError::FileReadError {
                path: path.display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "config file not found"),
            });
        }

        let local = self.cwd.join(CONFIG_FILE_NAME);
        if local.is_file() {
            return Ok(local);
        }

        if let Some(home) = &self.home {
            let home_config = home.join(CONFIG_FILE_NAME);
            if home_config.is_file() {
                return Ok(home_config);
            }
        }

        Err(PlotspecError::ConfigNotFound)
    }

    /// 个人覆盖配置文件（若存在）
    pub fn user_override(&self) -> Option<PathBuf> {
        self.home
            .as_ref()
            .map(|h| h.join(USER_CONFIG_FILE_NAME))
            .filter(|p| p.is_file())
    }

    /// 读取主配置和个人覆盖，返回各层内容和实际使用的文件列表
    pub fn load_layers(&self, explicit: Option<&Path>) -> Result<(ConfigLayers, Vec<PathBuf>)> {
        let main_path = self.find_config(explicit)?;
        let main = RawConfig::load(&main_path)?;
        let mut used = vec![main_path];

        let user = match self.user_override() {
            Some(user_path) => {
                let user = RawConfig::load(&user_path)?;
                used.push(user_path);
                Some(user)
            }
            None => None,
        };

        Ok((ConfigLayers { main, user }, used))
    }
}

/// 完整配置流程：定位、读取、叠加、解析
pub fn load_parameters(
    locator: &ConfigLocator,
    explicit: Option<&Path>,
    env: EnvOverrides,
    cli: CliOverrides,
    sources: Vec<InputSource>,
) -> Result<(Resolved, Vec<PathBuf>)> {
    let (layers, used) = locator.load_layers(explicit)?;
    let resolved = resolve::resolve(layers, env, cli, sources)?;
    Ok((resolved, used))
}
