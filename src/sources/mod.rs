//! # 输入源解析
//!
//! 把命令行给出的名称解析为实际存在的文件。
//! 名称不存在且不以 `.out`/`.log` 结尾时，依次尝试 `<name>.out` 和 `<name>.log`。
//! 只检查文件是否存在，不读取内容。
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 调用
//! - 使用 `models/params.rs` 的 InputSource

use crate::error::{PlotspecError, Result};
use crate::models::InputSource;

use std::path::{Path, PathBuf};

/// 自动补全的输出文件扩展名
const OUTPUT_EXTENSIONS: [&str; 2] = ["out", "log"];

/// 解析所有输入源，任一失败则整体失败
pub fn resolve_sources(names: &[String]) -> Result<Vec<InputSource>> {
    if names.is_empty() {
        return Err(PlotspecError::NoInputFiles);
    }

    names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let path = resolve_path(name)?;
            Ok(InputSource {
                index,
                name: name.clone(),
                path,
            })
        })
        .collect()
}

/// 单个名称 → 文件路径
fn resolve_path(name: &str) -> Result<PathBuf> {
    let given = PathBuf::from(name);
    if given.is_file() {
        return Ok(given);
    }

    if !has_output_extension(&given) {
        for ext in OUTPUT_EXTENSIONS {
            let candidate = PathBuf::from(format!("{}.{}", name, ext));
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }

    Err(PlotspecError::InputNotFound {
        path: name.to_string(),
    })
}

fn has_output_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| OUTPUT_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn name_in(dir: &Path, file: &str) -> String {
        dir.join(file).display().to_string()
    }

    #[test]
    fn test_empty_is_error() {
        assert!(matches!(
            resolve_sources(&[]),
            Err(PlotspecError::NoInputFiles)
        ));
    }

    #[test]
    fn test_resolve_existing_and_suffix_fallback() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("benzene.out"), "").unwrap();
        fs::write(dir.path().join("toluene.log"), "").unwrap();

        let names = vec![
            name_in(dir.path(), "benzene.out"),
            name_in(dir.path(), "toluene"),
        ];
        let sources = resolve_sources(&names).unwrap();

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].index, 0);
        assert_eq!(sources[1].index, 1);
        assert_eq!(sources[1].path, dir.path().join("toluene.log"));
        assert_eq!(sources[1].stem(), "toluene");
    }

    #[test]
    fn test_out_preferred_over_log() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("mol.out"), "").unwrap();
        fs::write(dir.path().join("mol.log"), "").unwrap();

        let sources = resolve_sources(&[name_in(dir.path(), "mol")]).unwrap();
        assert_eq!(sources[0].path, dir.path().join("mol.out"));
    }

    #[test]
    fn test_missing_source_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.out"), "").unwrap();

        let names = vec![name_in(dir.path(), "a.out"), name_in(dir.path(), "b.out")];
        match resolve_sources(&names) {
            Err(PlotspecError::InputNotFound { path }) => assert!(path.ends_with("b.out")),
            other => panic!("expected InputNotFound, got {:?}", other),
        }
    }
}
