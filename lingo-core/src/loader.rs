//! 从 TOML、YAML 或 JSON 读取语言字典
//!
//! 数字与布尔值叶子按文本读取，`null` 会被忽略。

use std::fs;
use std::path::Path;
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::value::Dictionary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Yaml,
    Json,
}

impl Format {
    /// 根据文件扩展名判断格式
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Format::Toml),
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

impl Dictionary {
    pub fn parse(content: &str, format: Format) -> Result<Self> {
        match format {
            Format::Toml => Self::from_toml_str(content),
            Format::Yaml => Self::from_yaml_str(content),
            Format::Json => Self::from_json_str(content),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

/// 读取单个字典文件，格式由扩展名决定
pub fn load_file(path: impl AsRef<Path>) -> Result<Dictionary> {
    let path = path.as_ref();
    let format =
        Format::from_path(path).ok_or_else(|| Error::UnsupportedFormat(path.to_path_buf()))?;
    let content = fs::read_to_string(path)?;
    Dictionary::parse(&content, format)
}

fn load_language_file(path: &Path) -> Option<(String, Dictionary)> {
    Format::from_path(path)?;

    let name = path.file_stem()?.to_str()?.to_string();

    let language = load_file(path)
        .inspect_err(|e| error!("Failed to load language file {}: {}", path.display(), e))
        .ok()?;

    info!("Loaded language: {}", name);
    Some((name, language))
}

/// 加载目录下的所有字典文件，返回按文件名（不含扩展名）排序的列表
///
/// 其他扩展名的文件会被忽略；无法读取或格式错误的字典只记录日志并跳过。
pub fn load_dir(dir: impl AsRef<Path>) -> Result<Vec<(String, Dictionary)>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir)
        .inspect_err(|e| error!("Failed to read language directory {}: {}", dir.display(), e))?;

    let mut languages: Vec<_> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter_map(|path| load_language_file(&path))
        .collect();
    languages.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(languages)
}

/// 编译时嵌入字典文件并解析
///
/// 默认按 TOML 解析，第二个参数可指定 `Yaml` 或 `Json`。
#[macro_export]
macro_rules! include_language {
    ($path:expr) => {
        $crate::value::Dictionary::from_toml_str(include_str!($path))
    };
    ($path:expr, $format:ident) => {
        $crate::value::Dictionary::parse(include_str!($path), $crate::loader::Format::$format)
    };
}
