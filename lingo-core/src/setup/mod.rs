//! YAML 格式的存储初始配置，支持环境变量替换
//!
//! `${VAR}` 与 `${VAR:默认值}` 会被替换为环境变量的值；
//! 翻译文本里需要原样保留的占位符写作 `$${VAR}`。
//!
//! ```yaml
//! current_language_name: ${APP_LANG:en}
//! imported_languages:
//!   en:
//!     greeting: "Hello, {0}!"
//! ```

use dotenvy::dotenv;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

use crate::error::Result;
use crate::options::StoreOptions;
use crate::value::Dictionary;

/// 配置文档描述的初始状态
///
/// 未填写的字段沿用 [`StoreOptions`] 的默认值。
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreSetup {
    pub imported_languages: Option<HashMap<String, Dictionary>>,
    pub current_language_name: Option<String>,
    pub current_language: Option<Dictionary>,
}

impl StoreSetup {
    /// 转换为 [`StoreOptions`]，回调仍需在代码中设置
    pub fn into_options(self) -> StoreOptions {
        let mut options = StoreOptions::new();
        if let Some(languages) = self.imported_languages {
            options = options.imported_languages(languages);
        }
        if let Some(name) = self.current_language_name {
            options = options.current_language_name(name);
        }
        if let Some(language) = self.current_language {
            options = options.current_language(Some(language));
        }
        options
    }
}

impl From<StoreSetup> for StoreOptions {
    fn from(setup: StoreSetup) -> Self {
        setup.into_options()
    }
}

/// 替换配置中的环境变量占位符
///
/// 变量不存在且没有默认值时替换为空字符串；`$${VAR}` 转义为字面量 `${VAR}`。
fn substitute_env_vars(content: &str) -> String {
    // .env 文件不存在时忽略
    let _ = dotenv();

    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let re = PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\$(\$)?\{([A-Z0-9_]+)(?::([^}]*))?\}").expect("Invalid regex pattern")
    });

    re.replace_all(content, |caps: &regex::Captures| {
        if caps.get(1).is_some() {
            return caps[0][1..].to_string();
        }
        let name = &caps[2];
        match env::var(name) {
            Ok(value) => value,
            Err(_) => {
                let default = caps.get(3).map_or("", |m| m.as_str());
                debug!(variable = name, default, "Setup variable not set, using default");
                default.to_string()
            }
        }
    })
    .into_owned()
}

/// 从文件加载配置
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<StoreSetup> {
    let content = fs::read_to_string(path)?;
    load_from_str(&content)
}

/// 从字符串加载配置
pub fn load_from_str(content: &str) -> Result<StoreSetup> {
    let replaced = substitute_env_vars(content);
    Ok(serde_yaml::from_str(&replaced)?)
}

/// 编译时嵌入配置文件
#[macro_export]
macro_rules! include_setup {
    ($path:expr) => {
        $crate::setup::load_from_str(include_str!($path))
    };
}
