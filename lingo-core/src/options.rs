use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::store::{DEFAULT_LANGUAGE_NAME, LocalizationStore};
use crate::value::Dictionary;

pub type CallbackFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

/// 语言写入注册表之后触发
pub type OnLanguageImported = Arc<dyn Fn(String, Dictionary) -> CallbackFuture + Send + Sync>;

/// 当前语言切换之后触发，所选语言未导入时字典为 `None`
pub type OnLanguageChanged =
    Arc<dyn Fn(String, Option<Dictionary>) -> CallbackFuture + Send + Sync>;

/// 当前语言缺少某个键时生成替代文本
///
/// 参数依次为：键、当前语言名称、当前字典、格式化参数。
pub type OnLocalizationMissing =
    Arc<dyn Fn(&str, &str, Option<&Dictionary>, &[&str]) -> String + Send + Sync>;

/// [`LocalizationStore`] 的初始状态与回调构建器
///
/// 所有选项都有默认值，只覆盖显式设置的部分。
pub struct StoreOptions {
    pub(crate) imported_languages: HashMap<String, Dictionary>,
    pub(crate) current_language_name: String,
    pub(crate) current_language: Option<Dictionary>,
    pub(crate) on_language_imported: Option<OnLanguageImported>,
    pub(crate) on_language_changed: Option<OnLanguageChanged>,
    pub(crate) on_localization_missing: Option<OnLocalizationMissing>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            imported_languages: HashMap::from([(
                DEFAULT_LANGUAGE_NAME.to_string(),
                Dictionary::new(),
            )]),
            current_language_name: DEFAULT_LANGUAGE_NAME.to_string(),
            current_language: Some(Dictionary::new()),
            on_language_imported: None,
            on_language_changed: None,
            on_localization_missing: None,
        }
    }
}

impl StoreOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// 替换整个初始注册表（包括默认语言）
    ///
    /// 名称在构建时转为小写；大小写冲突时保留原本就是小写的那一项。
    pub fn imported_languages<K: Into<String>>(
        mut self,
        languages: impl IntoIterator<Item = (K, Dictionary)>,
    ) -> Self {
        self.imported_languages = languages
            .into_iter()
            .map(|(name, dict)| (name.into(), dict))
            .collect();
        self
    }

    /// 向初始注册表添加一种语言
    pub fn language(mut self, name: impl Into<String>, dict: Dictionary) -> Self {
        self.imported_languages.insert(name.into(), dict);
        self
    }

    pub fn current_language_name(mut self, name: impl Into<String>) -> Self {
        self.current_language_name = name.into();
        self
    }

    /// 设置初始的当前字典，`None` 表示没有当前语言
    pub fn current_language(mut self, dict: Option<Dictionary>) -> Self {
        self.current_language = dict;
        self
    }

    pub fn on_language_imported<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(String, Dictionary) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let callback: OnLanguageImported =
            Arc::new(move |name: String, dict: Dictionary| -> CallbackFuture {
                Box::pin(f(name, dict))
            });
        self.on_language_imported = Some(callback);
        self
    }

    pub fn on_language_changed<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(String, Option<Dictionary>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let callback: OnLanguageChanged =
            Arc::new(move |name: String, dict: Option<Dictionary>| -> CallbackFuture {
                Box::pin(f(name, dict))
            });
        self.on_language_changed = Some(callback);
        self
    }

    pub fn on_localization_missing<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str, Option<&Dictionary>, &[&str]) -> String + Send + Sync + 'static,
    {
        self.on_localization_missing = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> LocalizationStore {
        LocalizationStore::with_options(self)
    }
}

impl fmt::Debug for StoreOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreOptions")
            .field("imported_languages", &self.imported_languages)
            .field("current_language_name", &self.current_language_name)
            .field("current_language", &self.current_language)
            .field("on_language_imported", &self.on_language_imported.is_some())
            .field("on_language_changed", &self.on_language_changed.is_some())
            .field("on_localization_missing", &self.on_localization_missing.is_some())
            .finish()
    }
}
