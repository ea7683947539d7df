//! Error localization: locale tags, message catalogs, and template
//! substitution.
//!
//! Localization never fails. A missing template degrades along the chain
//! requested locale -> language only -> default locale -> the error's
//! existing message -> the raw key.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::types::Params;

/// A normalized locale tag such as `en_US` or `zh`.
///
/// Parsing accepts `_` or `-` separators and fixes letter case; it never
/// rejects input — an unrecognized tag simply finds no templates and the
/// fallback chain takes over.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    tag: String,
    language: String,
}

impl Locale {
    /// Parse a tag like `"en_US"`, `"en-us"`, or `"zh"`.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut parts = input.trim().split(['_', '-']);
        let language = parts.next().unwrap_or_default().to_ascii_lowercase();
        let tag = match parts.next().filter(|r| !r.is_empty()) {
            Some(region) => format!("{language}_{}", region.to_ascii_uppercase()),
            None => language.clone(),
        };
        Self { tag, language }
    }

    /// The full normalized tag, e.g. `en_US`.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The language part alone, e.g. `en`.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Default for Locale {
    /// The engine's fixed default locale, `en_US`.
    fn default() -> Self {
        Self::parse("en_US")
    }
}

impl FromStr for Locale {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)
    }
}

/// Message templates keyed by locale tag and message key.
///
/// Templates use named `{placeholder}` substitution filled from an error's
/// message params; `{field}` is always available.
pub struct MessageCatalog {
    bundles: HashMap<String, HashMap<String, String>>,
    default_locale: Locale,
}

impl MessageCatalog {
    /// An empty catalog with the fixed default locale.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bundles: HashMap::new(),
            default_locale: Locale::default(),
        }
    }

    /// The catalog shipped with the engine: `en_US` and `zh_CN` templates
    /// for every built-in message key.
    #[must_use]
    pub fn with_builtin_messages() -> Self {
        let mut catalog = Self::new();
        let en = Locale::parse("en_US");
        let zh = Locale::parse("zh_CN");
        for (key, template) in BUILTIN_EN {
            catalog.add_message(&en, key, template);
        }
        for (key, template) in BUILTIN_ZH {
            catalog.add_message(&zh, key, template);
        }
        catalog
    }

    /// Change the default locale used as the last template fallback.
    #[must_use]
    pub fn default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    /// Register one template for a locale.
    pub fn add_message(&mut self, locale: &Locale, key: &str, template: &str) {
        self.bundles
            .entry(locale.tag().to_owned())
            .or_default()
            .insert(key.to_owned(), template.to_owned());
    }

    /// Template lookup: exact tag, then language only.
    #[must_use]
    pub fn template(&self, key: &str, locale: &Locale) -> Option<&str> {
        let exact = self
            .bundles
            .get(locale.tag())
            .and_then(|bundle| bundle.get(key));
        let by_language = || {
            self.bundles
                .get(locale.language())
                .and_then(|bundle| bundle.get(key))
        };
        exact.or_else(by_language).map(String::as_str)
    }

    /// Resolve a message key to a substituted string, or `None` when no
    /// template exists in the requested or default locale. The caller
    /// applies the remaining fallbacks (existing message, raw key).
    #[must_use]
    pub fn localize(
        &self,
        key: &str,
        params: Option<&Params>,
        field_name: Option<&str>,
        locale: &Locale,
    ) -> Option<String> {
        let template = self
            .template(key, locale)
            .or_else(|| self.template(key, &self.default_locale))?;
        Some(substitute(template, params, field_name))
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::with_builtin_messages()
    }
}

fn substitute(template: &str, params: Option<&Params>, field_name: Option<&str>) -> String {
    let mut message = template.to_owned();
    if let Some(field) = field_name {
        message = message.replace("{field}", field);
    }
    if let Some(params) = params {
        for (name, value) in params {
            message = message.replace(&format!("{{{name}}}"), &value.render());
        }
    }
    message
}

const BUILTIN_EN: &[(&str, &str)] = &[
    ("validation.required", "Field '{field}' is required"),
    ("validation.email.invalid.type", "Field '{field}' must be a string"),
    (
        "validation.email.invalid.format",
        "Field '{field}' is not a valid email address",
    ),
    ("validation.min.length.invalid.type", "Field '{field}' must be a string"),
    ("validation.min.length.param.required", "Min length parameter is required"),
    (
        "validation.min.length",
        "Field '{field}' must be at least {minLength} characters long",
    ),
    ("validation.max.length.invalid.type", "Field '{field}' must be a string"),
    ("validation.max.length.param.required", "Max length parameter is required"),
    (
        "validation.max.length.exceeded",
        "Field '{field}' must be at most {maxLength} characters long",
    ),
    ("validation.range.invalid.type", "Field '{field}' must be a number"),
    (
        "validation.range.param.required",
        "At least one of min or max parameters is required",
    ),
    ("validation.range.min", "Field '{field}' must be at least {min}"),
    ("validation.range.max", "Field '{field}' must be at most {max}"),
    ("validation.regex.invalid.type", "Field '{field}' must be a string"),
    ("validation.regex.param.required", "Regex parameter is required"),
    ("validation.regex.invalid.pattern", "Field '{field}' has an invalid pattern"),
    (
        "validation.regex.not.matched",
        "Field '{field}' does not match the required pattern",
    ),
    ("validation.validator.not.found", "Unknown validator type: {validatorType}"),
];

const BUILTIN_ZH: &[(&str, &str)] = &[
    ("validation.required", "字段'{field}'不能为空"),
    ("validation.email.invalid.type", "字段'{field}'必须是字符串"),
    ("validation.email.invalid.format", "字段'{field}'不是有效的邮箱地址"),
    ("validation.min.length.invalid.type", "字段'{field}'必须是字符串"),
    ("validation.min.length.param.required", "缺少最小长度参数"),
    ("validation.min.length", "字段'{field}'长度不能少于{minLength}个字符"),
    ("validation.max.length.invalid.type", "字段'{field}'必须是字符串"),
    ("validation.max.length.param.required", "缺少最大长度参数"),
    ("validation.max.length.exceeded", "字段'{field}'长度不能超过{maxLength}个字符"),
    ("validation.range.invalid.type", "字段'{field}'必须是数字"),
    ("validation.range.param.required", "至少需要min或max参数之一"),
    ("validation.range.min", "字段'{field}'不能小于{min}"),
    ("validation.range.max", "字段'{field}'不能大于{max}"),
    ("validation.regex.invalid.type", "字段'{field}'必须是字符串"),
    ("validation.regex.param.required", "缺少正则表达式参数"),
    ("validation.regex.invalid.pattern", "字段'{field}'的校验模式无效"),
    ("validation.regex.not.matched", "字段'{field}'不符合要求的格式"),
    ("validation.validator.not.found", "未知的验证器类型: {validatorType}"),
];
