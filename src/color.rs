//! 颜色表 - 颜色名到十六进制色值的映射
//!
//! 每个 `Client` 持有自己的 `ColorRegistry`，不存在进程级全局状态。
//! 未注册的名称原样返回，调用方可以直接传入 `#RRGGBB`。

use std::collections::HashMap;

/// 默认颜色
const DEFAULT_COLORS: &[(&str, &str)] = &[
    ("green", "#008000"),
    ("gray", "#808080"),
    ("red", "#FF0000"),
    ("blue", "#0000FF"),
    ("black", "#000000"),
    ("yellow", "#FFFF00"),
    ("maroon", "#800000"),
    ("purple", "#800080"),
    ("olive", "#808000"),
    ("silver", "#C0C0C0"),
    ("gold", "#FFD700"),
    ("pink", "#FFC0CB"),
    ("coral", "#FF7F50"),
    ("brown", "#A52A2A"),
    ("indigo", "#4B0082"),
    ("aqua", "#00FFFF"),
    ("cyan", "#00FFFF"),
    ("lime", "#00FF00"),
    ("teal", "#008080"),
    ("navy", "#000080"),
    ("sienna", "#A0522D"),
];

/// 颜色表
#[derive(Debug, Clone)]
pub struct ColorRegistry {
    colors: HashMap<String, String>,
}

impl ColorRegistry {
    /// 创建预置默认颜色的颜色表
    pub fn new() -> Self {
        let colors = DEFAULT_COLORS
            .iter()
            .map(|(name, code)| (name.to_string(), code.to_string()))
            .collect();
        Self { colors }
    }

    /// 创建空颜色表
    pub fn empty() -> Self {
        Self {
            colors: HashMap::new(),
        }
    }

    /// 注册颜色，同名覆盖。不校验色值格式。
    pub fn register(&mut self, name: impl Into<String>, code: impl Into<String>) {
        self.colors.insert(name.into(), code.into());
    }

    /// 链式注册
    pub fn with_color(mut self, name: impl Into<String>, code: impl Into<String>) -> Self {
        self.register(name, code);
        self
    }

    /// 解析颜色名（区分大小写），未知名称原样返回
    pub fn resolve<'a>(&'a self, name_or_code: &'a str) -> &'a str {
        self.colors
            .get(name_or_code)
            .map(String::as_str)
            .unwrap_or(name_or_code)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.colors.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for ColorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default_colors() {
        let colors = ColorRegistry::new();
        assert_eq!(colors.resolve("red"), "#FF0000");
        assert_eq!(colors.resolve("gray"), "#808080");
        assert_eq!(colors.len(), DEFAULT_COLORS.len());
    }

    #[test]
    fn test_resolve_unknown_passes_through() {
        let colors = ColorRegistry::new();
        assert_eq!(colors.resolve("#123456"), "#123456");
        assert_eq!(colors.resolve("warning"), "warning");
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let colors = ColorRegistry::new();
        assert_eq!(colors.resolve("Red"), "Red");
    }

    #[test]
    fn test_register_and_overwrite() {
        let mut colors = ColorRegistry::new();
        colors.register("brand", "#ABCDEF");
        assert_eq!(colors.resolve("brand"), "#ABCDEF");

        colors.register("red", "#EE0000");
        assert_eq!(colors.resolve("red"), "#EE0000");
    }

    #[test]
    fn test_registries_are_independent() {
        let a = ColorRegistry::new().with_color("brand", "#111111");
        let b = ColorRegistry::new();

        assert!(a.contains("brand"));
        assert!(!b.contains("brand"));
        assert_eq!(b.resolve("brand"), "brand");
    }

    #[test]
    fn test_empty_registry() {
        let colors = ColorRegistry::empty();
        assert!(colors.is_empty());
        assert_eq!(colors.resolve("red"), "red");
    }
}
