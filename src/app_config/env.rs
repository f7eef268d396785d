use std::env;
use std::str::FromStr;

use tracing::warn;

/// 读取字符串环境变量，若不存在则返回默认值
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// 读取可选字符串环境变量，空值视为未设置
pub fn env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 读取数值型环境变量，无法解析时记录警告并使用默认值
pub fn env_parse_or<T: FromStr>(key: &str, default: T) -> T {
    match env_opt(key) {
        Some(v) => v.parse().unwrap_or_else(|_| {
            warn!("环境变量 {} 的值 {:?} 无法解析，使用默认值", key, v);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_helpers() {
        env::set_var("SOW_INSIGHT_TEST_NUM", "42");
        env::set_var("SOW_INSIGHT_TEST_BAD", "many");
        env::set_var("SOW_INSIGHT_TEST_BLANK", "  ");

        assert_eq!(env_parse_or("SOW_INSIGHT_TEST_NUM", 3usize), 42);
        assert_eq!(env_parse_or("SOW_INSIGHT_TEST_BAD", 3usize), 3);
        assert_eq!(env_opt("SOW_INSIGHT_TEST_BLANK"), None);
        assert_eq!(env_or_default("SOW_INSIGHT_TEST_UNSET", "LOCAL"), "LOCAL");
    }
}
