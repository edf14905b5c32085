//! 字符串工具模块

/// 去掉路径参数两端的花括号：`{alice}` -> `alice`
/// 兼容旧客户端按 `/:{wname}` 形式拼接的 URL
pub fn trim_brackets(s: &str) -> &str {
    s.trim_end_matches('}').trim_start_matches('{')
}

/// 检查字符串是否为空或只包含空白字符
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
