//! 测试名称解析
//!
//! 定义文件有两种格式，按内容区分而不是扩展名：
//! - JSON：`{ 基因组: { 字段名: 值 } }`，取第一个匹配 "Test Name" 的字段值
//! - 制表符分隔表格：跳过表头，取第一行数据的第二列
//!
//! 先尝试 JSON，失败后对同一内容尝试表格。两者都拿不到名称时返回 `None`。

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value as JsonValue;

use crate::error::{AppResult, ConfigError, FileError};

/// 匹配 "Test Name"、"TestName"、"T.Name"、"test_name" 等字段名
static TEST_NAME_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^T(est)?\.?[-._ ]?Name").expect("test name pattern is valid")
});

/// JSON 解析结果
#[derive(Debug, PartialEq, Eq)]
enum StructuredParse {
    /// 内容不是 `{ 基因组: { 字段: 值 } }` 形式的 JSON
    NotStructured,
    /// 是 JSON，名称可能不存在
    Parsed(Option<String>),
}

/// 读取定义文件并解析测试名称
///
/// # 返回
/// - `Ok(Some(name))`: 找到名称
/// - `Ok(None)`: 两种格式都没有名称（不是错误）
/// - `Err`: 文件不存在或无法读取
pub async fn resolve_test_name(path: &Path) -> AppResult<Option<String>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::TestDefinitionNotFound {
                path: path.to_path_buf(),
            }
            .into())
        }
        Err(e) => return Err(FileError::read_failed(path, e).into()),
    };

    Ok(resolve_test_name_from_str(&content))
}

/// 从定义文件内容中解析测试名称
pub fn resolve_test_name_from_str(content: &str) -> Option<String> {
    let name = match parse_structured(content) {
        StructuredParse::Parsed(name) => name,
        StructuredParse::NotStructured => {
            tracing::debug!("定义文件不是 JSON 映射，按制表符表格解析");
            parse_tabular(content)
        }
    };
    name.filter(|n| !n.is_empty())
}

fn parse_structured(content: &str) -> StructuredParse {
    let Ok(JsonValue::Object(genomes)) = serde_json::from_str::<JsonValue>(content) else {
        return StructuredParse::NotStructured;
    };

    let name = genomes
        .values()
        .filter_map(JsonValue::as_object)
        .flat_map(|fields| fields.iter())
        .find(|(key, _)| TEST_NAME_FIELD.is_match(key))
        .map(|(_, value)| match value {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        });

    StructuredParse::Parsed(name)
}

fn parse_tabular(content: &str) -> Option<String> {
    let first_row = content.lines().nth(1)?;
    first_row
        .trim_end_matches('\r')
        .split('\t')
        .nth(1)
        .map(unquote_cell)
}

/// 表格单元格可能带 CSV 风格的双引号：`"CGF40"` -> `CGF40`，`""` -> `"`
fn unquote_cell(cell: &str) -> String {
    match cell
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\"\"", "\""),
        None => cell.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use tempfile::TempDir;

    #[test]
    fn test_structured_test_name() {
        let content = r#"{
            "SAL-001": { "Marker": "aadA", "TEST NAME": "CGF119" },
            "SAL-002": { "Test Name": "other" }
        }"#;
        assert_eq!(resolve_test_name_from_str(content), Some("CGF119".to_string()));
    }

    #[test]
    fn test_field_name_variants() {
        for field in ["Test Name", "TestName", "T.Name", "test_name", "t-name", "Test.Name"] {
            let content = format!(r#"{{"g": {{"{field}": "CGF40"}}}}"#);
            assert_eq!(
                resolve_test_name_from_str(&content),
                Some("CGF40".to_string()),
                "field {field}"
            );
        }
    }

    #[test]
    fn test_structured_without_name_is_none() {
        let content = r#"{"SAL-001": {"Marker": "aadA", "Length": 120}}"#;
        assert_eq!(parse_structured(content), StructuredParse::Parsed(None));
        assert_eq!(resolve_test_name_from_str(content), None);
    }

    #[test]
    fn test_tabular_second_column() {
        let content = "id\tname\nX1\tCGF40\nX2\tCGF41\n";
        assert_eq!(resolve_test_name_from_str(content), Some("CGF40".to_string()));
    }

    #[test]
    fn test_tabular_crlf() {
        let content = "id\tname\r\nX1\tCGF40\r\n";
        assert_eq!(resolve_test_name_from_str(content), Some("CGF40".to_string()));
    }

    #[test]
    fn test_tabular_quoted_cell() {
        let content = "\"id\"\t\"name\"\nX1\t\"CGF40\"\n";
        assert_eq!(resolve_test_name_from_str(content), Some("CGF40".to_string()));
        assert_eq!(unquote_cell(r#""CGF ""v2""""#), r#"CGF "v2""#);
        assert_eq!(unquote_cell("\""), "\"");
        assert_eq!(unquote_cell("CGF40"), "CGF40");
    }

    #[test]
    fn test_tabular_header_only_or_short_row() {
        assert_eq!(resolve_test_name_from_str("id\tname\n"), None);
        assert_eq!(resolve_test_name_from_str("id\tname\nX1\n"), None);
        assert_eq!(resolve_test_name_from_str(""), None);
    }

    #[test]
    fn test_json_array_falls_back_to_tabular() {
        assert_eq!(parse_structured("[1, 2, 3]"), StructuredParse::NotStructured);
        assert_eq!(resolve_test_name_from_str("[1, 2, 3]"), None);
    }

    #[tokio::test]
    async fn test_resolve_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("CGF119.markers");
        std::fs::write(&path, r#"{"g1": {"Test Name": "CGF119"}}"#).unwrap();

        assert_eq!(
            resolve_test_name(&path).await.unwrap(),
            Some("CGF119".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_definition_is_config_error() {
        let tmp = TempDir::new().unwrap();
        let err = resolve_test_name(&tmp.path().join("missing.json"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::TestDefinitionNotFound { .. })
        ));
    }
}
