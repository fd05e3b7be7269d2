use std::path::PathBuf;

/// 测试/标记定义
///
/// 启动时解析一次，之后只读，在所有任务间共享
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDescriptor {
    /// 定义文件路径（JSON 或制表符分隔表格）
    pub definition_path: PathBuf,
    /// 从定义文件中解析出的测试名称，可能不存在
    pub resolved_name: Option<String>,
}

impl TestDescriptor {
    pub fn new(definition_path: impl Into<PathBuf>, resolved_name: Option<String>) -> Self {
        Self {
            definition_path: definition_path.into(),
            resolved_name,
        }
    }

    /// 结果文件名中使用的名称片段，未解析时为空字符串
    pub fn name_segment(&self) -> &str {
        self.resolved_name.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_segment() {
        let resolved = TestDescriptor::new("CGF119.json", Some("CGF119".to_string()));
        assert_eq!(resolved.name_segment(), "CGF119");

        let unresolved = TestDescriptor::new("unknown.json", None);
        assert_eq!(unresolved.name_segment(), "");
    }
}
