//! 任务规划
//!
//! 对每个组装文件判断是否需要运行：结果文件已存在则跳过，
//! 否则构建外部工具的命令行。
//!
//! 命令行顺序固定（外部工具对部分参数位置敏感）：
//!
//! ```text
//! <mistcall...> -b -j <outpath>/<label><testname>.json -a <alleles> -t <testtype> -T <outpath>/temp/<label>/ <assembly>
//! ```

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::models::{JobDescriptor, TestDescriptor, WorkItem};
use crate::services::output_layout::OutputLayout;

/// 任务规划器
pub struct JobPlanner {
    layout: OutputLayout,
    test_name: String,
    definition_path: PathBuf,
    alleles: PathBuf,
    base_invocation: Vec<OsString>,
}

impl JobPlanner {
    /// 创建规划器
    ///
    /// # 参数
    /// - `layout`: 输出目录布局
    /// - `test`: 已解析的测试定义
    /// - `alleles`: 等位基因参考目录
    /// - `base_invocation`: 外部工具基础调用，例如 `["mist"]`
    pub fn new(
        layout: OutputLayout,
        test: &TestDescriptor,
        alleles: impl Into<PathBuf>,
        base_invocation: &[String],
    ) -> Self {
        Self {
            layout,
            test_name: test.name_segment().to_string(),
            definition_path: test.definition_path.clone(),
            alleles: alleles.into(),
            base_invocation: base_invocation.iter().map(OsString::from).collect(),
        }
    }

    /// 为所有组装文件生成任务（惰性，只能消费一次）
    pub fn plan<I>(&self, items: I) -> JobPlan<'_, I::IntoIter>
    where
        I: IntoIterator<Item = WorkItem>,
    {
        JobPlan {
            planner: self,
            items: items.into_iter(),
            seen: HashSet::new(),
            skipped: 0,
            duplicates: 0,
        }
    }

    /// 单个组装文件：结果已存在时返回 `None`
    pub fn plan_item(&self, item: &WorkItem) -> Option<JobDescriptor> {
        let result_path = self.layout.result_path(&item.label, &self.test_name);
        if result_path.is_file() {
            info!(
                "⏭️ 跳过菌株 {}：本测试的结果文件已存在 ({})",
                item.label,
                result_path.display()
            );
            return None;
        }
        Some(self.build(item, result_path))
    }

    fn build(&self, item: &WorkItem, result_path: PathBuf) -> JobDescriptor {
        let scratch_dir = self.layout.scratch_dir(&item.label);

        let mut args = self.base_invocation.clone();
        args.push("-b".into());
        args.push("-j".into());
        args.push(result_path.clone().into_os_string());
        args.push("-a".into());
        args.push(self.alleles.clone().into_os_string());
        args.push("-t".into());
        args.push(self.definition_path.clone().into_os_string());
        args.push("-T".into());
        args.push(dir_arg(&scratch_dir));
        args.push(item.path.clone().into_os_string());

        JobDescriptor {
            label: item.label.clone(),
            invocation_args: args,
            scratch_dir,
            result_path,
        }
    }
}

/// 目录参数带结尾分隔符
fn dir_arg(path: &Path) -> OsString {
    let mut arg = path.as_os_str().to_os_string();
    arg.push(std::path::MAIN_SEPARATOR_STR);
    arg
}

/// 惰性任务序列
///
/// 临时目录和结果文件都由标签决定，同一标签只规划第一次出现的文件
pub struct JobPlan<'a, I> {
    planner: &'a JobPlanner,
    items: I,
    seen: HashSet<String>,
    skipped: usize,
    duplicates: usize,
}

impl<I> JobPlan<'_, I> {
    /// 目前为止因结果已存在而跳过的数量
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// 目前为止因标签重复而跳过的数量
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

impl<I> Iterator for JobPlan<'_, I>
where
    I: Iterator<Item = WorkItem>,
{
    type Item = JobDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        for item in self.items.by_ref() {
            if !self.seen.insert(item.label.clone()) {
                warn!(
                    "⚠️ 跳过 {}：菌株标签 {} 与之前的组装文件重复",
                    item.path.display(),
                    item.label
                );
                self.duplicates += 1;
                continue;
            }
            match self.planner.plan_item(&item) {
                Some(job) => return Some(job),
                None => self.skipped += 1,
            }
        }
        None
    }
}
