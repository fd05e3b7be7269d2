pub mod job_executor;
pub mod job_planner;
pub mod output_layout;
pub mod scratch_dir;

pub use job_executor::JobExecutor;
pub use job_planner::{JobPlan, JobPlanner};
pub use output_layout::OutputLayout;
pub use scratch_dir::ScratchDir;
