pub mod job;
pub mod loaders;
pub mod test_descriptor;
pub mod work_item;

pub use job::{JobDescriptor, JobFailure, JobReport};
pub use loaders::{discover_assemblies, resolve_test_name};
pub use test_descriptor::TestDescriptor;
pub use work_item::WorkItem;
