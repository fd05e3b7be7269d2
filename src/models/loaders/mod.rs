pub mod assembly_loader;
pub mod test_name_loader;

pub use assembly_loader::discover_assemblies;
pub use test_name_loader::{resolve_test_name, resolve_test_name_from_str};
