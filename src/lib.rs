pub mod access;
pub mod config;
pub mod error;
pub mod logging;
pub mod materialize;
pub mod naming;
pub mod notification;
pub mod policy;
pub mod scaffold;
pub mod structure;

// Re-export commonly used types for convenience.
pub use access::AccessRecord;
pub use config::{StudyConfig, StudyRecord, ToolConfig};
pub use error::{Result, ScaffoldError};
pub use materialize::{inventory, MaterializeReport, TreeMaterializer};
pub use policy::{write_policy, PolicyOutcome, PolicyStatus};
pub use scaffold::{create_study_folder, scaffold_isa_project, ScaffoldOptions, ScaffoldOutcome};
pub use structure::{resolve, StructureMap, StructureNode};
