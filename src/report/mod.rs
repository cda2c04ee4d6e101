/// Report domain layer: group model, manager filtering, report generation.
pub mod errors;
pub mod generator;
pub mod group;

pub use errors::ReportError;
pub use generator::run;
pub use group::ManagerFilter;
