mod arch;
mod db;

pub use arch::{ArchDiagram, arch_graph, arch_options};
pub use db::{DatabaseDiagram, database_graph, database_options};
