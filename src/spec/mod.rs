//! OpenAPI document handling: wire types, validated operations, the
//! operation index, and the loader that keeps the index fresh.

mod document;
mod index;
mod loader;
mod operation;
mod pseudo;

pub use document::{ApiDocument, BuildInfo, DocumentInfo, RawOperation, RawParameter, Server};
pub use index::OperationIndex;
pub use loader::SpecLoader;
pub use operation::{Operation, OperationParameter, ParameterLocation};
pub use pseudo::{default_pseudo_resources, PseudoResource};
