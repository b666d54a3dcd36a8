//! Terraform state handling.
//!
//! - `document`: typed view of a state file
//! - `parser`: tolerant decoding of raw state bytes
//! - `extract`: selection of managed resources and their ids

pub mod document;
pub mod extract;
pub mod parser;

pub use document::{RESERVED_KEYS, RawResource, ResourceMode, StateDocument, StateMetadata};
pub use extract::{PendingResource, extract_managed, resource_id};
pub use parser::{StateParser, StateSource};
