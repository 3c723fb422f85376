//! Data Models
//!
//! Wire types mirroring the Fastidious API's JSON shapes. Notes and
//! collections share one `Note` struct with a type tag; collection-only
//! members are optional and absent on plain notes. The remote service owns
//! these records - this crate only shapes requests and responses around them.

mod note;

pub use note::{
    FieldDefinition, FieldType, Note, NoteType, SelectOption, SortDirection, ViewMode,
};
