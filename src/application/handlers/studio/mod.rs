//! Studio listing handlers.

mod update_studio_types;

pub use update_studio_types::{
    UpdateStudioTypesCommand, UpdateStudioTypesHandler, UpdateStudioTypesResult,
};
