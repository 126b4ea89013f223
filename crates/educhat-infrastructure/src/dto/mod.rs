//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs represent the versioned schema for persisting data. They are
//! private to the infrastructure layer and keep the storage format
//! independent of the domain types.
//!
//! ### Session Version History
//! - **1.0.0**: Unversioned entries; `selected_model` and `title` optional
//! - **1.1.0**: Flat entries carrying their own `version` field

mod session;

pub use session::{
    MessageV1_0_0, SESSION_ENTITY, SearchResultItemV1_0_0, SessionV1_0_0, SessionV1_1_0,
    create_session_migrator, session_entries,
};
