//! Refract: a schema-driven field projection engine for JSON APIs.
//!
//! Types implement [`core::traits::Projectable`] and register a schema; the
//! [`core::engine::Engine`] then turns any registered value into a filtered,
//! ordered JSON payload driven by per-request options (field narrowing,
//! optional fields, association expansion, payload keys).
//!
//! ## Crate layout
//! - `core`: schemas, request-option resolution, field selection, recursive
//!   value resolution, caching, and observability counters.
//!
//! The `prelude` module mirrors the surface a hosting API layer uses.

pub use refract_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use refract_core::error::Error;

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        cache::{FieldCache, MemoryCache},
        config::EngineConfig,
        engine::{Engine, SerializeOptions},
        error::{Error, ErrorKind},
        options::{RawOptions, RawParams},
        response::{Serialized, Warning},
        schema::{CacheSpec, Schema, SchemaBuilder, SchemaRegistry},
        traits::{FieldCx, ObjectIdentity, Projectable},
        value::{FieldValue, Json},
    };
    pub use serde::{Deserialize, Serialize};
}
