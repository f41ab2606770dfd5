//! Core runtime for Refract: schemas, request-option resolution, field
//! selection, recursive value resolution, and the ergonomics exported via
//! the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod obs;
pub mod options;
pub mod response;
pub mod schema;
pub mod select;
pub mod traits;
pub mod value;

pub(crate) mod resolve;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No internal walkers or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        cache::{FieldCache, MemoryCache},
        config::EngineConfig,
        engine::{Engine, SerializeOptions},
        error::Error,
        options::RawParams,
        response::{Serialized, Warning},
        schema::{CacheSpec, Schema, SchemaBuilder, SchemaRegistry},
        traits::{FieldCx, ObjectIdentity, Projectable},
        value::{FieldValue, Json},
    };
}
