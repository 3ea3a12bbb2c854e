//! Hotspot credential generation.
//!
//! Pure, synchronous building blocks: the character-set builder
//! ([`charset`]), the batch generator ([`batch`]), the RouterOS command
//! formatter ([`commands`]) and the per-user batch store ([`registry`]).

pub mod batch;
pub mod charset;
pub mod commands;
pub mod registry;

pub use batch::{
    CredentialRecord, GenerateError, GenerateRequest, GeneratorOptions, MAX_INDEX, MIN_INDEX,
    generate, validate,
};
pub use charset::{CharClass, CharClassSet};
pub use commands::{COMMAND_HEADER, command_lines, render};
pub use registry::{BatchMetadata, BatchRegistry, StoredBatch};
