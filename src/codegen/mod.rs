//! TypeScript code generation for chain records.
//!
//! This module turns validated [`ChainConfig`](crate::chain::ChainConfig)
//! records into the source of the generated `chain-infos.ts` module.

pub mod ts_emitter;
pub mod utils;
pub mod fs_utils;

// Re-export key types
pub use ts_emitter::{emit_fragment, render_module, QuoteStyle, DEFAULT_HEADER};
pub use utils::{escape_single_quoted, IdentifierCheck};
