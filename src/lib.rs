//! # chaingen: typed chain constants from flat chain files
//!
//! chaingen reads a directory of per-chain documents and writes one
//! TypeScript module with a `ChainInfo` constant per chain.
//!
//! ## Document format
//!
//! ```text
//! # Osmosis mainnet
//! name: Osmosis
//! rpc: https://rpc.osmosis.zone
//! rest: https://lcd.osmosis.zone
//! socket: wss://rpc.osmosis.zone/websocket
//! prefix: osmo
//! decimals: 6
//! ```
//!
//! Only flat `key: value` lines are read. `valoperPrefix` and `consPrefix`
//! default to `<prefix>valoper` and `<prefix>valcon`, `decimals` to 6.
//!
//! ## Generated code
//!
//! ```text
//! export const OsmosisInfo: ChainInfo = {
//!     name: 'Osmosis',
//!     urls: { rpc: ..., rest: ..., socket: ... },
//!     prefixes: { prefix: 'osmo', valoperPrefix: 'osmovaloper', consPrefix: 'osmovalcon' },
//!     decimals: 6,
//! }
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! # async fn run() -> Result<(), chaingen::GenerateError> {
//! let config = chaingen::GeneratorConfig::default();
//! let report = chaingen::generate(&config).await?;
//! for name in report.chain_names() {
//!     println!("{}", name);
//! }
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod chain;
pub mod schema;
pub mod parser;
pub mod error;
pub mod config;

// Code generation framework
pub mod codegen;

// Directory processing and output
pub mod orchestration;

pub mod logs;

// Re-export key types
pub use chain::{object_name_for, ChainConfig, ChainPrefixes, ChainUrls};
pub use schema::{Field, Schema, SchemaKind};
pub use parser::{parse_document, InvalidRecord};
pub use error::{GenerateError, SkipReason};
pub use config::{ConfigOverrides, GeneratorConfig};
pub use codegen::{emit_fragment, render_module, QuoteStyle};
pub use orchestration::{generate, validate, GenerationReport};
