//! Validated chain record.

use serde::{Deserialize, Serialize};

/// Endpoints of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainUrls {
    pub rpc: String,
    pub rest: String,
    pub socket: String,
}

/// Bech32 address prefixes of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainPrefixes {
    pub prefix: String,
    pub valoper_prefix: String,
    pub cons_prefix: String,
}

/// One chain, parsed from one document and defaulted.
///
/// `prefixes` and `decimals` are set exactly when the record was built with
/// the full schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    /// Name of the generated constant, derived from `name`.
    pub object_name: String,
    pub name: String,
    pub urls: ChainUrls,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefixes: Option<ChainPrefixes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<i64>,
}

/// Derive the constant name for a display name.
///
/// Splits on single spaces, capitalizes the first character of each word,
/// joins the words and appends `Info`. Only ASCII letters are capitalized and
/// the rest of each word is kept as written, so `"cosmos hub"` and
/// `"Cosmos Hub"` both give `CosmosHubInfo` while `"dYdX"` gives `DYdXInfo`.
pub fn object_name_for(name: &str) -> String {
    let mut object_name: String = name.split(' ').map(capitalize_first).collect();
    object_name.push_str("Info");
    object_name
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut capitalized = String::with_capacity(word.len());
            capitalized.push(first.to_ascii_uppercase());
            capitalized.push_str(chars.as_str());
            capitalized
        }
        None => String::new(),
    }
}
