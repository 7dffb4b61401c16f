//! TypeScript emission for chain records.
//!
//! Each [`ChainConfig`] becomes one `export const <Name>Info: ChainInfo = {...}`
//! block. The blocks are appended after a single import line to form the
//! generated module.

use crate::chain::ChainConfig;
use crate::codegen::utils::escape_single_quoted;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Import line the generated module starts with.
pub const DEFAULT_HEADER: &str = "import { ChainInfo } from './types/globals'";

/// How string values are placed inside single-quoted TypeScript literals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    /// Backslashes and single quotes are escaped.
    #[default]
    Escaped,
    /// Values are written as-is. A value containing `'` breaks the output.
    Verbatim,
}

impl QuoteStyle {
    fn quote<'a>(self, value: &'a str) -> Cow<'a, str> {
        match self {
            QuoteStyle::Escaped => escape_single_quoted(value),
            QuoteStyle::Verbatim => Cow::Borrowed(value),
        }
    }
}

/// Render one chain as a TypeScript constant declaration.
///
/// The `prefixes` block and `decimals` line are written only when the record
/// carries them.
///
/// # Example
/// ```ignore
/// let fragment = emit_fragment(&chain, QuoteStyle::Escaped);
/// // export const OsmosisInfo: ChainInfo = {
/// //     name: 'Osmosis',
/// //     ...
/// ```
pub fn emit_fragment(chain: &ChainConfig, style: QuoteStyle) -> String {
    let q = |value: &str| style.quote(value).into_owned();

    let mut code = format!(
        "\n\nexport const {}: ChainInfo = {{\n    name: '{}',\n    urls: {{\n        rpc: '{}',\n        rest: '{}',\n        socket: '{}',\n    }},\n",
        chain.object_name,
        q(&chain.name),
        q(&chain.urls.rpc),
        q(&chain.urls.rest),
        q(&chain.urls.socket),
    );

    if let Some(prefixes) = &chain.prefixes {
        code.push_str(&format!(
            "    prefixes: {{\n        prefix: '{}',\n        valoperPrefix: '{}',\n        consPrefix: '{}',\n    }},\n",
            q(&prefixes.prefix),
            q(&prefixes.valoper_prefix),
            q(&prefixes.cons_prefix),
        ));
    }

    if let Some(decimals) = chain.decimals {
        code.push_str(&format!("    decimals: {},\n", decimals));
    }

    // Four trailing spaces after the brace.
    code.push_str("}    \n");
    code
}

/// Join the header line and the fragments, in the given order.
pub fn render_module<I, S>(header: &str, fragments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fragments
        .into_iter()
        .fold(header.to_string(), |mut module, fragment| {
            module.push_str(fragment.as_ref());
            module
        })
}
