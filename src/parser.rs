//! Line-oriented parser for chain documents.
//!
//! Documents are flat `key: value` text:
//!
//! ```text
//! # Cosmos Hub mainnet
//! name: Cosmos Hub
//! rpc: https://rpc.cosmos.network
//! rest: https://api.cosmos.network
//! socket: wss://rpc.cosmos.network/websocket
//! prefix: cosmos
//! ```
//!
//! Each line is trimmed, `#` lines are comments, and the line is split on the
//! first `": "`. Anything that does not yield a non-empty key and value, and
//! any key outside the schema, is ignored. Nested YAML, lists and multiline
//! values are not supported.

use crate::chain::{object_name_for, ChainConfig, ChainPrefixes, ChainUrls};
use crate::schema::{Field, Requirement, Schema};
use thiserror::Error;

const DELIMITER: &str = ": ";

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Why a document did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRecord {
    #[error("missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("decimals is not an integer: '{0}'")]
    InvalidDecimals(String),
}

/// Values collected from a document, one slot per [`Field`].
#[derive(Debug, Default)]
struct Draft {
    values: [Option<String>; Field::COUNT],
}

impl Draft {
    fn get(&self, field: Field) -> Option<&str> {
        self.values[field.index()].as_deref()
    }

    fn set(&mut self, field: Field, value: String) {
        self.values[field.index()] = Some(value);
    }

    fn take(&mut self, field: Field) -> Option<String> {
        self.values[field.index()].take()
    }
}

/// Parse one document against `schema`.
///
/// Pure: no I/O and no logging. A document is either turned into a complete,
/// defaulted [`ChainConfig`] or rejected as a whole.
pub fn parse_document(document: &str, schema: &Schema) -> Result<ChainConfig, InvalidRecord> {
    let mut draft = Draft::default();

    for line in document.split('\n') {
        if let Some((field, value)) = parse_line(line, schema) {
            draft.set(field, value.to_string());
        }
    }

    let missing: Vec<&'static str> = schema
        .required_fields()
        .filter(|field| draft.get(*field).map_or(true, str::is_empty))
        .map(Field::key)
        .collect();
    if !missing.is_empty() {
        return Err(InvalidRecord::MissingFields(missing));
    }

    apply_defaults(&mut draft, schema);
    build_record(draft, schema)
}

/// Split one line into a known field and its value.
fn parse_line<'a>(line: &'a str, schema: &Schema) -> Option<(Field, &'a str)> {
    let line = line.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK);
    if line.starts_with('#') {
        return None;
    }

    let (key, value) = line.split_once(DELIMITER)?;
    if key.is_empty() || value.is_empty() {
        return None;
    }

    schema.lookup(key).map(|spec| (spec.field, value))
}

fn apply_defaults(draft: &mut Draft, schema: &Schema) {
    // Rules only read required fields, so the order defaults are applied in doesn't matter.
    let defaults: Vec<(Field, String)> = schema
        .fields()
        .filter(|spec| draft.get(spec.field).is_none())
        .filter_map(|spec| match &spec.requirement {
            Requirement::Optional(rule) => rule
                .resolve(|field| draft.get(field))
                .map(|value| (spec.field, value)),
            Requirement::Required => None,
        })
        .collect();

    for (field, value) in defaults {
        draft.set(field, value);
    }
}

fn build_record(mut draft: Draft, schema: &Schema) -> Result<ChainConfig, InvalidRecord> {
    let decimals = match draft.take(Field::Decimals) {
        Some(raw) if schema.includes(Field::Decimals) => Some(
            parse_leading_integer(&raw).ok_or(InvalidRecord::InvalidDecimals(raw))?,
        ),
        _ => None,
    };

    let prefixes = if schema.includes(Field::Prefix) {
        Some(ChainPrefixes {
            prefix: draft.take(Field::Prefix).unwrap_or_default(),
            valoper_prefix: draft.take(Field::ValoperPrefix).unwrap_or_default(),
            cons_prefix: draft.take(Field::ConsPrefix).unwrap_or_default(),
        })
    } else {
        None
    };

    let name = draft.take(Field::Name).unwrap_or_default();

    Ok(ChainConfig {
        object_name: object_name_for(&name),
        name,
        urls: ChainUrls {
            rpc: draft.take(Field::Rpc).unwrap_or_default(),
            rest: draft.take(Field::Rest).unwrap_or_default(),
            socket: draft.take(Field::Socket).unwrap_or_default(),
        },
        prefixes,
        decimals,
    })
}

/// Parse an optional sign followed by digits, ignoring whatever follows the
/// digits (`"18abc"` -> 18). A `0x`/`0X` prefix switches to hexadecimal
/// (`"0x12"` -> 18). `None` when there are no digits or the number does not
/// fit in an `i64`.
pub fn parse_leading_integer(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (negative, unsigned) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let (radix, digits) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };
    let digits_len = digits.chars().take_while(|c| c.is_digit(radix)).count();
    if digits_len == 0 {
        return None;
    }

    let digits = &digits[..digits_len];
    if negative {
        i64::from_str_radix(&format!("-{}", digits), radix).ok()
    } else {
        i64::from_str_radix(digits, radix).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COSMOS_HUB: &str = "\
# Cosmos Hub mainnet
name: Cosmos Hub
rpc: https://rpc.cosmos.network
rest: https://api.cosmos.network
socket: wss://rpc.cosmos.network/websocket
prefix: cosmos
";

    #[test]
    fn test_parse_full_document_with_defaults() {
        let chain = parse_document(COSMOS_HUB, &Schema::full()).unwrap();

        assert_eq!(chain.object_name, "CosmosHubInfo");
        assert_eq!(chain.name, "Cosmos Hub");
        assert_eq!(chain.urls.rpc, "https://rpc.cosmos.network");
        assert_eq!(chain.urls.rest, "https://api.cosmos.network");
        assert_eq!(chain.urls.socket, "wss://rpc.cosmos.network/websocket");
        assert_eq!(chain.decimals, Some(6));

        let prefixes = chain.prefixes.unwrap();
        assert_eq!(prefixes.prefix, "cosmos");
        assert_eq!(prefixes.valoper_prefix, "cosmosvaloper");
        assert_eq!(prefixes.cons_prefix, "cosmosvalcon");
    }

    #[test]
    fn test_explicit_optional_values_win_over_defaults() {
        let doc = format!(
            "{}decimals: 18\nvaloperPrefix: customvaloper\nconsPrefix: customvalcons\n",
            COSMOS_HUB
        );
        let chain = parse_document(&doc, &Schema::full()).unwrap();
        let prefixes = chain.prefixes.unwrap();

        assert_eq!(chain.decimals, Some(18));
        assert_eq!(prefixes.valoper_prefix, "customvaloper");
        assert_eq!(prefixes.cons_prefix, "customvalcons");
    }

    #[test]
    fn test_zero_decimals_is_kept() {
        let doc = format!("{}decimals: 0\n", COSMOS_HUB);
        let chain = parse_document(&doc, &Schema::full()).unwrap();
        assert_eq!(chain.decimals, Some(0));
    }

    #[test]
    fn test_decimals_leading_integer() {
        let doc = format!("{}decimals: 18 (atto)\n", COSMOS_HUB);
        let chain = parse_document(&doc, &Schema::full()).unwrap();
        assert_eq!(chain.decimals, Some(18));
    }

    #[test]
    fn test_non_numeric_decimals_rejected() {
        let doc = format!("{}decimals: six\n", COSMOS_HUB);
        assert_eq!(
            parse_document(&doc, &Schema::full()),
            Err(InvalidRecord::InvalidDecimals("six".to_string()))
        );
    }

    #[test]
    fn test_later_decimals_overrides_bad_one() {
        let doc = format!("{}decimals: six\ndecimals: 8\n", COSMOS_HUB);
        let chain = parse_document(&doc, &Schema::full()).unwrap();
        assert_eq!(chain.decimals, Some(8));
    }

    #[test]
    fn test_missing_socket_is_invalid() {
        let doc = "name: Juno\nrpc: https://rpc.juno\nrest: https://lcd.juno\nprefix: juno\n";
        assert_eq!(
            parse_document(doc, &Schema::full()),
            Err(InvalidRecord::MissingFields(vec!["socket"]))
        );
    }

    #[test]
    fn test_missing_prefix_only_matters_for_full_schema() {
        let doc = "name: Juno\nrpc: r\nrest: l\nsocket: s\n";
        assert_eq!(
            parse_document(doc, &Schema::full()),
            Err(InvalidRecord::MissingFields(vec!["prefix"]))
        );

        let chain = parse_document(doc, &Schema::basic()).unwrap();
        assert_eq!(chain.object_name, "JunoInfo");
        assert_eq!(chain.prefixes, None);
        assert_eq!(chain.decimals, None);
    }

    #[test]
    fn test_basic_schema_ignores_full_only_keys() {
        let doc = "name: Juno\nrpc: r\nrest: l\nsocket: s\nprefix: juno\ndecimals: 6\n";
        let chain = parse_document(doc, &Schema::basic()).unwrap();
        assert_eq!(chain.prefixes, None);
        assert_eq!(chain.decimals, None);
    }

    #[test]
    fn test_comment_only_document_is_invalid() {
        let doc = "# name: Cosmos Hub\n# rpc: https://rpc\n";
        let err = parse_document(doc, &Schema::full()).unwrap_err();
        assert_eq!(
            err,
            InvalidRecord::MissingFields(vec!["name", "rpc", "rest", "socket", "prefix"])
        );
        assert_eq!(
            err.to_string(),
            "missing required field(s): name, rpc, rest, socket, prefix"
        );
    }

    #[test]
    fn test_malformed_lines_are_ignored() {
        let doc = format!(
            "{}this line has no delimiter\nname:Missing Space\n: orphan value\nrest: \n",
            COSMOS_HUB
        );
        let chain = parse_document(&doc, &Schema::full()).unwrap();
        assert_eq!(chain.name, "Cosmos Hub");
        assert_eq!(chain.urls.rest, "https://api.cosmos.network");
    }

    #[test]
    fn test_value_split_on_first_delimiter_only() {
        let doc = COSMOS_HUB.replace(
            "rest: https://api.cosmos.network",
            "rest: https://api.cosmos.network/?q=a: b",
        );
        let chain = parse_document(&doc, &Schema::full()).unwrap();
        assert_eq!(chain.urls.rest, "https://api.cosmos.network/?q=a: b");
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let doc = format!("{}name: Cosmos Hub Testnet\n", COSMOS_HUB);
        let chain = parse_document(&doc, &Schema::full()).unwrap();
        assert_eq!(chain.name, "Cosmos Hub Testnet");
        assert_eq!(chain.object_name, "CosmosHubTestnetInfo");
    }

    #[test]
    fn test_whitespace_trimmed_but_interior_kept() {
        let doc = COSMOS_HUB.replace("name: Cosmos Hub", "   name: Cosmos   Hub  \r");
        let chain = parse_document(&doc, &Schema::full()).unwrap();
        assert_eq!(chain.name, "Cosmos   Hub");
        assert_eq!(chain.object_name, "CosmosHubInfo");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let doc = format!("{}objectName: Hijacked\nchainId: cosmoshub-4\n", COSMOS_HUB);
        let chain = parse_document(&doc, &Schema::full()).unwrap();
        assert_eq!(chain.object_name, "CosmosHubInfo");
    }

    #[test]
    fn test_zero_text_is_a_valid_value() {
        let doc = COSMOS_HUB.replace("name: Cosmos Hub", "name: 0");
        let chain = parse_document(&doc, &Schema::full()).unwrap();
        assert_eq!(chain.name, "0");
        assert_eq!(chain.object_name, "0Info");
    }

    #[test]
    fn test_parse_leading_integer() {
        assert_eq!(parse_leading_integer("6"), Some(6));
        assert_eq!(parse_leading_integer("-3"), Some(-3));
        assert_eq!(parse_leading_integer("+12"), Some(12));
        assert_eq!(parse_leading_integer("42abc"), Some(42));
        assert_eq!(parse_leading_integer("1.5"), Some(1));
        assert_eq!(parse_leading_integer("abc"), None);
        assert_eq!(parse_leading_integer("-"), None);
        assert_eq!(parse_leading_integer("99999999999999999999"), None);
        assert_eq!(parse_leading_integer("-9223372036854775808"), Some(i64::MIN));
    }

    #[test]
    fn test_parse_leading_integer_hex_prefix() {
        assert_eq!(parse_leading_integer("0x12"), Some(18));
        assert_eq!(parse_leading_integer("0XfF"), Some(255));
        assert_eq!(parse_leading_integer("-0x10"), Some(-16));
        assert_eq!(parse_leading_integer("0x1g"), Some(1));
        assert_eq!(parse_leading_integer("0x"), None);
        assert_eq!(parse_leading_integer("012"), Some(12));
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let doc = "\u{FEFF}name: Osmosis\nrpc: r\nrest: l\nsocket: s\nprefix: osmo\n";
        let chain = parse_document(doc, &Schema::full()).unwrap();
        assert_eq!(chain.name, "Osmosis");
        assert_eq!(chain.object_name, "OsmosisInfo");

        let commented = format!("\u{FEFF}{}", COSMOS_HUB);
        let chain = parse_document(&commented, &Schema::full()).unwrap();
        assert_eq!(chain.name, "Cosmos Hub");
    }
}
