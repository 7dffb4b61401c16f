//! Field schema for chain documents.
//!
//! A [`Schema`] is the allowlist of document keys the parser accepts, in
//! declaration order, together with whether each field is required or how it
//! is defaulted when absent. Both supported layouts ([`SchemaKind::Full`] and
//! [`SchemaKind::Basic`]) are expressed as data over the same [`Field`] set, so
//! the parser and emitter never branch on the layout by hand.

use clap::ValueEnum;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every field a chain document can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Rpc,
    Rest,
    Socket,
    Decimals,
    Prefix,
    ValoperPrefix,
    ConsPrefix,
}

impl Field {
    /// Number of fields; sizes the parser's draft.
    pub const COUNT: usize = 8;

    /// Key as written in documents (`key: value`).
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Rpc => "rpc",
            Field::Rest => "rest",
            Field::Socket => "socket",
            Field::Decimals => "decimals",
            Field::Prefix => "prefix",
            Field::ValoperPrefix => "valoperPrefix",
            Field::ConsPrefix => "consPrefix",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How a field with no value in the document gets one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultRule {
    /// A fixed value.
    Literal(&'static str),
    /// Another field's value with a suffix appended, e.g. `cosmos` -> `cosmosvaloper`.
    Suffixed { base: Field, suffix: &'static str },
}

impl DefaultRule {
    /// Compute the default. `lookup` returns the already-accumulated value of a field.
    ///
    /// Returns `None` only when a `Suffixed` rule's base field has no value.
    pub fn resolve<'a, F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(Field) -> Option<&'a str>,
    {
        match self {
            DefaultRule::Literal(value) => Some((*value).to_string()),
            DefaultRule::Suffixed { base, suffix } => {
                lookup(*base).map(|base| format!("{}{}", base, suffix))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional(DefaultRule),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub requirement: Requirement,
}

impl FieldSpec {
    fn required(field: Field) -> Self {
        Self { field, requirement: Requirement::Required }
    }

    fn optional(field: Field, default: DefaultRule) -> Self {
        Self { field, requirement: Requirement::Optional(default) }
    }

    pub fn is_required(&self) -> bool {
        matches!(self.requirement, Requirement::Required)
    }
}

/// Which document layout to accept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// Endpoints, address prefixes and decimals.
    #[default]
    Full,
    /// Name and endpoints only.
    Basic,
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaKind::Full => f.write_str("full"),
            SchemaKind::Basic => f.write_str("basic"),
        }
    }
}

/// Ordered allowlist of document keys.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: IndexMap<&'static str, FieldSpec>,
}

impl Schema {
    fn from_specs(specs: Vec<FieldSpec>) -> Self {
        let fields = specs
            .into_iter()
            .map(|spec| (spec.field.key(), spec))
            .collect();
        Self { fields }
    }

    /// `name, rpc, rest, socket, decimals, prefix, valoperPrefix, consPrefix`.
    pub fn full() -> Self {
        Self::from_specs(vec![
            FieldSpec::required(Field::Name),
            FieldSpec::required(Field::Rpc),
            FieldSpec::required(Field::Rest),
            FieldSpec::required(Field::Socket),
            FieldSpec::optional(Field::Decimals, DefaultRule::Literal("6")),
            FieldSpec::required(Field::Prefix),
            FieldSpec::optional(
                Field::ValoperPrefix,
                DefaultRule::Suffixed { base: Field::Prefix, suffix: "valoper" },
            ),
            FieldSpec::optional(
                Field::ConsPrefix,
                DefaultRule::Suffixed { base: Field::Prefix, suffix: "valcon" },
            ),
        ])
    }

    /// `name, rpc, rest, socket`.
    pub fn basic() -> Self {
        Self::from_specs(vec![
            FieldSpec::required(Field::Name),
            FieldSpec::required(Field::Rpc),
            FieldSpec::required(Field::Rest),
            FieldSpec::required(Field::Socket),
        ])
    }

    pub fn for_kind(kind: SchemaKind) -> Self {
        match kind {
            SchemaKind::Full => Self::full(),
            SchemaKind::Basic => Self::basic(),
        }
    }

    /// Look up a document key. Keys are case-sensitive.
    pub fn lookup(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.get(key)
    }

    pub fn includes(&self, field: Field) -> bool {
        self.fields.contains_key(field.key())
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.values()
    }

    pub fn required_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields().filter(|spec| spec.is_required()).map(|spec| spec.field)
    }
}
