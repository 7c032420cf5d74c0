//! The query AST accepted by the external search engine.
//!
//! The strategy only ever needs four shapes: exact phrase on a field,
//! multi-field match, wildcard containment, and boolean combination. No
//! aggregations, no sort overrides, no scripts.

use serde_json::{json, Value};

/// One candidate query, renderable to the engine's JSON DSL.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryAst {
    /// Exact-phrase match on a single field, with optional positional slop.
    MatchPhrase {
        field: String,
        phrase: String,
        slop: Option<u32>,
    },
    /// Weighted match across several fields.
    MultiMatch { query: String, fields: Vec<String> },
    /// Substring containment on a keyword-ish field.
    WildcardContains { field: String, needle: String },
    /// Boolean combination of sub-queries.
    Bool {
        must: Vec<QueryAst>,
        should: Vec<QueryAst>,
    },
}

impl QueryAst {
    pub fn match_phrase(field: impl Into<String>, phrase: impl Into<String>) -> Self {
        Self::MatchPhrase {
            field: field.into(),
            phrase: phrase.into(),
            slop: None,
        }
    }

    #[must_use]
    pub fn with_slop(mut self, value: Option<u32>) -> Self {
        if let Self::MatchPhrase { slop, .. } = &mut self {
            *slop = value;
        }
        self
    }

    pub fn multi_match(query: impl Into<String>, fields: &[&str]) -> Self {
        Self::MultiMatch {
            query: query.into(),
            fields: fields.iter().map(|f| (*f).to_string()).collect(),
        }
    }

    pub fn wildcard_contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::WildcardContains {
            field: field.into(),
            needle: needle.into(),
        }
    }

    pub fn any_of(should: Vec<QueryAst>) -> Self {
        Self::Bool {
            must: Vec::new(),
            should,
        }
    }

    /// Render the query body in the engine's JSON DSL.
    #[must_use]
    pub fn to_body(&self) -> Value {
        match self {
            Self::MatchPhrase {
                field,
                phrase,
                slop,
            } => match slop {
                Some(slop) => json!({
                    "match_phrase": { field.as_str(): { "query": phrase, "slop": slop } }
                }),
                None => json!({ "match_phrase": { field.as_str(): phrase } }),
            },
            Self::MultiMatch { query, fields } => json!({
                "multi_match": { "query": query, "fields": fields }
            }),
            Self::WildcardContains { field, needle } => json!({
                "wildcard": { field.as_str(): { "value": format!("*{}*", escape_wildcard(needle)) } }
            }),
            Self::Bool { must, should } => {
                let must: Vec<Value> = must.iter().map(QueryAst::to_body).collect();
                let should: Vec<Value> = should.iter().map(QueryAst::to_body).collect();
                json!({ "bool": { "must": must, "should": should } })
            }
        }
    }
}

/// Escape the engine's wildcard metacharacters in a literal needle.
fn escape_wildcard(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if c == '*' || c == '?' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
