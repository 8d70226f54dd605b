use serde_json::{json, Value};

/// A text field with its relevance boost weight. Higher boost means
/// matches in that field rank higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoostedField {
    pub field: &'static str,
    pub boost: u8,
}

impl BoostedField {
    pub const fn new(field: &'static str, boost: u8) -> Self {
        BoostedField { field, boost }
    }

    fn to_wire(self) -> String {
        format!("{}^{}", self.field, self.boost)
    }
}

/// Numeric range bounds. Only the populated sides constrain the range;
/// `gte`/`lte` are inclusive, `lt` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub gte: Option<i64>,
    pub lte: Option<i64>,
    pub lt: Option<i64>,
}

/// One node of the compiled boolean query.
///
/// `Bool` separates scored `must` clauses from unscored `filter` clauses,
/// mirroring the engine's relevance-vs-filter split: filters affect only
/// inclusion, never score.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryNode {
    MatchAll,
    /// Multi-field text match with per-field boosts, automatic fuzziness,
    /// and best-matching-field scoring.
    MultiMatch {
        query: String,
        fields: Vec<BoostedField>,
    },
    /// Exact match on any of the given values (OR within the list).
    Terms { field: String, values: Vec<String> },
    Range { field: String, bounds: Bounds },
    /// OR-group of subclauses.
    AnyOf(Vec<QueryNode>),
    Bool {
        must: Vec<QueryNode>,
        filter: Vec<QueryNode>,
    },
}

impl QueryNode {
    pub fn to_wire(&self) -> Value {
        match self {
            QueryNode::MatchAll => json!({"match_all": {}}),
            QueryNode::MultiMatch { query, fields } => json!({
                "multi_match": {
                    "query": query,
                    "fields": fields.iter().map(|f| f.to_wire()).collect::<Vec<_>>(),
                    "fuzziness": "AUTO",
                    "type": "best_fields",
                }
            }),
            QueryNode::Terms { field, values } => json!({"terms": {(field.as_str()): values}}),
            QueryNode::Range { field, bounds } => {
                let mut range = serde_json::Map::new();
                if let Some(gte) = bounds.gte {
                    range.insert("gte".into(), gte.into());
                }
                if let Some(lte) = bounds.lte {
                    range.insert("lte".into(), lte.into());
                }
                if let Some(lt) = bounds.lt {
                    range.insert("lt".into(), lt.into());
                }
                json!({"range": {(field.as_str()): range}})
            }
            QueryNode::AnyOf(clauses) => json!({
                "bool": {"should": clauses.iter().map(QueryNode::to_wire).collect::<Vec<_>>()}
            }),
            QueryNode::Bool { must, filter } => json!({
                "bool": {
                    "must": must.iter().map(QueryNode::to_wire).collect::<Vec<_>>(),
                    "filter": filter.iter().map(QueryNode::to_wire).collect::<Vec<_>>(),
                }
            }),
        }
    }
}

/// Sort order for the result sequence. `Name` and `Size` fully override
/// scoring order; there is no partial relevance blending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortSpec {
    /// Descending match score.
    #[default]
    Relevance,
    /// Ascending on the untokenized name.
    NameAsc,
    /// Descending current employee estimate.
    SizeDesc,
}

impl SortSpec {
    pub fn to_wire(self) -> Value {
        match self {
            SortSpec::Relevance => json!(["_score"]),
            SortSpec::NameAsc => json!([{"name.keyword": {"order": "asc"}}]),
            SortSpec::SizeDesc => json!([{"current_employee_estimate": {"order": "desc"}}]),
        }
    }
}

/// The fully compiled query: boolean tree, sort mode, and pagination
/// window, ready to serialize into one engine request body.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub query: QueryNode,
    pub sort: SortSpec,
    pub from: usize,
    pub size: usize,
}

impl CompiledQuery {
    pub fn body(&self) -> Value {
        json!({
            "query": self.query.to_wire(),
            "from": self.from,
            "size": self.size,
            "sort": self.sort.to_wire(),
        })
    }
}
