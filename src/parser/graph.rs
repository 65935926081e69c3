//! Dependency graphs produced by the parsing model.

use crate::error::{Result, SarvError};
use crate::parser::record::ColumnarRecord;
use crate::UNKNOWN;
use serde::{Deserialize, Serialize};

/// Head index of the synthetic root node.
pub const ROOT: usize = 0;

/// A token of a parsed sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphToken {
    /// 1-based position in the sentence.
    pub index: usize,
    /// Word form.
    pub word: String,
    /// Lemma.
    pub lemma: String,
    /// POS tag.
    pub tag: String,
}

/// A labelled arc from a head token to its dependent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Head token index, [`ROOT`] for the synthetic root.
    pub head: usize,
    /// Dependent token index.
    pub dependent: usize,
    /// Relation label.
    pub relation: String,
}

impl DependencyEdge {
    /// Creates an edge.
    pub fn new(head: usize, dependent: usize, relation: impl Into<String>) -> Self {
        Self {
            head,
            dependent,
            relation: relation.into(),
        }
    }
}

/// The parse of one sentence.
///
/// Tree shape is the parsing model's contract; [`DependencyGraph::is_tree`]
/// checks it without enforcing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    tokens: Vec<GraphToken>,
    edges: Vec<DependencyEdge>,
}

impl DependencyGraph {
    /// Creates a graph from its tokens and edges.
    pub fn new(tokens: Vec<GraphToken>, edges: Vec<DependencyEdge>) -> Self {
        Self { tokens, edges }
    }

    /// Creates a graph over the tokens of `record` with the given edges.
    pub fn from_record(record: &ColumnarRecord, edges: Vec<DependencyEdge>) -> Self {
        let tokens = record
            .lines()
            .iter()
            .map(|line| GraphToken {
                index: line.index,
                word: line.word.clone(),
                lemma: line.lemma.clone(),
                tag: line.tag.clone(),
            })
            .collect();
        Self { tokens, edges }
    }

    /// Returns the tokens in sentence order.
    pub fn tokens(&self) -> &[GraphToken] {
        &self.tokens
    }

    /// Returns the edges.
    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the graph has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the token at 1-based `index`.
    pub fn token(&self, index: usize) -> Option<&GraphToken> {
        index.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    /// Returns the first edge whose dependent is `index`.
    pub fn head_of(&self, index: usize) -> Option<&DependencyEdge> {
        self.edges.iter().find(|e| e.dependent == index)
    }

    /// Returns the edges headed by `index`, in dependent order.
    pub fn dependents_of(&self, index: usize) -> Vec<&DependencyEdge> {
        let mut deps: Vec<&DependencyEdge> = self.edges.iter().filter(|e| e.head == index).collect();
        deps.sort_by_key(|e| e.dependent);
        deps
    }

    /// Returns the indices of tokens attached to the synthetic root.
    pub fn roots(&self) -> Vec<usize> {
        self.dependents_of(ROOT).iter().map(|e| e.dependent).collect()
    }

    /// Returns true if every token has exactly one in-range head and every
    /// head chain reaches the root without a cycle.
    pub fn is_tree(&self) -> bool {
        let n = self.tokens.len();
        let mut heads = vec![None; n + 1];

        for edge in &self.edges {
            if edge.dependent == ROOT || edge.dependent > n || edge.head > n {
                return false;
            }
            if heads[edge.dependent].replace(edge.head).is_some() {
                return false;
            }
        }

        (1..=n).all(|start| {
            let mut current = start;
            for _ in 0..=n {
                match heads[current] {
                    Some(ROOT) => return true,
                    Some(head) => current = head,
                    None => return false,
                }
            }
            false
        })
    }

    /// Renders the graph as CoNLL-X lines (ten tab-separated columns).
    pub fn to_conll(&self) -> Vec<String> {
        self.tokens
            .iter()
            .map(|token| {
                let (head, relation) = match self.head_of(token.index) {
                    Some(edge) => (edge.head.to_string(), edge.relation.as_str()),
                    None => (UNKNOWN.to_string(), UNKNOWN),
                };
                format!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    token.index,
                    token.word,
                    token.lemma,
                    token.tag,
                    token.tag,
                    UNKNOWN,
                    head,
                    relation,
                    UNKNOWN,
                    UNKNOWN
                )
            })
            .collect()
    }

    /// Parses CoNLL-X lines as written by a parsing engine.
    ///
    /// At least eight columns are required; `HEAD` may be `_` for an
    /// unattached token.
    pub fn from_conll<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        let mut tokens = Vec::with_capacity(lines.len());
        let mut edges = Vec::with_capacity(lines.len());

        for line in lines {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 8 {
                return Err(SarvError::Parse(format!(
                    "expected at least 8 columns, got {} in {:?}",
                    fields.len(),
                    line
                )));
            }

            let index: usize = parse_index(fields[0])?;
            tokens.push(GraphToken {
                index,
                word: fields[1].to_string(),
                lemma: fields[2].to_string(),
                tag: fields[3].to_string(),
            });

            if fields[6] != UNKNOWN {
                edges.push(DependencyEdge::new(parse_index(fields[6])?, index, fields[7]));
            }
        }

        Ok(Self { tokens, edges })
    }
}

fn parse_index(field: &str) -> Result<usize> {
    field
        .parse()
        .map_err(|_| SarvError::Parse(format!("invalid token index {:?}", field)))
}
