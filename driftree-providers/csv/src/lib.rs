//! CSV edge-list provider producing a [`ParametricGraph`].
//!
//! Each non-blank line holds one edge record `u,v,a,b`: two 1-based node ids
//! followed by the two weight coefficients. Fields are trimmed, blank lines
//! and lines starting with `#` are skipped, and the order of the remaining
//! lines assigns edge identifiers. Any malformed line aborts the whole load.
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use driftree_core::{GraphError, ParametricGraph};
use thiserror::Error;

/// Errors raised while loading a CSV edge list.
///
/// `line` fields are 1-based physical line numbers, counting blank and
/// comment lines.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CsvEdgeSourceError {
    /// A record did not hold exactly four comma-separated fields.
    #[error("line {line}: expected 4 fields `u,v,a,b` but found {found}")]
    FieldCount {
        /// Line of the malformed record.
        line: usize,
        /// Number of fields present.
        found: usize,
    },
    /// A node id was not a non-negative integer.
    #[error("line {line}: field `{field}` must be a node id but was `{value}`")]
    InvalidNode {
        /// Line of the malformed record.
        line: usize,
        /// Name of the offending field.
        field: &'static str,
        /// Raw field text.
        value: String,
    },
    /// A coefficient was not a floating-point number.
    #[error("line {line}: field `{field}` must be a number but was `{value}`")]
    InvalidCoefficient {
        /// Line of the malformed record.
        line: usize,
        /// Name of the offending field.
        field: &'static str,
        /// Raw field text.
        value: String,
    },
    /// The record parsed but was rejected by graph validation.
    #[error("line {line}: {source}")]
    Graph {
        /// Line of the rejected record.
        line: usize,
        /// Validation failure reported by the graph.
        #[source]
        source: GraphError,
    },
    /// Reading the input failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl CsvEdgeSourceError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> CsvEdgeSourceErrorCode {
        match self {
            Self::FieldCount { .. } => CsvEdgeSourceErrorCode::FieldCount,
            Self::InvalidNode { .. } => CsvEdgeSourceErrorCode::InvalidNode,
            Self::InvalidCoefficient { .. } => CsvEdgeSourceErrorCode::InvalidCoefficient,
            Self::Graph { .. } => CsvEdgeSourceErrorCode::InvalidGraph,
            Self::Io(_) => CsvEdgeSourceErrorCode::Io,
        }
    }

    /// Returns the offending line, when the error is tied to one.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::FieldCount { line, .. }
            | Self::InvalidNode { line, .. }
            | Self::InvalidCoefficient { line, .. }
            | Self::Graph { line, .. } => Some(*line),
            Self::Io(_) => None,
        }
    }
}

/// Machine-readable codes for [`CsvEdgeSourceError`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CsvEdgeSourceErrorCode {
    /// A record did not hold exactly four fields.
    FieldCount,
    /// A node id failed to parse.
    InvalidNode,
    /// A coefficient failed to parse.
    InvalidCoefficient,
    /// Graph validation rejected a record.
    InvalidGraph,
    /// Reading the input failed.
    Io,
}

impl CsvEdgeSourceErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FieldCount => "CSV_FIELD_COUNT",
            Self::InvalidNode => "CSV_INVALID_NODE",
            Self::InvalidCoefficient => "CSV_INVALID_COEFFICIENT",
            Self::InvalidGraph => "CSV_INVALID_GRAPH",
            Self::Io => "CSV_IO",
        }
    }
}

/// A named edge list loaded from CSV.
#[derive(Clone, Debug)]
pub struct CsvEdgeSource {
    name: String,
    graph: ParametricGraph,
}

impl CsvEdgeSource {
    /// Parses an edge list from any buffered reader.
    ///
    /// # Errors
    /// Returns [`CsvEdgeSourceError`] for the first malformed or invalid
    /// line, or when reading fails.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    /// use driftree_providers_csv::CsvEdgeSource;
    ///
    /// let input = "# u,v,a,b\n1,2,1.0,0.0\n\n2, 3, 5.0, -5.0\n";
    /// let source = CsvEdgeSource::try_from_reader("demo", Cursor::new(input))
    ///     .expect("input is valid");
    /// assert_eq!(source.name(), "demo");
    /// assert_eq!(source.graph().len(), 2);
    /// assert_eq!(source.graph().node_count(), 3);
    /// ```
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, CsvEdgeSourceError> {
        let mut records = Vec::new();
        let mut lines = Vec::new();
        for (index, text) in reader.lines().enumerate() {
            let text = text?;
            let line = index + 1;
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            records.push(parse_record(line, trimmed)?);
            lines.push(line);
        }

        let graph = ParametricGraph::from_records(records).map_err(|source| {
            CsvEdgeSourceError::Graph {
                line: lines.get(source.edge()).copied().unwrap_or_default(),
                source,
            }
        })?;
        Ok(Self {
            name: name.into(),
            graph,
        })
    }

    /// Opens `path` and parses it as an edge list.
    ///
    /// # Errors
    /// Returns [`CsvEdgeSourceError::Io`] when the file cannot be opened and
    /// any error of [`CsvEdgeSource::try_from_reader`] otherwise.
    pub fn try_from_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, CsvEdgeSourceError> {
        let file = File::open(path)?;
        Self::try_from_reader(name, BufReader::new(file))
    }

    /// Returns the source name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the loaded graph.
    #[must_use]
    pub fn graph(&self) -> &ParametricGraph {
        &self.graph
    }

    /// Consumes the source, returning the graph.
    #[must_use]
    pub fn into_graph(self) -> ParametricGraph {
        self.graph
    }
}

fn parse_record(line: usize, text: &str) -> Result<(usize, usize, f64, f64), CsvEdgeSourceError> {
    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    let [source, target, coeff_a, coeff_b] = fields.as_slice() else {
        return Err(CsvEdgeSourceError::FieldCount {
            line,
            found: fields.len(),
        });
    };
    Ok((
        parse_node(line, "u", source)?,
        parse_node(line, "v", target)?,
        parse_coefficient(line, "a", coeff_a)?,
        parse_coefficient(line, "b", coeff_b)?,
    ))
}

fn parse_node(line: usize, field: &'static str, value: &str) -> Result<usize, CsvEdgeSourceError> {
    value
        .parse()
        .map_err(|_| CsvEdgeSourceError::InvalidNode {
            line,
            field,
            value: value.to_owned(),
        })
}

fn parse_coefficient(
    line: usize,
    field: &'static str,
    value: &str,
) -> Result<f64, CsvEdgeSourceError> {
    value
        .parse()
        .map_err(|_| CsvEdgeSourceError::InvalidCoefficient {
            line,
            field,
            value: value.to_owned(),
        })
}
