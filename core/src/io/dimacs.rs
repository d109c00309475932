//! DIMACS maximum-flow instance format
//!
//! ```text
//! c comment
//! p max <vertices> <arcs>
//! n <vertex> s
//! n <vertex> t
//! a <from> <to> <capacity>
//! ```
//!
//! The problem line must precede every other non-comment line. Each arc line
//! becomes one forward/backward edge pair, in file order.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::str::{FromStr, SplitWhitespace};

use log::{debug, warn};
use thiserror::Error;

use crate::data_structures::graph::{Capacity, ResidualGraph, VertexId};

/// Largest vertex count accepted on a problem line
pub const MAX_VERTICES: usize = 1 << 26;

/// Edge pairs reserved up front; the declared arc count is only a hint
const ARC_RESERVE_LIMIT: usize = 1 << 20;

/// DIMACS parsing errors
#[derive(Debug, Error)]
pub enum DimacsError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read failed: {0}")]
    Io(#[from] io::Error),

    #[error("no `p max` problem line")]
    MissingProblemLine,

    #[error("line {line}: problem line must come before node and arc lines")]
    ProblemLineNotFirst { line: usize },

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("no `n <vertex> {0}` line")]
    MissingTerminal(char),
}

/// Parsed max-flow instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimacsInstance {
    pub graph: ResidualGraph,
    pub source: VertexId,
    pub sink: VertexId,
}

/// Tokenizer over one line that reports failures with the line number
struct Fields<'a> {
    line: usize,
    tokens: SplitWhitespace<'a>,
}

impl<'a> Fields<'a> {
    fn new(line: usize, text: &'a str) -> Self {
        Self {
            line,
            tokens: text.split_whitespace(),
        }
    }

    fn malformed(&self, reason: impl Into<String>) -> DimacsError {
        DimacsError::Malformed {
            line: self.line,
            reason: reason.into(),
        }
    }

    fn next<T: FromStr>(&mut self, what: &str) -> Result<T, DimacsError> {
        let token = self
            .tokens
            .next()
            .ok_or_else(|| self.malformed(format!("missing {what}")))?;
        token
            .parse()
            .map_err(|_| self.malformed(format!("invalid {what} `{token}`")))
    }

    fn vertex(&mut self, what: &str, vertex_count: usize) -> Result<VertexId, DimacsError> {
        let vertex: VertexId = self.next(what)?;
        if vertex > vertex_count {
            return Err(self.malformed(format!(
                "{what} {vertex} exceeds declared vertex count {vertex_count}"
            )));
        }
        Ok(vertex)
    }
}

/// Parse an instance from a buffered reader
pub fn parse<R: BufRead>(reader: R) -> Result<DimacsInstance, DimacsError> {
    let mut graph: Option<ResidualGraph> = None;
    let mut declared_arcs: usize = 0;
    let mut source = None;
    let mut sink = None;

    for (offset, text) in reader.lines().enumerate() {
        let text = text?;
        let line = offset + 1;
        let mut fields = Fields::new(line, &text);

        let Some(kind) = fields.tokens.next() else {
            continue;
        };

        match kind {
            "c" => continue,
            "p" => {
                if graph.is_some() {
                    return Err(fields.malformed("duplicate problem line"));
                }
                let problem: String = fields.next("problem type")?;
                if problem != "max" {
                    return Err(fields.malformed(format!("unsupported problem type `{problem}`")));
                }
                let vertices: usize = fields.next("vertex count")?;
                if vertices > MAX_VERTICES {
                    return Err(fields.malformed(format!(
                        "vertex count {vertices} exceeds the limit of {MAX_VERTICES}"
                    )));
                }
                declared_arcs = fields.next("arc count")?;
                graph = Some(ResidualGraph::with_capacity(
                    vertices,
                    declared_arcs.min(ARC_RESERVE_LIMIT),
                ));
            }
            "n" => {
                let Some(graph) = graph.as_ref() else {
                    return Err(DimacsError::ProblemLineNotFirst { line });
                };
                let vertex = fields.vertex("vertex", graph.vertex_count())?;
                let role: String = fields.next("terminal designator")?;
                let slot = match role.as_str() {
                    "s" => &mut source,
                    "t" => &mut sink,
                    other => return Err(fields.malformed(format!("unknown designator `{other}`"))),
                };
                if slot.replace(vertex).is_some() {
                    return Err(fields.malformed(format!("duplicate `{role}` designation")));
                }
            }
            "a" => {
                let Some(graph) = graph.as_mut() else {
                    return Err(DimacsError::ProblemLineNotFirst { line });
                };
                let from = fields.vertex("tail", graph.vertex_count())?;
                let to = fields.vertex("head", graph.vertex_count())?;
                let capacity: Capacity = fields.next("capacity")?;
                if capacity < 0 {
                    return Err(fields.malformed(format!("negative capacity {capacity}")));
                }
                graph.add_edge(from, to, capacity);
            }
            other if other.starts_with('c') => continue,
            other => return Err(fields.malformed(format!("unknown line type `{other}`"))),
        }
    }

    let graph = graph.ok_or(DimacsError::MissingProblemLine)?;
    let source = source.ok_or(DimacsError::MissingTerminal('s'))?;
    let sink = sink.ok_or(DimacsError::MissingTerminal('t'))?;

    if graph.arc_count() != declared_arcs {
        warn!(
            "problem line declares {} arcs but {} were read",
            declared_arcs,
            graph.arc_count()
        );
    }
    debug!(
        "parsed DIMACS instance: {} vertices, {} arcs, source {}, sink {}",
        graph.vertex_count(),
        graph.arc_count(),
        source,
        sink
    );

    Ok(DimacsInstance {
        graph,
        source,
        sink,
    })
}

/// Parse an instance held in memory
pub fn parse_str(text: &str) -> Result<DimacsInstance, DimacsError> {
    parse(text.as_bytes())
}

/// Read an instance from a file
pub fn read_from_file(path: impl AsRef<Path>) -> Result<DimacsInstance, DimacsError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DimacsError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse(BufReader::new(file))
}

/// Write `instance` in DIMACS form; reading the output back gives the same graph
pub fn write_dimacs<W: Write>(instance: &DimacsInstance, mut writer: W) -> io::Result<()> {
    let graph = &instance.graph;
    writeln!(writer, "p max {} {}", graph.vertex_count(), graph.arc_count())?;
    writeln!(writer, "n {} s", instance.source)?;
    writeln!(writer, "n {} t", instance.sink)?;
    for arc in graph.arcs() {
        writeln!(writer, "a {} {} {}", arc.from, arc.to, arc.capacity)?;
    }
    writer.flush()
}
