//! Graph-pattern rendering — serialize a `Vertice` tree as SPARQL fragments.
//!
//! The outer query assembler wraps these fragments:
//!
//! ```text
//! SELECT ?x0 WHERE { where_pattern(root) } order_by(root) LIMIT … OFFSET …
//! CONSTRUCT { construct_template(root) } WHERE { where_pattern(root) }
//! ```

use std::fmt::Write;

use crate::builder::deep_list;
use crate::model::{Edge, Filter, FilterOperator, Iri, Subject, Variable, Vertice};
use crate::shape::PropertyPath;

const INDENT: &str = "  ";

/// Group graph pattern body for `WHERE { … }`.
///
/// Optional edges open an `OPTIONAL { … }` block holding the edge and
/// everything below it; filters follow the triples of their vertice.
pub fn where_pattern(root: &Vertice) -> String {
    let mut out = String::new();
    write_vertice(&mut out, root, 0, true);
    out
}

/// Triple template for `CONSTRUCT { … }`: every edge, no optionality, no filters.
///
/// Property paths are spelled out as plain triples.
pub fn construct_template(root: &Vertice) -> String {
    let mut out = String::new();
    write_vertice(&mut out, root, 0, false);
    out
}

/// `ORDER BY …` clause from the root's orderables, `None` when unsorted.
pub fn order_by(root: &Vertice) -> Option<String> {
    if root.orderables().is_empty() {
        return None;
    }
    let keys: Vec<String> = root.orderables().iter().map(ToString::to_string).collect();
    Some(format!("ORDER BY {}", keys.join(" ")))
}

/// Every variable bound in the tree, root first, in pre-order.
pub fn variables(root: &Vertice) -> Vec<Variable> {
    let mut vars: Vec<Variable> = root.variable().cloned().into_iter().collect();
    for edge in deep_list(root.edges()) {
        if let Some(v) = edge.object().variable() {
            if !vars.contains(v) {
                vars.push(v.clone());
            }
        }
    }
    vars
}

fn write_vertice(out: &mut String, vertice: &Vertice, depth: usize, patterns: bool) {
    let Some(subject) = vertice.variable() else { return };
    for edge in vertice.edges() {
        if patterns && edge.is_optional() {
            pad(out, depth);
            out.push_str("OPTIONAL {\n");
            write_edge(out, subject, edge, depth + 1, patterns);
            pad(out, depth);
            out.push_str("}\n");
        } else {
            write_edge(out, subject, edge, depth, patterns);
        }
    }
    if patterns {
        for filter in vertice.filters() {
            pad(out, depth);
            let _ = writeln!(out, "FILTER({})", filter_expression(subject, filter));
        }
    }
}

fn write_edge(out: &mut String, subject: &Variable, edge: &Edge, depth: usize, patterns: bool) {
    match edge.object().subject() {
        Subject::Types(_) => {
            pad(out, depth);
            let _ = writeln!(out, "{subject} {edge} .");
        }
        Subject::Variable(object) => {
            for (s, predicate, o) in path_triples(edge.predicate(), subject, object) {
                pad(out, depth);
                if predicate.is_rdf_type() {
                    let _ = writeln!(out, "{s} a {o} .");
                } else {
                    let _ = writeln!(out, "{s} {predicate} {o} .");
                }
            }
            write_vertice(out, edge.object(), depth, patterns);
        }
    }
}

/// Plain triples for `path` from `subject` to `object`.
///
/// Inverse steps swap the ends; sequence steps chain through intermediates
/// named `?{object}_{n}`, bound by the pattern and reused by the template.
fn path_triples(path: &PropertyPath, subject: &Variable, object: &Variable) -> Vec<(Variable, Iri, Variable)> {
    let mut triples = Vec::new();
    let mut counter = 0;
    expand_path(path, subject.clone(), object.clone(), object, &mut counter, &mut triples);
    triples
}

fn expand_path(
    path: &PropertyPath,
    subject: Variable,
    object: Variable,
    anchor: &Variable,
    counter: &mut usize,
    triples: &mut Vec<(Variable, Iri, Variable)>,
) {
    match path {
        PropertyPath::Predicate(iri) => triples.push((subject, iri.clone(), object)),
        PropertyPath::Inverse(inner) => expand_path(inner, object, subject, anchor, counter, triples),
        PropertyPath::Sequence(steps) => {
            let mut from = subject;
            for (i, step) in steps.iter().enumerate() {
                let to = if i + 1 == steps.len() {
                    object.clone()
                } else {
                    *counter += 1;
                    Variable::new(format!("{}_{}", anchor.name(), counter))
                };
                expand_path(step, from, to.clone(), anchor, counter, triples);
                from = to;
            }
        }
    }
}

fn filter_expression(subject: &Variable, filter: &Filter) -> String {
    let operands: Vec<String> = filter.operands.iter().map(ToString::to_string).collect();
    match filter.operator {
        FilterOperator::In => format!("{subject} IN ({})", operands.join(", ")),
        FilterOperator::Language => operands
            .iter()
            .map(|tag| format!("langMatches(lang({subject}), {tag})"))
            .collect::<Vec<_>>()
            .join(" || "),
        op => {
            let symbol = op.symbol().unwrap_or("=");
            operands
                .iter()
                .map(|o| format!("{subject} {symbol} {o}"))
                .collect::<Vec<_>>()
                .join(" && ")
        }
    }
}

fn pad(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
