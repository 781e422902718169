//! Graph helpers: type compatibility, flattening and edge merging.

use tracing::trace;

use crate::model::{Edge, Iri, Subject};

/// Classes on the `rdf:type` sub-edge of `edge`'s object.
fn object_types(edge: &Edge) -> Option<&[Iri]> {
    edge.object()
        .type_edge()
        .and_then(|t| t.object().type_set())
        .filter(|set| !set.is_empty())
}

/// Both sides typed: the sets must intersect. Neither typed: compatible.
/// Only one typed: `permissive` decides.
fn types_compatible(a: Option<&[Iri]>, b: Option<&[Iri]>, permissive: bool) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.iter().any(|t| b.contains(t)),
        (None, None) => true,
        _ => permissive,
    }
}

/// Whether `edge` may stand for a property whose nested shape targets
/// `target_classes`.
pub fn has_equal_target_class(edge: &Edge, target_classes: &[Iri], permissive: bool) -> bool {
    let wanted = (!target_classes.is_empty()).then_some(target_classes);
    types_compatible(object_types(edge), wanted, permissive)
}

/// Whether two edges point at objects of a compatible type.
pub fn has_same_type(a: &Edge, b: &Edge, permissive: bool) -> bool {
    types_compatible(object_types(a), object_types(b), permissive)
}

/// Pre-order flattening of `edges` and all their descendants.
pub fn deep_list(edges: &[Edge]) -> Vec<&Edge> {
    let mut out = Vec::new();
    collect(edges, &mut out);
    out
}

fn collect<'a>(edges: &'a [Edge], out: &mut Vec<&'a Edge>) {
    for edge in edges {
        out.push(edge);
        collect(edge.object().edges(), out);
    }
}

/// Fold sibling edges with equal predicates and compatible object types
/// into one edge, recursively.
///
/// The surviving edge keeps the first occurrence's object variable; it is
/// required if either side was and optional only if both were.
pub fn merge_edges(edges: Vec<Edge>, permissive: bool) -> Vec<Edge> {
    let mut merged: Vec<Edge> = Vec::with_capacity(edges.len());
    for edge in edges {
        let existing = merged.iter_mut().find(|m| {
            m.predicate == edge.predicate
                && m.object.is_type_constraint() == edge.object.is_type_constraint()
                && has_same_type(m, &edge, permissive)
        });
        match existing {
            Some(target) => {
                trace!(predicate = %edge.predicate, "merging duplicate edge");
                absorb(target, edge, permissive);
            }
            None => merged.push(edge),
        }
    }
    merged
}

fn absorb(target: &mut Edge, other: Edge, permissive: bool) {
    target.required |= other.required;
    target.optional &= other.optional;

    let object = other.object;
    if let (Subject::Types(into), Subject::Types(from)) = (&mut target.object.subject, object.subject) {
        for class in from {
            if !into.contains(&class) {
                into.push(class);
            }
        }
    }
    target.object.filters.extend(object.filters);
    target.object.orderables.extend(object.orderables);

    let mut children = std::mem::take(&mut target.object.edges);
    children.extend(object.edges);
    target.object.edges = merge_edges(children, permissive);
}
