//! Construct graph builder.
//!
//! Produces the graph of a CONSTRUCT/DESCRIBE query: exactly the fields the
//! caller selected, one non-optional edge each, recursing into nested
//! shapes with the field's own selection.

use tracing::{debug, trace};

use super::helpers::{deep_list, merge_edges};
use super::{object_vertice, root_vertice, BuildConfig, VariableSource};
use crate::criteria::SelectedField;
use crate::model::{Edge, Vertice};
use crate::shape::{NodeShape, ShapeSource};
use crate::{Error, Result};

/// Build the CONSTRUCT graph for `node_shape` and `selection`.
pub fn create_root(
    vars: &mut VariableSource,
    shapes: &dyn ShapeSource,
    node_shape: &NodeShape,
    selection: &[SelectedField],
    config: &BuildConfig,
) -> Result<Vertice> {
    debug!(shape = node_shape.name(), fields = selection.len(), "building construct graph");
    let mut root = root_vertice(vars, node_shape);
    add_selection(vars, shapes, node_shape, &mut root, selection, 1, config)?;
    debug!(shape = node_shape.name(), edges = deep_list(root.edges()).len(), "construct graph built");
    Ok(root)
}

fn add_selection(
    vars: &mut VariableSource,
    shapes: &dyn ShapeSource,
    shape: &NodeShape,
    vertice: &mut Vertice,
    selection: &[SelectedField],
    depth: usize,
    config: &BuildConfig,
) -> Result<()> {
    for field in selection {
        let property = shape.require_property(&field.name)?;

        let object = match property.node.as_deref() {
            Some(nested_name) => {
                let nested = shapes.require(nested_name)?;
                let mut object = object_vertice(vars, Some(nested.as_ref()));
                if !field.selection.is_empty() {
                    if depth >= config.max_depth {
                        return Err(Error::DepthExceeded { max_depth: config.max_depth, field: field.name.clone() });
                    }
                    add_selection(vars, shapes, &nested, &mut object, &field.selection, depth + 1, config)?;
                }
                object
            }
            None if !field.selection.is_empty() => {
                return Err(Error::InvalidFieldPath {
                    path: field.name.clone(),
                    message: "scalar field cannot carry a nested selection".into(),
                });
            }
            None => object_vertice(vars, None),
        };

        trace!(shape = shape.name(), property = %property.name, "selected edge");
        vertice.push_edge(Edge::new(property.path.clone(), object).with_required(property.is_required()));
    }

    let edges = std::mem::take(&mut vertice.edges);
    vertice.edges = merge_edges(edges, config.permissive_type_match);
    Ok(())
}
