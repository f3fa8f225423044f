//! Drop target resolution.
//!
//! Dragged content often cannot sit at the exact position under the pointer
//! (a paragraph dropped in the middle of a run of text, say). Starting at the
//! innermost ancestor of the pointer position, the resolver walks outwards
//! until it finds a node that accepts the dragged content, snapping to the
//! nearer boundary of the child it is leaving.

use dropcursor_model::{Document, ModelError, ResolvedPos, Slice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bias {
    Neutral,
    Start,
    End,
}

fn bias_at(resolved: &ResolvedPos<'_>, depth: usize) -> Bias {
    if depth == resolved.depth() {
        return Bias::Neutral;
    }
    let inner = depth + 1;
    if 2 * resolved.pos() <= resolved.start(inner) + resolved.end(inner) {
        Bias::Start
    } else {
        Bias::End
    }
}

/// Position where `slice` fits when dropped at `pos`, or `None` when no
/// ancestor accepts it.
///
/// A first pass tests the slice content directly. Slices made of complete
/// nodes get a second pass that also accepts a spot where the content fits
/// once wrapped in a chain of nodes the ancestor accepts.
pub fn drop_point(doc: &Document, pos: usize, slice: &Slice) -> Result<Option<usize>, ModelError> {
    let resolved = doc.resolve(pos)?;
    if slice.is_empty() {
        return Ok(Some(pos));
    }
    let shape = slice.shape()?;
    let passes = if slice.open_start() == 0 && slice.size() > 0 {
        2
    } else {
        1
    };

    for pass in 1..=passes {
        for depth in (0..=resolved.depth()).rev() {
            let bias = bias_at(&resolved, depth);
            let index = resolved.index(depth) + usize::from(bias == Bias::End);
            let parent = resolved.node(depth);

            let fits = if pass == 1 {
                parent.can_replace(index, index, shape)
            } else {
                shape.first_child().is_some_and(|first| {
                    doc.schema()
                        .find_wrapping(parent, index, first.node_type())
                        .is_some_and(|wrapping| {
                            let outer = wrapping.first().copied().unwrap_or(first.node_type());
                            parent.can_replace_with(index, index, outer)
                        })
                })
            };

            if fits {
                let target = match bias {
                    Bias::Neutral => pos,
                    Bias::Start => resolved.before(depth + 1),
                    Bias::End => resolved.after(depth + 1),
                };
                return Ok(Some(target));
            }
        }
    }

    Ok(None)
}

/// Resolve the effective drop position for a pointer at `base`.
///
/// Never fails: without a payload, when nothing accepts the payload, or when
/// the document cannot be queried, `base` is returned unchanged.
pub fn resolve(doc: &Document, base: usize, payload: Option<&Slice>) -> usize {
    let Some(slice) = payload.filter(|slice| !slice.is_empty()) else {
        return base;
    };
    match drop_point(doc, base, slice) {
        Ok(Some(target)) => target,
        Ok(None) => {
            log::debug!("no ancestor of {base} accepts the dragged content, keeping it");
            base
        }
        Err(err) => {
            log::debug!("drop point at {base} unavailable: {err}");
            base
        }
    }
}
