use crate::error::{NavError, Result};
use crate::hierarchy::PathResolver;
use crate::model::{PageKey, PathRecord};
use crate::mutation::model::{Placement, PositionUpdate, ReorderPlan};
use crate::store::PageStore;
use crate::utils::{last_segment, parent_path};

/// Plan the effect of dropping `moved` next to (or inside) `reference`
///
/// A drop beside a sibling only renumbers positions. The moved page takes a
/// value strictly between its new neighbours, so nothing else changes
/// unless the neighbours leave no room; then the siblings on the far side
/// are shifted by `step`. A sibling tied with the reference bounds the
/// near side, so the moved page lands between it and the reference.
/// A drop inside a page, or beside a page with a different parent, becomes
/// a move of the page itself; its target path must be free.
pub fn plan_reorder(
    store: &PageStore,
    resolver: &dyn PathResolver,
    moved: &str,
    reference: &str,
    placement: Placement,
    step: f64,
) -> Result<ReorderPlan> {
    if moved == reference {
        return Err(NavError::InvalidMove(format!(
            "'{}' cannot be placed relative to itself",
            moved
        )));
    }
    let moved_path = path_of(store, moved)?;
    let reference_path = path_of(store, reference)?;

    if reference_path.starts_with(&format!("{}/", moved_path)) {
        return Err(NavError::InvalidMove(format!(
            "'{}' cannot be placed inside its own subtree",
            moved
        )));
    }

    let name = last_segment(moved_path).unwrap_or(moved);
    let moved_parent = resolver.resolve_parent(moved_path);
    let reference_parent = resolver.resolve_parent(reference_path);

    if placement == Placement::Inside || moved_parent != reference_parent {
        let container = match placement {
            Placement::Inside => format!("{}/{}", reference_path, resolver.reserved_segment()),
            _ => parent_path(reference_path).unwrap_or_default().to_string(),
        };
        let to = format!("{}/{}", container, name);
        if to == moved_path {
            return Err(NavError::InvalidMove(format!(
                "'{}' is already at {}",
                moved, to
            )));
        }
        if let Some(owner) = store.key_by_path(&to).filter(|owner| owner.as_str() != moved) {
            return Err(NavError::InvalidMove(format!(
                "{} is already taken by '{}'",
                to, owner
            )));
        }
        return Ok(ReorderPlan::Move {
            key: moved.to_string(),
            from: moved_path.to_string(),
            to,
        });
    }

    let reference_pos = store
        .get(reference)
        .and_then(PathRecord::numeric_position)
        .ok_or_else(|| NavError::UnpositionedReference(reference.to_string()))?;

    let siblings: Vec<(PageKey, String, f64)> = store
        .iter()
        .filter(|(k, _)| k.as_str() != moved)
        .filter_map(|(k, r)| {
            let path = r.hierarchical_path()?;
            let pos = r.numeric_position()?;
            if !resolver.is_node(path) || resolver.resolve_parent(path) != moved_parent {
                return None;
            }
            Some((k.clone(), path.to_string(), pos))
        })
        .collect();

    let mut updates = Vec::new();
    let new_pos = if placement == Placement::Before {
        let lower = siblings
            .iter()
            .filter(|(k, _, p)| k != reference && *p <= reference_pos)
            .map(|(_, _, p)| *p)
            .fold(None, |acc: Option<f64>, p| Some(acc.map_or(p, |a| a.max(p))));
        match lower {
            None => reference_pos - step,
            Some(lower) => match between(lower, reference_pos) {
                Some(mid) => mid,
                None => {
                    shift(
                        &siblings,
                        |k, p| k == reference || p > reference_pos,
                        step,
                        &mut updates,
                    );
                    between(lower, reference_pos + step).ok_or_else(no_room)?
                }
            },
        }
    } else {
        let upper = siblings
            .iter()
            .filter(|(k, _, p)| k != reference && *p >= reference_pos)
            .map(|(_, _, p)| *p)
            .fold(None, |acc: Option<f64>, p| Some(acc.map_or(p, |a| a.min(p))));
        match upper {
            None => reference_pos + step,
            Some(upper) => match between(reference_pos, upper) {
                Some(mid) => mid,
                None => {
                    shift(
                        &siblings,
                        |k, p| k == reference || p < reference_pos,
                        -step,
                        &mut updates,
                    );
                    between(reference_pos - step, upper).ok_or_else(no_room)?
                }
            },
        }
    };

    updates.push(PositionUpdate {
        key: moved.to_string(),
        path: moved_path.to_string(),
        old: store.get(moved).and_then(PathRecord::numeric_position),
        new: new_pos,
    });

    Ok(ReorderPlan::Reposition {
        moved: moved.to_string(),
        updates,
    })
}

fn path_of<'s>(store: &'s PageStore, key: &str) -> Result<&'s str> {
    let record = store
        .get(key)
        .ok_or_else(|| NavError::UnknownPage(key.to_string()))?;
    record
        .hierarchical_path()
        .ok_or_else(|| NavError::MalformedRecord {
            key: key.to_string(),
            reason: "missing jcr:path".to_string(),
        })
}

/// A value strictly between `low` and `high`, if one is representable
fn between(low: f64, high: f64) -> Option<f64> {
    let mid = low + (high - low) / 2.0;
    (low < mid && mid < high).then_some(mid)
}

fn shift(
    siblings: &[(PageKey, String, f64)],
    selects: impl Fn(&str, f64) -> bool,
    delta: f64,
    updates: &mut Vec<PositionUpdate>,
) {
    for (key, path, pos) in siblings {
        if selects(key, *pos) {
            updates.push(PositionUpdate {
                key: key.clone(),
                path: path.clone(),
                old: Some(*pos),
                new: pos + delta,
            });
        }
    }
}

fn no_room() -> NavError {
    NavError::InvalidMove("no free position between neighbours".to_string())
}
