//! Delete planning over the foreign-key table
//!
//! A delete runs in two phases. Planning walks every foreign key that
//! references the doomed row: protected links abort the plan, cascading
//! links pull the child rows into the plan, nullable links are scheduled for
//! clearing. Applying the plan removes the cascaded rows children first,
//! clears the scheduled links and finally removes the requested row.

use std::collections::HashSet;

use crate::errors::ShopError;
use crate::model::{EntityKind, ForeignKey, OnDelete};

/// Source of referencing rows for the planner
///
/// Implemented by the in-memory [`Store`](super::Store) and by the SQLite
/// repository inside its delete transaction.
pub trait Dependents {
    type Error: From<ShopError>;

    /// Ids of the rows whose `fk` column holds `parent_id`
    ///
    /// # Errors
    ///
    /// Returns the backend's error when the lookup fails.
    fn dependents(&self, fk: ForeignKey, parent_id: &str) -> Result<Vec<String>, Self::Error>;
}

/// Steps needed to delete one row together with its cascade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePlan {
    /// The requested row
    pub root: (EntityKind, String),
    /// Rows removed through cascading links, children before their parents
    pub cascade: Vec<(EntityKind, String)>,
    /// Links to clear: the foreign key and the id of the child row holding it
    pub nullify: Vec<(ForeignKey, String)>,
}

impl DeletePlan {
    pub fn cascaded(&self) -> usize {
        self.cascade.len()
    }

    pub fn nullified(&self) -> usize {
        self.nullify.len()
    }

    /// Every removed row in removal order; the requested row comes last
    pub fn deletion_order(&self) -> impl Iterator<Item = &(EntityKind, String)> {
        self.cascade.iter().chain(std::iter::once(&self.root))
    }
}

/// Plan the deletion of `entity` row `id`
///
/// The caller is responsible for checking that the row exists. Applying
/// the plan means: remove the `cascade` rows, clear the `nullify` links,
/// then remove the `root` row.
///
/// # Errors
///
/// Returns `ShopError::Protected` when a protecting foreign key still has
/// referencing rows, or the backend's lookup error.
pub fn plan_delete<D: Dependents + ?Sized>(
    source: &D,
    entity: EntityKind,
    id: &str,
) -> Result<DeletePlan, D::Error> {
    let mut visited = Vec::new();
    let mut nullify = Vec::new();
    let mut seen = HashSet::new();
    collect(source, entity, id, &mut visited, &mut nullify, &mut seen)?;

    // A row being deleted needs no link cleared
    nullify.retain(|(fk, child_id): &(ForeignKey, String)| {
        !seen.contains(&(fk.child(), child_id.clone()))
    });

    let mut cascade = visited.split_off(1);
    cascade.reverse();
    let root = visited
        .pop()
        .unwrap_or_else(|| (entity, id.to_string()));
    Ok(DeletePlan {
        root,
        cascade,
        nullify,
    })
}

fn collect<D: Dependents + ?Sized>(
    source: &D,
    entity: EntityKind,
    id: &str,
    visited: &mut Vec<(EntityKind, String)>,
    nullify: &mut Vec<(ForeignKey, String)>,
    seen: &mut HashSet<(EntityKind, String)>,
) -> Result<(), D::Error> {
    if !seen.insert((entity, id.to_string())) {
        return Ok(());
    }
    visited.push((entity, id.to_string()));

    for fk in ForeignKey::referencing(entity) {
        let children = source.dependents(fk, id)?;
        if children.is_empty() {
            continue;
        }
        match fk.on_delete() {
            OnDelete::Protect => {
                return Err(ShopError::Protected {
                    entity,
                    id: id.to_string(),
                    dependent: fk.child(),
                    count: children.len(),
                }
                .into());
            }
            OnDelete::Cascade => {
                for child_id in children {
                    collect(source, fk.child(), &child_id, visited, nullify, seen)?;
                }
            }
            OnDelete::SetNull => {
                nullify.extend(children.into_iter().map(|child_id| (fk, child_id)));
            }
        }
    }
    Ok(())
}
