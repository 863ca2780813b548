//! CRUD operations over the in-memory [`Store`]
//!
//! Each entity has its own module with `create_*`, `add_*`, `read_*`,
//! `update_*`, `delete_*` and `list_*`. Writes enforce unique columns and
//! foreign keys; deletes follow the planner in [`delete_policy`].

pub mod attribute_ops;
pub mod attribute_value_ops;
pub mod brand_ops;
pub mod category_ops;
pub mod delete_policy;
pub mod labels;
pub mod product_ops;
pub mod store;
pub mod sub_category_ops;
pub mod user_ops;

use std::time::Instant;

pub use delete_policy::{plan_delete, DeletePlan, Dependents};
pub use store::Store;

use crate::errors::{Result, ShopError};
use crate::model::{EntityKind, ForeignKey};
use crate::{log_op_end, log_op_error, log_op_start};

impl Dependents for Store {
    type Error = ShopError;

    fn dependents(&self, fk: ForeignKey, parent_id: &str) -> Result<Vec<String>> {
        Ok(self.referencing_ids(fk, parent_id))
    }
}

impl Store {
    fn apply_delete(&mut self, plan: &DeletePlan) {
        for (entity, id) in &plan.cascade {
            self.remove(*entity, id);
        }
        for (fk, child_id) in &plan.nullify {
            self.clear_reference(*fk, child_id);
        }
        let (entity, id) = &plan.root;
        self.remove(*entity, id);
    }
}

/// Run a write operation between start and end log events
pub(crate) fn logged<T>(op: &'static str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    log_op_start!(op);
    let start = Instant::now();
    match f() {
        Ok(value) => {
            log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64);
            Ok(value)
        }
        Err(err) => {
            log_op_error!(
                op,
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

/// Delete one row and apply its cascade, returning the executed plan
pub(crate) fn delete_record(
    store: &mut Store,
    op: &'static str,
    entity: EntityKind,
    id: &str,
) -> Result<DeletePlan> {
    log_op_start!(op, entity_id = id);
    let start = Instant::now();

    let planned = if store.contains(entity, id) {
        plan_delete(&*store, entity, id)
    } else {
        Err(ShopError::NotFound {
            entity,
            id: id.to_string(),
        })
    };

    match planned {
        Ok(plan) => {
            store.apply_delete(&plan);
            log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                entity_id = id,
                cascaded = plan.cascaded(),
                nullified = plan.nullified()
            );
            Ok(plan)
        }
        Err(err) => {
            log_op_error!(
                op,
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                entity_id = id
            );
            Err(err)
        }
    }
}
