use super::store::{check_unique, Store};
use super::{delete_record, logged, DeletePlan};
use crate::errors::Result;
use crate::model::{EntityKind, NewUser, User};

fn check_username(store: &Store, user: &User) -> Result<()> {
    check_unique(
        store
            .users
            .values()
            .map(|u| (u.id.as_str(), u.username.as_str())),
        &user.id,
        EntityKind::User,
        "username",
        &user.username,
    )
}

/// Register an account able to own products
///
/// # Errors
///
/// * `UniqueViolation` - the username is taken
pub fn create_user(store: &mut Store, new: NewUser) -> Result<String> {
    add_user(store, User::create(new))
}

/// # Errors
///
/// * `AlreadyExists` - the id is taken
/// * `UniqueViolation` - the username is taken
pub fn add_user(store: &mut Store, user: User) -> Result<String> {
    logged("create_user", || {
        store.check_new_id(EntityKind::User, &user.id)?;
        check_username(store, &user)?;
        let id = user.id.clone();
        store.insert_user(user);
        Ok(id)
    })
}

/// # Errors
///
/// * `NotFound` - no user has this id
pub fn read_user<'a>(store: &'a Store, id: &str) -> Result<&'a User> {
    store.get_user(id)
}

/// # Errors
///
/// * `NotFound` - no user has this id
/// * `UniqueViolation` - the username is taken
pub fn update_user(store: &mut Store, mut user: User) -> Result<()> {
    logged("update_user", || {
        user.created_at = store.get_user(&user.id)?.created_at;
        check_username(store, &user)?;
        store.insert_user(user);
        Ok(())
    })
}

/// Delete an account that owns no products
///
/// # Errors
///
/// * `NotFound` - no user has this id
/// * `Protected` - the user still owns products
pub fn delete_user(store: &mut Store, id: &str) -> Result<DeletePlan> {
    delete_record(store, "delete_user", EntityKind::User, id)
}

pub fn list_users(store: &Store) -> Vec<&User> {
    store.list_users()
}
