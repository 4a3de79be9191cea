use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use models::user;

use crate::{errors::ServiceError, pagination::Pagination};

/// Get a user by id.
pub async fn get_user(db: &DatabaseConnection, id: Uuid) -> Result<Option<user::Model>, ServiceError> {
    let found = user::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Update a user's own profile fields.
pub async fn update_profile(
    db: &DatabaseConnection,
    id: Uuid,
    input: user::UpdateProfile,
) -> Result<user::Model, ServiceError> {
    if get_user(db, id).await?.is_none() {
        return Err(ServiceError::not_found("user"));
    }
    let updated = user::update_profile(db, id, input).await?;
    Ok(updated)
}

/// List end-user accounts (admin view; excludes admins).
pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>, ServiceError> {
    let users = user::Entity::find()
        .filter(user::Column::Role.eq(user::ROLE_USER))
        .order_by_asc(user::Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(users)
}

/// List end-user accounts with pagination.
pub async fn list_users_paginated(
    db: &DatabaseConnection,
    opts: Pagination,
) -> Result<Vec<user::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    // SeaORM's paginate uses 0-based page index internally via fetch_page
    let users = user::Entity::find()
        .filter(user::Column::Role.eq(user::ROLE_USER))
        .order_by_asc(user::Column::CreatedAt)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(users)
}

/// Hard-delete a user (removes record; favorites cascade).
pub async fn delete_user(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let deleted = user::hard_delete(db, id).await?;
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn user_profile_roundtrip() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let u = user::create(
            &db,
            user::NewUser {
                name: "Svc User".into(),
                email: format!("svc_{}@example.com", Uuid::new_v4()),
                phone: None,
                address: None,
                lat: None,
                lng: None,
            },
            user::ROLE_USER,
        )
        .await?;

        let updated = update_profile(
            &db,
            u.id,
            user::UpdateProfile {
                name: Some("New Name".into()),
                phone: Some("9876500000".into()),
                address: None,
                lat: Some(19.07),
                lng: Some(72.87),
            },
        )
        .await?;
        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.lat, Some(19.07));

        // half a coordinate pair must not slip through
        let err = update_profile(
            &db,
            u.id,
            user::UpdateProfile { lat: Some(1.0), ..Default::default() },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));

        assert!(delete_user(&db, u.id).await?);
        assert!(get_user(&db, u.id).await?.is_none());
        Ok(())
    }
}
