use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use uuid::Uuid;

use models::category;

use crate::errors::ServiceError;

/// Create a category (admin operation).
pub async fn create_category(
    db: &DatabaseConnection,
    name: &str,
    icon: Option<&str>,
    description: Option<&str>,
) -> Result<category::Model, ServiceError> {
    let created = category::create(db, name, icon, description).await?;
    Ok(created)
}

/// List all categories, alphabetically.
pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>, ServiceError> {
    let categories = category::Entity::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(categories)
}

/// Get a category by id.
pub async fn get_category(db: &DatabaseConnection, id: Uuid) -> Result<Option<category::Model>, ServiceError> {
    let found = category::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Update a category's fields (admin operation).
pub async fn update_category(
    db: &DatabaseConnection,
    id: Uuid,
    name: Option<&str>,
    icon: Option<&str>,
    description: Option<&str>,
) -> Result<category::Model, ServiceError> {
    if get_category(db, id).await?.is_none() {
        return Err(ServiceError::not_found("category"));
    }
    let updated = category::update(db, id, name, icon, description).await?;
    Ok(updated)
}

/// Delete a category (admin operation). Fails while providers still reference it.
pub async fn delete_category(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let deleted = category::hard_delete(db, id).await?;
    Ok(deleted)
}
