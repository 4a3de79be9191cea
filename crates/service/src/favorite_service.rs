use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use models::{favorite, provider};

use crate::errors::ServiceError;

/// Toggle a provider on a user's favorites list. Returns `true` when the
/// provider was added, `false` when it was removed.
pub async fn toggle_favorite(db: &DatabaseConnection, user_id: Uuid, provider_id: Uuid) -> Result<bool, ServiceError> {
    let target = provider::Entity::find_by_id(provider_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if target.is_none() {
        return Err(ServiceError::not_found("provider"));
    }

    if favorite::exists(db, user_id, provider_id).await? {
        favorite::remove(db, user_id, provider_id).await?;
        Ok(false)
    } else {
        favorite::add(db, user_id, provider_id).await?;
        Ok(true)
    }
}

/// The user's favorited providers, oldest favorite first.
pub async fn list_favorites(db: &DatabaseConnection, user_id: Uuid) -> Result<Vec<provider::Model>, ServiceError> {
    let ids = favorite::provider_ids_for_user(db, user_id).await?;
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut providers = provider::Entity::find()
        .filter(provider::Column::Id.is_in(ids.clone()))
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    // is_in loses the favorite ordering; restore it
    providers.sort_by_key(|p| ids.iter().position(|id| *id == p.id));
    Ok(providers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use models::{category, user};

    #[tokio::test]
    async fn toggle_adds_then_removes() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let cat = category::create(&db, &format!("fav_cat_{}", Uuid::new_v4()), None, None).await?;
        let p = provider::create(
            &db,
            provider::NewProvider {
                owner_name: "Owner".into(),
                service_name: "Fav Services".into(),
                description: "test".into(),
                email: format!("fav_{}@example.com", Uuid::new_v4()),
                phone: "9876500000".into(),
                address: "12 MG Road".into(),
                lat: None,
                lng: None,
                category_id: cat.id,
                pricing: None,
                skills: Vec::new(),
                experience: None,
            },
        )
        .await?;
        let u = user::create(
            &db,
            user::NewUser {
                name: "Fav User".into(),
                email: format!("fav_{}@example.com", Uuid::new_v4()),
                phone: None,
                address: None,
                lat: None,
                lng: None,
            },
            user::ROLE_USER,
        )
        .await?;

        assert!(toggle_favorite(&db, u.id, p.id).await?);
        let favs = list_favorites(&db, u.id).await?;
        assert_eq!(favs.len(), 1);
        assert_eq!(favs[0].id, p.id);

        assert!(!toggle_favorite(&db, u.id, p.id).await?);
        assert!(list_favorites(&db, u.id).await?.is_empty());

        let err = toggle_favorite(&db, u.id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        user::hard_delete(&db, u.id).await?;
        provider::hard_delete(&db, p.id).await?;
        category::hard_delete(&db, cat.id).await?;
        Ok(())
    }
}
