use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use models::provider;

use crate::errors::ServiceError;
use crate::search::{self, SearchQuery, SearchResult};

/// Run a proximity search against the catalog.
///
/// The indexable predicates (status, category, rating floor) are pushed into
/// the SQL fetch; term matching stays application-side because `skills` is an
/// array column. The pure pipeline then re-applies the complete predicate, so
/// correctness never depends on how far the fetch narrowed.
pub async fn search_providers(db: &DatabaseConnection, query: &SearchQuery) -> Result<Vec<SearchResult>, ServiceError> {
    let mut find = provider::Entity::find().filter(provider::Column::Status.eq(provider::STATUS_APPROVED));
    if let Some(category) = query.category {
        find = find.filter(provider::Column::CategoryId.eq(category));
    }
    if let Some(min_rating) = query.min_rating {
        find = find.filter(provider::Column::RatingAvg.gte(min_rating));
    }
    let candidates = find
        .order_by_asc(provider::Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(search::search(candidates, query))
}

/// Get a provider by id.
pub async fn get_provider(db: &DatabaseConnection, id: Uuid) -> Result<Option<provider::Model>, ServiceError> {
    let found = provider::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Get a provider by id for public consumption: anything not approved is
/// indistinguishable from absent.
pub async fn get_public_provider(db: &DatabaseConnection, id: Uuid) -> Result<Option<provider::Model>, ServiceError> {
    let found = get_provider(db, id).await?;
    Ok(found.filter(provider::Model::is_approved))
}

/// Update a provider's own profile fields.
pub async fn update_profile(
    db: &DatabaseConnection,
    id: Uuid,
    input: provider::UpdateProfile,
) -> Result<provider::Model, ServiceError> {
    if get_provider(db, id).await?.is_none() {
        return Err(ServiceError::not_found("provider"));
    }
    let updated = provider::update_profile(db, id, input).await?;
    Ok(updated)
}

/// Set the moderation status (admin operation). Validates against the three
/// known statuses.
pub async fn set_status(db: &DatabaseConnection, id: Uuid, status: &str) -> Result<provider::Model, ServiceError> {
    provider::validate_status(status)?;
    if get_provider(db, id).await?.is_none() {
        return Err(ServiceError::not_found("provider"));
    }
    let updated = provider::set_status(db, id, status).await?;
    Ok(updated)
}

/// List all providers regardless of status (admin view).
pub async fn list_providers(db: &DatabaseConnection) -> Result<Vec<provider::Model>, ServiceError> {
    let providers = provider::Entity::find()
        .order_by_asc(provider::Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(providers)
}

/// Hard-delete a provider (removes record).
pub async fn delete_provider(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let deleted = provider::hard_delete(db, id).await?;
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use models::category;

    async fn seed_provider(
        db: &DatabaseConnection,
        category_id: Uuid,
        service_name: &str,
        lat: f64,
        lng: f64,
        status: &str,
    ) -> anyhow::Result<provider::Model> {
        let p = provider::create(
            db,
            provider::NewProvider {
                owner_name: "Owner".into(),
                service_name: service_name.into(),
                description: "test provider".into(),
                email: format!("p_{}@example.com", Uuid::new_v4()),
                phone: "9876500000".into(),
                address: "12 MG Road".into(),
                lat: Some(lat),
                lng: Some(lng),
                category_id,
                pricing: None,
                skills: vec!["general".into()],
                experience: None,
            },
        )
        .await?;
        Ok(provider::set_status(db, p.id, status).await?)
    }

    #[tokio::test]
    async fn search_is_distance_ordered_and_approved_only() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let cat = category::create(&db, &format!("svc_cat_{}", Uuid::new_v4()), None, None).await?;

        // ~0.09° of longitude at the equator ≈ 10 km
        let far = seed_provider(&db, cat.id, "Far Services", 0.0, 0.27, provider::STATUS_APPROVED).await?;
        let near = seed_provider(&db, cat.id, "Near Services", 0.0, 0.09, provider::STATUS_APPROVED).await?;
        let hidden = seed_provider(&db, cat.id, "Hidden Services", 0.0, 0.01, provider::STATUS_PENDING).await?;

        let query = SearchQuery::from_parts(None, Some(cat.id), None, Some(0.0), Some(0.0), Some(50.0))?;
        let results = search_providers(&db, &query).await?;

        let names: Vec<&str> = results.iter().map(|r| r.provider.service_name.as_str()).collect();
        assert_eq!(names, ["Near Services", "Far Services"]);
        assert!(results.iter().all(|r| r.distance_km.is_some()));

        // cleanup
        for id in [far.id, near.id, hidden.id] {
            provider::hard_delete(&db, id).await?;
        }
        category::hard_delete(&db, cat.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn public_lookup_hides_unapproved() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let cat = category::create(&db, &format!("svc_cat_{}", Uuid::new_v4()), None, None).await?;
        let p = seed_provider(&db, cat.id, "Pending Services", 0.0, 0.0, provider::STATUS_PENDING).await?;

        assert!(get_public_provider(&db, p.id).await?.is_none());
        assert!(get_provider(&db, p.id).await?.is_some());

        set_status(&db, p.id, provider::STATUS_APPROVED).await?;
        assert!(get_public_provider(&db, p.id).await?.is_some());

        provider::hard_delete(&db, p.id).await?;
        category::hard_delete(&db, cat.id).await?;
        Ok(())
    }
}
