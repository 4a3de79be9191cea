use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;

use models::{category, provider, user};

use crate::errors::ServiceError;

/// Platform-wide counters for the admin dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub total_users: u64,
    pub total_providers: u64,
    pub pending_providers: u64,
    pub approved_providers: u64,
    pub rejected_providers: u64,
    pub total_categories: u64,
}

pub async fn stats(db: &DatabaseConnection) -> Result<PlatformStats, ServiceError> {
    let db_err = |e: sea_orm::DbErr| ServiceError::Db(e.to_string());

    let total_users = user::Entity::find()
        .filter(user::Column::Role.eq(user::ROLE_USER))
        .count(db)
        .await
        .map_err(db_err)?;
    let total_providers = provider::Entity::find().count(db).await.map_err(db_err)?;
    let pending_providers = provider::Entity::find()
        .filter(provider::Column::Status.eq(provider::STATUS_PENDING))
        .count(db)
        .await
        .map_err(db_err)?;
    let approved_providers = provider::Entity::find()
        .filter(provider::Column::Status.eq(provider::STATUS_APPROVED))
        .count(db)
        .await
        .map_err(db_err)?;
    let rejected_providers = provider::Entity::find()
        .filter(provider::Column::Status.eq(provider::STATUS_REJECTED))
        .count(db)
        .await
        .map_err(db_err)?;
    let total_categories = category::Entity::find().count(db).await.map_err(db_err)?;

    Ok(PlatformStats {
        total_users,
        total_providers,
        pending_providers,
        approved_providers,
        rejected_providers,
        total_categories,
    })
}

#[cfg(test)]
mod tests {
    use super::PlatformStats;

    #[test]
    fn stats_serialize_camel_case() {
        let s = PlatformStats {
            total_users: 1,
            total_providers: 2,
            pending_providers: 1,
            approved_providers: 1,
            rejected_providers: 0,
            total_categories: 3,
        };
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["totalUsers"], 1);
        assert_eq!(json["pendingProviders"], 1);
        assert_eq!(json["totalCategories"], 3);
    }
}
