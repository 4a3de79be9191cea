use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use uuid::Uuid;

use crate::errors;

// No Serialize on purpose: password hashes never leave the data layer.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "credential")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub principal_id: Uuid,
    pub password_hash: String,
    pub password_algorithm: String,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn find(db: &DatabaseConnection, principal_id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(principal_id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn upsert_password(
    db: &DatabaseConnection,
    principal_id: Uuid,
    password_hash: String,
    password_algorithm: &str,
) -> Result<Model, errors::ModelError> {
    let existing = Entity::find_by_id(principal_id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    match existing {
        Some(found) => {
            let mut am: ActiveModel = found.into();
            am.password_hash = Set(password_hash);
            am.password_algorithm = Set(password_algorithm.to_string());
            am.updated_at = Set(Utc::now().into());
            am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
        }
        None => {
            let am = ActiveModel {
                principal_id: Set(principal_id),
                password_hash: Set(password_hash),
                password_algorithm: Set(password_algorithm.to_string()),
                updated_at: Set(Utc::now().into()),
            };
            am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
        }
    }
}
