use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category;
use crate::errors;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";
pub const STATUSES: [&str; 3] = [STATUS_PENDING, STATUS_APPROVED, STATUS_REJECTED];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "provider")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_name: String,
    pub service_name: String,
    pub description: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub category_id: Uuid,
    pub pricing: Option<String>,
    pub rating_avg: f64,
    pub rating_count: i32,
    pub skills: Vec<String>,
    pub experience: Option<String>,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Category,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_approved(&self) -> bool {
        self.status == STATUS_APPROVED
    }

    /// Complete coordinate pair, or None when either half is missing.
    pub fn geolocation(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }
}

pub fn validate_status(status: &str) -> Result<(), errors::ModelError> {
    if STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(errors::ModelError::Validation(format!("invalid status: {}", status)))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewProvider {
    pub owner_name: String,
    pub service_name: String,
    pub description: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub category_id: Uuid,
    pub pricing: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub experience: Option<String>,
}

pub async fn create(db: &DatabaseConnection, input: NewProvider) -> Result<Model, errors::ModelError> {
    if !input.email.contains('@') {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    for (field, value) in [
        ("owner_name", &input.owner_name),
        ("service_name", &input.service_name),
        ("description", &input.description),
        ("phone", &input.phone),
        ("address", &input.address),
    ] {
        if value.trim().is_empty() {
            return Err(errors::ModelError::Validation(format!("{} required", field)));
        }
    }
    if input.lat.is_some() != input.lng.is_some() {
        return Err(errors::ModelError::Validation("lat and lng must be provided together".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        owner_name: Set(input.owner_name.trim().to_string()),
        service_name: Set(input.service_name.trim().to_string()),
        description: Set(input.description.trim().to_string()),
        email: Set(input.email.to_lowercase()),
        phone: Set(input.phone.trim().to_string()),
        address: Set(input.address.trim().to_string()),
        lat: Set(input.lat),
        lng: Set(input.lng),
        category_id: Set(input.category_id),
        pricing: Set(input.pricing),
        rating_avg: Set(0.0),
        rating_count: Set(0),
        skills: Set(input.skills),
        experience: Set(input.experience),
        status: Set(STATUS_PENDING.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfile {
    pub owner_name: Option<String>,
    pub service_name: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub category_id: Option<Uuid>,
    pub pricing: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience: Option<String>,
}

pub async fn update_profile(db: &DatabaseConnection, id: Uuid, input: UpdateProfile) -> Result<Model, errors::ModelError> {
    if input.lat.is_some() != input.lng.is_some() {
        return Err(errors::ModelError::Validation("lat and lng must be provided together".into()));
    }
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?
        .ok_or_else(|| errors::ModelError::Validation("provider not found".into()))?
        .into();
    if let Some(v) = input.owner_name {
        am.owner_name = Set(v.trim().to_string());
    }
    if let Some(v) = input.service_name {
        am.service_name = Set(v.trim().to_string());
    }
    if let Some(v) = input.description {
        am.description = Set(v.trim().to_string());
    }
    if let Some(v) = input.phone {
        am.phone = Set(v.trim().to_string());
    }
    if let Some(v) = input.address {
        am.address = Set(v.trim().to_string());
    }
    if input.lat.is_some() {
        am.lat = Set(input.lat);
        am.lng = Set(input.lng);
    }
    if let Some(v) = input.category_id {
        am.category_id = Set(v);
    }
    if let Some(v) = input.pricing {
        am.pricing = Set(Some(v));
    }
    if let Some(v) = input.skills {
        am.skills = Set(v);
    }
    if let Some(v) = input.experience {
        am.experience = Set(Some(v));
    }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn set_status(db: &DatabaseConnection, id: Uuid, status: &str) -> Result<Model, errors::ModelError> {
    validate_status(status)?;
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?
        .ok_or_else(|| errors::ModelError::Validation("provider not found".into()))?
        .into();
    am.status = Set(status.to_string());
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn hard_delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_validation() {
        assert!(validate_status("approved").is_ok());
        assert!(validate_status("pending").is_ok());
        assert!(validate_status("rejected").is_ok());
        assert!(validate_status("banana").is_err());
        assert!(validate_status("Approved").is_err());
    }
}
