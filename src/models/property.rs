use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub price: f64,
    pub price_currency: String,
    pub area: f64,
    pub total_area: f64,
    pub measured_area: Option<f64>,
    pub total_rooms: Option<f64>,
    pub toilets: Option<i32>,
    pub construction_year: Option<i32>,
    pub renovation_year: Option<i32>,
    pub total_floors: Option<i32>,
    pub heating: String,
    pub outer_walls: String,
    pub roof_type: String,
    pub description: String,
    pub energy_class: Option<String>,
    pub street_name: String,
    pub street_number: Option<String>,
    pub postal_code: String,
    pub city: String,
    pub region: Option<String>,
    /// Unicode lower-case copies of the searchable text columns. SQLite's
    /// `LOWER()` only folds ASCII, so case-insensitive matching runs on these.
    pub street_name_lc: String,
    pub postal_code_lc: String,
    pub city_lc: String,
    /// ISO 3166-1 alpha-2, always stored upper-cased.
    pub country_code: String,
    /// Upper-snake `PropertyType` tag.
    pub property_type: String,
    /// Upper-snake `PropertyStatus` tag, `ACTIVE` unless set otherwise.
    #[sea_orm(default_value = "ACTIVE")]
    pub status: String,
    /// Set to NULL when the owning user is deleted.
    pub owner_id: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    Owner,
    #[sea_orm(has_many = "super::property_image::Entity")]
    Images,
    #[sea_orm(has_many = "super::favorite::Entity")]
    Favorites,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::property_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl Related<super::favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

fn folded(value: &ActiveValue<String>) -> Option<String> {
    match value {
        ActiveValue::Set(text) => Some(text.to_lowercase()),
        _ => None,
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if let Some(lc) = folded(&self.street_name) {
            self.street_name_lc = Set(lc);
        }
        if let Some(lc) = folded(&self.postal_code) {
            self.postal_code_lc = Set(lc);
        }
        if let Some(lc) = folded(&self.city) {
            self.city_lc = Set(lc);
        }
        Ok(self)
    }
}
