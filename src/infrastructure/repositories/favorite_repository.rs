//! SeaORM implementation of FavoriteRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};

use crate::domain::{DomainError, Favorite, FavoriteRepository};
use crate::models::favorite::{ActiveModel, Column, Entity as FavoriteEntity, Model};

pub struct SeaOrmFavoriteRepository {
    db: DatabaseConnection,
}

impl SeaOrmFavoriteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<Model> for Favorite {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user: model.user_id,
            property_id: model.property_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            property: None,
        }
    }
}

#[async_trait]
impl FavoriteRepository for SeaOrmFavoriteRepository {
    async fn create(&self, user_id: i32, property_id: i32) -> Result<Favorite, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();
        let favorite = ActiveModel {
            user_id: Set(user_id),
            property_id: Set(property_id),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        // The UNIQUE(user_id, property_id) index decides races between concurrent requests.
        match favorite.insert(&self.db).await {
            Ok(model) => Ok(Favorite::from(model)),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(DomainError::conflict(
                    "duplicate_favorite",
                    "This property is already in your favorites.",
                )),
                _ => Err(err.into()),
            },
        }
    }

    async fn find_for_user(&self, user_id: i32) -> Result<Vec<Favorite>, DomainError> {
        let favorites = FavoriteEntity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(favorites.into_iter().map(Favorite::from).collect())
    }

    async fn find_owned(&self, id: i32, user_id: i32) -> Result<Option<Favorite>, DomainError> {
        let favorite = FavoriteEntity::find_by_id(id)
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        Ok(favorite.map(Favorite::from))
    }

    async fn delete_owned(&self, id: i32, user_id: i32) -> Result<(), DomainError> {
        let result = FavoriteEntity::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
