use async_trait::async_trait;
use chrono::Utc;
use common::pagination::Pagination;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};

use models::{car, manufacturer};

use crate::car::domain::CarDraft;
use crate::errors::ServiceError;

#[async_trait]
pub trait CarRepository: Send + Sync {
    async fn list(&self, page: Pagination) -> Result<Vec<car::Model>, ServiceError>;
    async fn get(&self, id: i64) -> Result<Option<car::Model>, ServiceError>;
    async fn create(&self, draft: CarDraft) -> Result<car::Model, ServiceError>;
    async fn update(&self, id: i64, draft: CarDraft) -> Result<car::Model, ServiceError>;
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
    async fn manufacturer(&self, code: i32) -> Result<Option<manufacturer::Model>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmCarRepository {
    pub db: DatabaseConnection,
}

fn apply_draft(am: &mut car::ActiveModel, draft: CarDraft) {
    am.condition = Set(draft.condition);
    am.manufacturer_code = Set(draft.manufacturer_code);
    am.model = Set(draft.model);
    am.model_year = Set(draft.model_year);
    am.production_year = Set(draft.production_year);
    am.mileage = Set(draft.mileage);
    am.external_color = Set(draft.external_color);
    am.body = Set(draft.body);
    am.engine = Set(draft.engine);
    am.fuel_type = Set(draft.fuel_type);
    am.number_of_doors = Set(draft.number_of_doors);
    am.latitude = Set(draft.latitude);
    am.longitude = Set(draft.longitude);
    am.updated_at = Set(Utc::now().into());
}

#[async_trait]
impl CarRepository for SeaOrmCarRepository {
    async fn list(&self, page: Pagination) -> Result<Vec<car::Model>, ServiceError> {
        let (page_idx, per_page) = page.normalize();
        car::Entity::find()
            .order_by_asc(car::Column::Id)
            .paginate(&self.db, per_page)
            .fetch_page(page_idx)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn get(&self, id: i64) -> Result<Option<car::Model>, ServiceError> {
        car::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn create(&self, draft: CarDraft) -> Result<car::Model, ServiceError> {
        let now = Utc::now().into();
        let mut am = car::ActiveModel {
            created_at: Set(now),
            ..Default::default()
        };
        apply_draft(&mut am, draft);
        am.insert(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn update(&self, id: i64, draft: CarDraft) -> Result<car::Model, ServiceError> {
        let mut am: car::ActiveModel = car::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
            .ok_or_else(|| ServiceError::not_found("car"))?
            .into();
        apply_draft(&mut am, draft);
        am.update(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let res = car::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }

    async fn manufacturer(&self, code: i32) -> Result<Option<manufacturer::Model>, ServiceError> {
        manufacturer::Entity::find_by_id(code)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }
}
