use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "manufacturer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

/// Makes known to the catalog at first boot.
pub const DEFAULT_MAKES: [(i32, &str); 5] = [
    (100, "Audi"),
    (101, "Chevrolet"),
    (102, "Ford"),
    (103, "BMW"),
    (104, "Dodge"),
];

pub async fn create(db: &DatabaseConnection, code: i32, name: &str) -> Result<Model, errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    let am = ActiveModel { code: Set(code), name: Set(name.to_string()) };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Insert the default makes, skipping codes that already exist.
pub async fn seed_defaults(db: &DatabaseConnection) -> Result<(), errors::ModelError> {
    let mut inserted = 0u32;
    for (code, name) in DEFAULT_MAKES {
        let existing = Entity::find_by_id(code)
            .one(db)
            .await
            .map_err(|e| errors::ModelError::Db(e.to_string()))?;
        if existing.is_none() {
            create(db, code, name).await?;
            inserted += 1;
        }
    }
    if inserted > 0 {
        info!(inserted, "seeded manufacturers");
    }
    Ok(())
}
