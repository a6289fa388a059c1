use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{errors, task};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_name: String,
    pub project_start_date: Date,
    pub project_completion_date: Date,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Task }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Task => Entity::has_many(task::Entity).into(),
        }
    }
}

impl Related<task::Entity> for Entity {
    fn to() -> RelationDef { Relation::Task.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("project name required".into()));
    }
    Ok(())
}

pub fn validate_date_range(start: Date, completion: Date) -> Result<(), errors::ModelError> {
    if start > completion {
        return Err(errors::ModelError::Validation(
            "Start date can not be after Completion date".into(),
        ));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    start: Date,
    completion: Date,
) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    validate_date_range(start, completion)?;

    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        project_name: Set(name.to_string()),
        project_start_date: Set(start),
        project_completion_date: Set(completion),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(conn).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
