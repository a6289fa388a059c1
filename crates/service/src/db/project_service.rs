use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, ModelTrait,
    Order, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use models::project::{self, Entity as ProjectEntity};
use models::task::{self, Entity as TaskEntity};

use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest, SortDirection};

/// A project together with its owned task list.
pub type ProjectWithTasks = (project::Model, Vec<task::Model>);

/// Resolve a wire-format sort field name to a project column.
pub fn sort_column(field: &str) -> Result<project::Column, ServiceError> {
    match field {
        "id" => Ok(project::Column::Id),
        "projectName" => Ok(project::Column::ProjectName),
        "projectStartDate" => Ok(project::Column::ProjectStartDate),
        "projectCompletionDate" => Ok(project::Column::ProjectCompletionDate),
        other => Err(ServiceError::Validation(format!("Unknown sort field '{}'", other))),
    }
}

/// List all projects with their tasks, unpaginated.
pub async fn list_projects(db: &DatabaseConnection) -> Result<Vec<ProjectWithTasks>, ServiceError> {
    // SelectTwoMany orders by the parent primary key for row consolidation
    let rows = ProjectEntity::find()
        .find_with_related(TaskEntity)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// List one page of projects with their tasks, sorted per the request.
pub async fn list_projects_paginated(
    db: &DatabaseConnection,
    req: &PageRequest,
) -> Result<Page<ProjectWithTasks>, ServiceError> {
    let column = sort_column(&req.sort_field)?;
    let order = match req.sort_direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    };

    let paginator = ProjectEntity::find().order_by(column, order).paginate(db, req.page_size);
    let totals = paginator
        .num_items_and_pages()
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let projects = paginator
        .fetch_page(req.page_index())
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let tasks = projects
        .load_many(TaskEntity, db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;

    Ok(Page {
        items: projects.into_iter().zip(tasks).collect(),
        page_number: req.page_number,
        page_size: req.page_size,
        sort_field: req.sort_field.clone(),
        sort_direction: req.sort_direction,
        total_items: totals.number_of_items,
        total_pages: totals.number_of_pages,
    })
}

/// Create a project. The name must not be in use; dates must be ordered.
pub async fn create_project(
    db: &DatabaseConnection,
    name: &str,
    start: sea_orm::prelude::Date,
    completion: sea_orm::prelude::Date,
) -> Result<project::Model, ServiceError> {
    let in_use = ProjectEntity::find()
        .filter(project::Column::ProjectName.eq(name))
        .count(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        > 0;
    if in_use {
        info!(name = %name, "rejected duplicate project name");
        return Err(ServiceError::Validation(format!(
            "Project with the name '{}' already exists",
            name
        )));
    }
    // date ordering is validated in models::project
    let created = project::create(db, name, start, completion).await?;
    info!(id = %created.id, name = %created.project_name, "created project");
    Ok(created)
}

/// Get a project and its tasks by id.
pub async fn get_project(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<ProjectWithTasks>, ServiceError> {
    let Some(found) = ProjectEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
    else {
        return Ok(None);
    };
    let tasks = found
        .find_related(TaskEntity)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(Some((found, tasks)))
}

/// Replace an existing project's fields. The id stays fixed to the path
/// parameter; name uniqueness is not re-checked on update.
pub async fn update_project(
    db: &DatabaseConnection,
    id: Uuid,
    name: &str,
    start: sea_orm::prelude::Date,
    completion: sea_orm::prelude::Date,
) -> Result<project::Model, ServiceError> {
    let existing = ProjectEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::project_not_found(id))?;

    let mut am: project::ActiveModel = existing.into();
    am.project_name = Set(name.to_string());
    am.project_start_date = Set(start);
    am.project_completion_date = Set(completion);
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(id = %updated.id, "updated project");
    Ok(updated)
}

/// Delete a project by id; owned tasks go with it via FK cascade.
pub async fn delete_project(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = ProjectEntity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::project_not_found(id));
    }
    info!(id = %id, "deleted project");
    Ok(())
}

/// Add a task to a project. The whole load/scan/insert sequence runs in one
/// transaction; two concurrent adds with the same name can still both pass
/// the scan since neither sees the other's uncommitted row.
pub async fn add_task(
    db: &DatabaseConnection,
    project_id: Uuid,
    task_name: &str,
) -> Result<task::Model, ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;

    let found = ProjectEntity::find_by_id(project_id)
        .one(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::project_not_found(project_id))?;

    let tasks = found
        .find_related(TaskEntity)
        .all(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if tasks.iter().any(|t| t.task_name == task_name) {
        info!(project_id = %project_id, name = %task_name, "rejected duplicate task name");
        return Err(ServiceError::Validation("The task in the task list already".into()));
    }

    let created = task::create(&txn, project_id, task_name).await?;
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(id = %created.id, project_id = %project_id, "added task to project");
    Ok(created)
}

/// Remove a task from a project. Missing project is not-found; a task id
/// absent from that project's list is a validation failure.
pub async fn remove_task(
    db: &DatabaseConnection,
    project_id: Uuid,
    task_id: Uuid,
) -> Result<(), ServiceError> {
    let exists = ProjectEntity::find_by_id(project_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if exists.is_none() {
        return Err(ServiceError::project_not_found(project_id));
    }

    let res = TaskEntity::delete_many()
        .filter(task::Column::Id.eq(task_id))
        .filter(task::Column::ProjectId.eq(project_id))
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        info!(project_id = %project_id, task_id = %task_id, "task not found in project");
        return Err(ServiceError::Validation(format!("There is no task with ID {}", task_id)));
    }
    info!(project_id = %project_id, task_id = %task_id, "removed task from project");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn sort_column_covers_wire_names() {
        assert!(sort_column("id").is_ok());
        assert!(sort_column("projectName").is_ok());
        assert!(sort_column("projectStartDate").is_ok());
        assert!(sort_column("projectCompletionDate").is_ok());
        let err = sort_column("budget").unwrap_err();
        assert!(err.to_string().contains("Unknown sort field 'budget'"));
    }

    #[tokio::test]
    async fn project_crud_service() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await { Ok(db) => db, Err(e) => { eprintln!("skip: {}", e); return Ok(()); } };

        let name = format!("svc_project_{}", Uuid::new_v4());
        let p = create_project(&db, &name, d("2024-01-01"), d("2024-12-31")).await?;
        assert_eq!(p.project_name, name);

        // duplicate name is rejected
        let dup = create_project(&db, &name, d("2024-01-01"), d("2024-12-31")).await;
        assert!(matches!(dup, Err(ServiceError::Validation(_))));

        let (found, tasks) = get_project(&db, p.id).await?.unwrap();
        assert_eq!(found.id, p.id);
        assert!(tasks.is_empty());

        let updated = update_project(&db, p.id, &format!("{}_v2", name), d("2024-02-01"), d("2024-12-31")).await?;
        assert_eq!(updated.id, p.id);
        assert!(updated.project_name.ends_with("_v2"));

        delete_project(&db, p.id).await?;
        assert!(get_project(&db, p.id).await?.is_none());

        // deleting again reports not-found
        let gone = delete_project(&db, p.id).await;
        assert!(matches!(gone, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn task_add_and_remove() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await { Ok(db) => db, Err(e) => { eprintln!("skip: {}", e); return Ok(()); } };

        let name = format!("svc_tasks_{}", Uuid::new_v4());
        let p = create_project(&db, &name, d("2024-01-01"), d("2024-12-31")).await?;

        let t = add_task(&db, p.id, "Write migration plan").await?;
        assert_eq!(t.project_id, p.id);

        // same name again within the project is rejected
        let dup = add_task(&db, p.id, "Write migration plan").await;
        assert!(matches!(dup, Err(ServiceError::Validation(_))));

        // unknown project is not-found
        let missing = add_task(&db, Uuid::new_v4(), "anything").await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));

        // removing an unknown task id from an existing project is a validation error
        let bad_id = remove_task(&db, p.id, Uuid::new_v4()).await;
        assert!(matches!(bad_id, Err(ServiceError::Validation(_))));

        remove_task(&db, p.id, t.id).await?;
        let (_, tasks) = get_project(&db, p.id).await?.unwrap();
        assert!(tasks.is_empty());

        delete_project(&db, p.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn paginated_listing_sorts_and_counts() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await { Ok(db) => db, Err(e) => { eprintln!("skip: {}", e); return Ok(()); } };

        let tag = Uuid::new_v4().simple().to_string();
        let mut ids = Vec::new();
        for i in 0..3 {
            let p = create_project(
                &db,
                &format!("page_{}_{}", i, tag),
                d("2024-01-01"),
                d("2024-12-31"),
            )
            .await?;
            ids.push(p.id);
        }

        let req = PageRequest::new(1, 2, "projectName", "asc")?;
        let page = list_projects_paginated(&db, &req).await?;
        assert_eq!(page.page_number, 1);
        assert_eq!(page.page_size, 2);
        assert!(page.items.len() <= 2);
        assert!(page.total_items >= 3);

        // unknown sort field is rejected before touching the database
        let req = PageRequest::new(1, 2, "budget", "asc")?;
        let bad = list_projects_paginated(&db, &req).await;
        assert!(matches!(bad, Err(ServiceError::Validation(_))));

        for id in ids {
            delete_project(&db, id).await?;
        }
        Ok(())
    }
}
