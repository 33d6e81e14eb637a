//! Student repository for database operations.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use domain::models::{Student, StudentFields};

use crate::entities::StudentEntity;
use crate::metrics::{record_pool_metrics, QueryTimer};
use crate::store::{
    is_write_conflict, reconcile_write_conflict, StoreError, StoreResult, StudentStore,
};

const STUDENT_COLUMNS: &str = "id, first_name, last_name, program, created_at, updated_at";

/// PostgreSQL-backed [`StudentStore`].
#[derive(Clone)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    /// Creates a new StudentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check whether a student row exists.
    pub async fn exists(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("student_exists");
        let result =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await;
        timer.record();
        result
    }
}

#[async_trait]
impl StudentStore for StudentRepository {
    async fn list(&self) -> StoreResult<Vec<Student>> {
        let timer = QueryTimer::new("list_students");
        let result = sqlx::query_as::<_, StudentEntity>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(Student::from).collect())
    }

    async fn get(&self, id: Uuid) -> StoreResult<Student> {
        let timer = QueryTimer::new("get_student");
        let result = sqlx::query_as::<_, StudentEntity>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result?.map(Student::from).ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, fields: StudentFields) -> StoreResult<Student> {
        let timer = QueryTimer::new("create_student");
        let result = sqlx::query_as::<_, StudentEntity>(&format!(
            r#"
            INSERT INTO students (first_name, last_name, program)
            VALUES ($1, $2, $3)
            RETURNING {STUDENT_COLUMNS}
            "#
        ))
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.program)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.into())
    }

    async fn update(&self, id: Uuid, fields: StudentFields) -> StoreResult<Student> {
        let timer = QueryTimer::new("update_student");
        let result = sqlx::query_as::<_, StudentEntity>(&format!(
            r#"
            UPDATE students SET
                first_name = $2,
                last_name = $3,
                program = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {STUDENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.program)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        match result {
            Ok(Some(entity)) => Ok(entity.into()),
            Ok(None) => Err(StoreError::NotFound(id)),
            Err(err) if is_write_conflict(&err) => {
                // The row may have been deleted by the transaction we collided with.
                warn!(student_id = %id, error = %err, "Write conflict while updating student");
                let still_exists = self.exists(id).await?;
                Err(reconcile_write_conflict(id, still_exists))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let timer = QueryTimer::new("delete_student");
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();

        if result?.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        record_pool_metrics(&self.pool);
        Ok(())
    }
}
