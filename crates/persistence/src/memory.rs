//! In-process student store.
//!
//! Backs the service when `database.backend = "memory"` and drives the
//! handler tests. State lives only as long as the process.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use domain::models::{Student, StudentFields};

use crate::store::{StoreError, StoreResult, StudentStore};

/// [`StudentStore`] keeping records in a map guarded by a `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryStudentStore {
    students: RwLock<HashMap<Uuid, Student>>,
}

impl InMemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored students.
    pub async fn len(&self) -> usize {
        self.students.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.students.read().await.is_empty()
    }
}

#[async_trait]
impl StudentStore for InMemoryStudentStore {
    async fn list(&self) -> StoreResult<Vec<Student>> {
        let students = self.students.read().await;
        let mut all: Vec<Student> = students.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Student> {
        self.students
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, fields: StudentFields) -> StoreResult<Student> {
        let mut students = self.students.write().await;

        let mut id = Uuid::new_v4();
        while students.contains_key(&id) {
            id = Uuid::new_v4();
        }

        let now = Utc::now();
        let student = Student {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            program: fields.program,
            created_at: now,
            updated_at: now,
        };
        students.insert(id, student.clone());
        Ok(student)
    }

    async fn update(&self, id: Uuid, fields: StudentFields) -> StoreResult<Student> {
        let mut students = self.students.write().await;
        let student = students.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        student.first_name = fields.first_name;
        student.last_name = fields.last_name;
        student.program = fields.program;
        student.updated_at = Utc::now();
        Ok(student.clone())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.students
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
