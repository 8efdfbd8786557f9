use std::sync::Arc;

use crate::db::models::Student;
use crate::db::store::StudentStore;
use crate::error::RosterError;
use crate::pagination::Page;

/// Direct pass-through to the student store.
#[derive(Clone)]
pub struct StudentService {
    store: Arc<dyn StudentStore>,
}

impl StudentService {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    pub async fn get_students(&self, page: u32, size: u32) -> Result<Page<Student>, RosterError> {
        self.store.find_page(page, size).await
    }

    pub async fn get_student(&self, id: i64) -> Result<Option<Student>, RosterError> {
        self.store.find_by_id(id).await
    }

    pub async fn save(&self, student: Student) -> Result<Student, RosterError> {
        self.store.save(student).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), RosterError> {
        self.store.delete_by_id(id).await
    }
}
