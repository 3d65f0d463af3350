//! In-process storage backend.
//!
//! One `RwLock` guards students, subjects and registrations together, so a
//! ledger insert observes and mutates a single consistent state.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::store::{
    Catalog, Ledger, Registration, RegistrationKey, StoreError, StudentDirectory, StudentRecord,
    SubjectRecord,
};

#[derive(Debug, Default)]
struct MemoryState {
    students: BTreeMap<i64, StudentRecord>,
    subjects: BTreeMap<i64, SubjectRecord>,
    registrations: BTreeMap<RegistrationKey, Registration>,
    next_subject_id: i64,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_student(&self, student: StudentRecord) {
        let mut state = self.state.write().await;
        state.students.insert(student.student_id, student);
    }

    pub async fn insert_subject(&self, subject: SubjectRecord) {
        let mut state = self.state.write().await;
        state.next_subject_id = state.next_subject_id.max(subject.subject_id);
        state.subjects.insert(subject.subject_id, subject);
    }

    pub async fn set_open_for_registration(&self, subject_id: i64, open: bool) -> bool {
        let mut state = self.state.write().await;
        match state.subjects.get_mut(&subject_id) {
            Some(subject) => {
                subject.is_open_for_registration = open;
                true
            }
            None => false,
        }
    }

    pub async fn registration_count(&self, subject_id: i64) -> usize {
        let state = self.state.read().await;
        state
            .registrations
            .keys()
            .filter(|k| k.subject_id == subject_id)
            .count()
    }

    pub async fn registration(&self, key: RegistrationKey) -> Option<Registration> {
        self.state.read().await.registrations.get(&key).cloned()
    }
}

impl MemoryState {
    fn course_count(&self, key: RegistrationKey) -> Option<i64> {
        let course = self.subjects.get(&key.subject_id)?.course_id;
        let count = self
            .registrations
            .keys()
            .filter(|k| k.student_id == key.student_id)
            .filter(|k| {
                self.subjects
                    .get(&k.subject_id)
                    .map(|s| s.course_id == course)
                    .unwrap_or(false)
            })
            .count();
        Some(count as i64)
    }

    fn seat_count(&self, subject_id: i64) -> i64 {
        self.registrations
            .keys()
            .filter(|k| k.subject_id == subject_id)
            .count() as i64
    }
}

#[async_trait]
impl StudentDirectory for MemoryStore {
    async fn find_student_by_id(&self, student_id: i64) -> Result<Option<StudentRecord>, StoreError> {
        Ok(self.state.read().await.students.get(&student_id).cloned())
    }
}

#[async_trait]
impl Catalog for MemoryStore {
    async fn find_subject(
        &self,
        subject_id: i64,
        include_deleted: bool,
    ) -> Result<Option<SubjectRecord>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .subjects
            .get(&subject_id)
            .filter(|s| include_deleted || !s.is_deleted)
            .cloned())
    }

    async fn save(&self, subject: &SubjectRecord) -> Result<SubjectRecord, StoreError> {
        let mut state = self.state.write().await;
        let mut stored = subject.clone();
        if stored.subject_id == 0 {
            state.next_subject_id += 1;
            stored.subject_id = state.next_subject_id;
        }
        state.next_subject_id = state.next_subject_id.max(stored.subject_id);
        state.subjects.insert(stored.subject_id, stored.clone());
        Ok(stored)
    }

    async fn subjects_for_student(&self, student_id: i64) -> Result<Vec<SubjectRecord>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .registrations
            .keys()
            .filter(|k| k.student_id == student_id)
            .filter_map(|k| state.subjects.get(&k.subject_id).cloned())
            .collect())
    }
}

#[async_trait]
impl Ledger for MemoryStore {
    async fn try_insert(
        &self,
        key: RegistrationKey,
        updated_by: &str,
        limit_per_course: i64,
    ) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;

        // An unknown subject has no course and no capacity: nothing is inserted.
        let Some(capacity) = state
            .subjects
            .get(&key.subject_id)
            .map(|s| i64::from(s.number_of_student_capacity))
        else {
            return Ok(false);
        };
        let course_count = state.course_count(key).unwrap_or(i64::MAX);
        if course_count >= limit_per_course || state.seat_count(key.subject_id) >= capacity {
            return Ok(false);
        }

        if state.registrations.contains_key(&key) {
            return Err(StoreError::DuplicateKey(key));
        }

        let now = Utc::now();
        state.registrations.insert(
            key,
            Registration {
                key,
                created_at: now,
                updated_at: now,
                updated_by: updated_by.to_string(),
            },
        );
        Ok(true)
    }

    async fn delete(&self, key: RegistrationKey) -> Result<bool, StoreError> {
        Ok(self.state.write().await.registrations.remove(&key).is_some())
    }
}
