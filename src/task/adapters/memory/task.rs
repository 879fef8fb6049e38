//! In-memory task repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskId, TaskStatusKind},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe, insertion-ordered in-memory task repository.
///
/// The lock is the single serialization point for all task mutations.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: Vec<Task>,
    positions: HashMap<TaskId, usize>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Returns the stored task with identifier `id`.
fn slot_mut<'a>(
    state: &'a mut InMemoryTaskState,
    id: &TaskId,
) -> TaskRepositoryResult<&'a mut Task> {
    let position = *state
        .positions
        .get(id)
        .ok_or_else(|| TaskRepositoryError::NotFound(id.clone()))?;
    state
        .tasks
        .get_mut(position)
        .ok_or_else(|| TaskRepositoryError::NotFound(id.clone()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert_if_absent(&self, task: &Task) -> TaskRepositoryResult<bool> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.positions.contains_key(task.id()) {
            return Ok(false);
        }

        let position = state.tasks.len();
        state.positions.insert(task.id().clone(), position);
        state.tasks.push(task.clone());
        Ok(true)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let slot = slot_mut(&mut state, task.id())?;
        *slot = task.clone();
        Ok(())
    }

    async fn update_if_status(
        &self,
        task: &Task,
        expected: TaskStatusKind,
    ) -> TaskRepositoryResult<bool> {
        let mut state = self.state.write().map_err(lock_error)?;
        let slot = slot_mut(&mut state, task.id())?;
        if slot.status().kind() != expected {
            return Ok(false);
        }
        *slot = task.clone();
        Ok(true)
    }

    async fn find_by_id(&self, id: &TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .positions
            .get(id)
            .and_then(|position| state.tasks.get(*position))
            .cloned())
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.clone())
    }
}
