use std::collections::HashMap;

use anyhow::bail;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::repo::{AttrValue, Entity, Repository};

struct Table<E> {
    rows: HashMap<Uuid, E>,
    /// Ids in insertion order. Re-adding an existing id keeps its slot.
    order: Vec<Uuid>,
}

impl<E> Default for Table<E> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }
}

/// Process-local `Repository` backed by a hash map.
///
/// Every call takes the lock once, so single operations are atomic; nothing
/// is held across an await point.
pub struct InMemoryRepository<E> {
    table: RwLock<Table<E>>,
}

impl<E> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.table.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn add(&self, entity: E) -> anyhow::Result<E> {
        let mut table = self.table.write();
        let id = entity.id();
        if table.rows.insert(id, entity.clone()).is_none() {
            table.order.push(id);
        }
        Ok(entity)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<E>> {
        Ok(self.table.read().rows.get(&id).cloned())
    }

    async fn get_all(&self) -> anyhow::Result<Vec<E>> {
        let table = self.table.read();
        Ok(table
            .order
            .iter()
            .filter_map(|id| table.rows.get(id).cloned())
            .collect())
    }

    async fn update(&self, id: Uuid, changes: E::Changes) -> anyhow::Result<Option<E>> {
        let mut table = self.table.write();
        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        row.apply(changes);
        row.touch(Utc::now());
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut table = self.table.write();
        if table.rows.remove(&id).is_none() {
            return Ok(false);
        }
        table.order.retain(|x| *x != id);
        Ok(true)
    }

    async fn get_by_attribute(&self, name: &str, value: &AttrValue) -> anyhow::Result<Vec<E>> {
        if !E::ATTRIBUTES.contains(&name) {
            bail!("unknown attribute '{}'", name);
        }
        let table = self.table.read();
        Ok(table
            .order
            .iter()
            .filter_map(|id| table.rows.get(id))
            .filter(|row| row.attribute(name).as_ref() == Some(value))
            .cloned()
            .collect())
    }
}
