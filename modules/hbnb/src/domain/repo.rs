use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Scalar attribute value used by `get_by_attribute` lookups.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Id(Uuid),
    Flag(bool),
    Int(i64),
    Number(f64),
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Uuid> for AttrValue {
    fn from(v: Uuid) -> Self {
        Self::Id(v)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        Self::Flag(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

/// A stored record: identity, timestamps, a typed change set and
/// name-addressable scalar attributes.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Mutable fields only; `id` and `created_at` are never part of it.
    type Changes: Send + 'static;

    /// Attribute names `attribute()` answers for.
    const ATTRIBUTES: &'static [&'static str];

    fn id(&self) -> Uuid;

    fn created_at(&self) -> DateTime<Utc>;

    /// Scalar value of `name`, or `None` if `name` is not in `ATTRIBUTES`.
    fn attribute(&self, name: &str) -> Option<AttrValue>;

    /// Merge `changes` into `self`. Does not touch timestamps.
    fn apply(&mut self, changes: Self::Changes);

    /// Set `updated_at`, never earlier than `created_at`.
    fn touch(&mut self, at: DateTime<Utc>);
}

/// Port for the domain layer: persistence operations the services need.
/// Object-safe and async-friendly via `async_trait`; the in-memory adapter
/// never suspends, an ORM-backed one may.
///
/// Absence is never an error: missing ids yield `None`/`false`.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Store `entity` under its id, overwriting any previous value.
    async fn add(&self, entity: E) -> anyhow::Result<E>;
    /// Load by id.
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<E>>;
    /// All entities; insertion order for the in-memory adapter.
    async fn get_all(&self) -> anyhow::Result<Vec<E>>;
    /// Merge `changes` and refresh `updated_at`.
    async fn update(&self, id: Uuid, changes: E::Changes) -> anyhow::Result<Option<E>>;
    /// Returns true if an entity was removed.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
    /// Every entity whose attribute `name` equals `value`.
    /// Errors on a name outside `E::ATTRIBUTES`.
    async fn get_by_attribute(&self, name: &str, value: &AttrValue) -> anyhow::Result<Vec<E>>;
}
