//! Connection-level type-info API.
//!
//! A `Connection` pairs one catalog session with the cache of descriptors
//! resolved on it. Every successful `get_type_info` hands out one borrow of
//! a cached descriptor that must be returned with `release_type_info`.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::debug;
use tokio::sync::{Mutex, MutexGuard};

use crate::config::TypeInfoOptions;
use crate::error::{Error, Result};
use crate::protocol::describe::Catalog;
use crate::typeinfo::cache::TypeInfoCache;
use crate::typeinfo::resolve::Resolver;
use crate::typeinfo::{ObjectName, TypeInfo, TypeKind};

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of the connection a descriptor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub(crate) fn next() -> Self {
        Self(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A catalog session with its type-info cache.
pub struct Connection<C: Catalog> {
    id: ConnectionId,
    catalog: C,
    cache: TypeInfoCache,
    options: TypeInfoOptions,
}

impl<C: Catalog> Connection<C> {
    /// Create a connection with default options.
    pub fn new(catalog: C) -> Self {
        Self::with_options(catalog, TypeInfoOptions::default())
    }

    /// Create a connection with explicit options.
    pub fn with_options(catalog: C, options: TypeInfoOptions) -> Self {
        let id = ConnectionId::next();
        debug!("connection {} opened", id);
        Self {
            id,
            catalog,
            cache: TypeInfoCache::new(),
            options,
        }
    }

    /// Resolve a table, view or type by name.
    ///
    /// `name` may be schema-qualified (`schema.object`); unquoted parts are
    /// upper-cased. `expected = None` accepts any kind. Synonyms are followed
    /// to the object they name.
    ///
    /// # Example
    ///
    /// ```
    /// use oracle_typeinfo::protocol::memory::MemoryCatalog;
    /// use oracle_typeinfo::{ColumnMetadata, Connection, TypeKind};
    ///
    /// # tokio_test::block_on(async {
    /// let mut catalog = MemoryCatalog::new("HR");
    /// catalog.add_table("HR", "EMP", vec![ColumnMetadata::new("ID", 2)]);
    ///
    /// let mut conn = Connection::new(catalog);
    /// let emp = conn.get_type_info("hr.emp", Some(TypeKind::Table)).await.unwrap();
    /// assert_eq!(emp.column_count(), 1);
    /// conn.release_type_info(&emp).unwrap();
    /// # });
    /// ```
    pub async fn get_type_info(
        &mut self,
        name: &str,
        expected: Option<TypeKind>,
    ) -> Result<Arc<TypeInfo>> {
        let name = ObjectName::parse(name, &self.options)?;
        Resolver::new(&mut self.catalog, &mut self.cache, &self.options, self.id)
            .resolve(name, expected)
            .await
    }

    /// Return one borrow of a descriptor; the last one evicts it.
    pub fn release_type_info(&mut self, info: &Arc<TypeInfo>) -> Result<()> {
        if info.connection_id() != self.id {
            return Err(Error::invalid_argument(format!(
                "type info {} belongs to connection {}, not {}",
                info.object_name(),
                info.connection_id(),
                self.id
            )));
        }
        self.cache.release(info)?;
        Ok(())
    }

    /// Whether a descriptor is cached, without taking a borrow.
    pub fn contains(&self, kind: Option<TypeKind>, name: &str) -> Result<bool> {
        let name = ObjectName::parse(name, &self.options)?;
        Ok(self.cache.contains(kind, &name))
    }

    /// Outstanding borrows of a descriptor, `None` if not cached.
    pub fn refcount(&self, info: &Arc<TypeInfo>) -> Option<usize> {
        self.cache.refcount(info)
    }

    /// Number of cached descriptors.
    pub fn cached_type_count(&self) -> usize {
        self.cache.len()
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn options(&self) -> &TypeInfoOptions {
        &self.options
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut C {
        &mut self.catalog
    }

    /// Close the connection, dropping every cached descriptor.
    pub fn close(mut self) -> C {
        debug!(
            "connection {} closed with {} cached type infos",
            self.id,
            self.cache.len()
        );
        self.cache.clear();
        self.catalog
    }
}

/// A connection shared between tasks.
///
/// The lock is held for a whole find-or-create sequence, so concurrent
/// lookups of one name create at most one descriptor.
pub struct SharedConnection<C: Catalog> {
    inner: Arc<Mutex<Connection<C>>>,
}

impl<C: Catalog> Clone for SharedConnection<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Catalog> SharedConnection<C> {
    pub fn new(conn: Connection<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(conn)),
        }
    }

    /// See `Connection::get_type_info`.
    pub async fn get_type_info(
        &self,
        name: &str,
        expected: Option<TypeKind>,
    ) -> Result<Arc<TypeInfo>> {
        let mut conn = self.inner.lock().await;
        conn.get_type_info(name, expected).await
    }

    /// See `Connection::release_type_info`.
    pub async fn release_type_info(&self, info: &Arc<TypeInfo>) -> Result<()> {
        self.inner.lock().await.release_type_info(info)
    }

    /// Lock the connection for a longer sequence of operations.
    pub async fn lock(&self) -> MutexGuard<'_, Connection<C>> {
        self.inner.lock().await
    }
}
