//! Per-connection cache of resolved descriptors.
//!
//! Entries are kept in insertion order and found by linear scan on
//! (kind, schema, object, link). Each entry counts the outstanding borrows
//! handed out by `get_type_info`; the entry is evicted when the count drops
//! to zero.

use std::sync::Arc;

use log::debug;

use crate::error::{Error, Result};

use super::{ObjectName, TypeInfo, TypeKind};

#[derive(Debug)]
struct CacheEntry {
    info: Arc<TypeInfo>,
    refcount: usize,
}

impl CacheEntry {
    fn matches(&self, kind: Option<TypeKind>, name: &ObjectName) -> bool {
        kind.map_or(true, |kind| self.info.kind() == kind) && self.info.object_name().matches(name)
    }
}

/// Resolved descriptors of one connection.
#[derive(Debug, Default)]
pub struct TypeInfoCache {
    entries: Vec<CacheEntry>,
}

impl TypeInfoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a descriptor and take a borrow on it.
    ///
    /// `kind = None` matches an entry of any kind.
    pub fn find(&mut self, kind: Option<TypeKind>, name: &ObjectName) -> Option<Arc<TypeInfo>> {
        let entry = self.entries.iter_mut().find(|e| e.matches(kind, name))?;
        entry.refcount += 1;
        debug!(
            "type info cache hit: {} {} (refcount {})",
            entry.info.kind(),
            name,
            entry.refcount
        );
        Some(Arc::clone(&entry.info))
    }

    /// Probe for a descriptor without taking a borrow.
    pub fn contains(&self, kind: Option<TypeKind>, name: &ObjectName) -> bool {
        self.entries.iter().any(|e| e.matches(kind, name))
    }

    /// Add a fully built descriptor with one borrow.
    ///
    /// If an entry with the same identity is already cached, that entry is
    /// borrowed instead and `info` is dropped.
    pub fn insert(&mut self, info: TypeInfo) -> Arc<TypeInfo> {
        let kind = Some(info.kind());
        if let Some(existing) = self.find(kind, info.object_name()) {
            return existing;
        }

        debug!(
            "type info cached: {} {} ({} columns)",
            info.kind(),
            info.object_name(),
            info.column_count()
        );
        let info = Arc::new(info);
        self.entries.push(CacheEntry {
            info: Arc::clone(&info),
            refcount: 1,
        });
        info
    }

    /// Return one borrow. Returns `true` if the entry was evicted.
    pub fn release(&mut self, info: &Arc<TypeInfo>) -> Result<bool> {
        let pos = self
            .entries
            .iter()
            .position(|e| Arc::ptr_eq(&e.info, info))
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "type info {} is not cached on this connection",
                    info.object_name()
                ))
            })?;

        let entry = &mut self.entries[pos];
        entry.refcount -= 1;
        if entry.refcount > 0 {
            return Ok(false);
        }

        let entry = self.entries.remove(pos);
        debug!(
            "type info evicted: {} {}",
            entry.info.kind(),
            entry.info.object_name()
        );
        Ok(true)
    }

    /// Outstanding borrows of a cached descriptor.
    pub fn refcount(&self, info: &Arc<TypeInfo>) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| Arc::ptr_eq(&e.info, info))
            .map(|e| e.refcount)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry regardless of borrows.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
