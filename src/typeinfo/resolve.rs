//! Describe-driven resolution of type info.
//!
//! Resolution of one name:
//!
//! 1. Probe the cache; a hit takes a borrow and returns.
//! 2. Describe the qualified name (public synonyms included).
//! 3. Dispatch on the described object kind:
//!    - type: load the type definition, typecode unless predefined, and its
//!      attributes (or the single element of a named collection);
//!    - table, table alias or view: its columns;
//!    - synonym: resolve the target instead. The synonym itself is never
//!      cached.
//! 4. Materialize the children and cache the finished descriptor.
//!
//! Nothing is added to the cache until the descriptor is complete, so a
//! failure at any step leaves the cache as it was.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use log::{debug, warn};

use crate::config::TypeInfoOptions;
use crate::connection::ConnectionId;
use crate::error::{Error, Result};
use crate::protocol::describe::{Catalog, ChildList, ColumnContext, ObjectKind};

use super::cache::TypeInfoCache;
use super::layout::{materialize, Layout};
use super::name::{eq_ignore_case, ObjectName};
use super::{ObjectType, TypeInfo, TypeKind, TypeShape};

/// One resolution against a connection's catalog and cache.
pub(crate) struct Resolver<'a, C: Catalog> {
    catalog: &'a mut C,
    cache: &'a mut TypeInfoCache,
    options: &'a TypeInfoOptions,
    connection_id: ConnectionId,
}

impl<'a, C: Catalog> Resolver<'a, C> {
    pub(crate) fn new(
        catalog: &'a mut C,
        cache: &'a mut TypeInfoCache,
        options: &'a TypeInfoOptions,
        connection_id: ConnectionId,
    ) -> Self {
        Self {
            catalog,
            cache,
            options,
            connection_id,
        }
    }

    /// Resolve a normalized name, following synonyms.
    pub(crate) async fn resolve(
        &mut self,
        name: ObjectName,
        expected: Option<TypeKind>,
    ) -> Result<Arc<TypeInfo>> {
        let mut synonyms = Vec::new();
        self.resolve_chain(name, expected, &mut synonyms).await
    }

    /// `synonyms` holds the qualified names of the synonyms followed so far.
    fn resolve_chain<'s>(
        &'s mut self,
        name: ObjectName,
        expected: Option<TypeKind>,
        synonyms: &'s mut Vec<String>,
    ) -> BoxFuture<'s, Result<Arc<TypeInfo>>> {
        async move {
            if let Some(info) = self.cache.find(expected, &name) {
                return Ok(info);
            }

            let qualified = name.qualified();
            debug!("type info cache miss: describing {}", qualified);

            let param = self
                .catalog
                .describe_any(&qualified, self.options.describe_request())
                .await
                .map_err(|e| Error::describe(&qualified, e))?;
            let kind = self
                .catalog
                .object_kind(&param)
                .map_err(|e| Error::describe(&qualified, e))?;
            debug!("{} described as {:?}", qualified, kind);

            match kind {
                ObjectKind::Type => {
                    check_kind(&qualified, expected, TypeKind::Type)?;
                    self.build_object_type(name, &qualified, param).await
                }
                ObjectKind::Table | ObjectKind::TableAlias | ObjectKind::View => {
                    let (actual, shape) = if kind == ObjectKind::View {
                        (TypeKind::View, TypeShape::View)
                    } else {
                        (TypeKind::Table, TypeShape::Table)
                    };
                    check_kind(&qualified, expected, actual)?;
                    let layout = self.children(&qualified, &param, ChildList::Columns)?;
                    Ok(self.cache_new(name, shape, layout))
                }
                ObjectKind::Synonym => {
                    let target = self
                        .catalog
                        .synonym_target(&param)
                        .map_err(|e| Error::describe(&qualified, e))?;
                    drop(param);

                    let target = ObjectName::from_synonym_target(&target);
                    self.follow_synonym(qualified, &target, synonyms)?;
                    self.resolve_chain(target, expected, synonyms).await
                }
                ObjectKind::Other(_) => Err(Error::UnsupportedObject {
                    name: qualified,
                    kind,
                }),
            }
        }
        .boxed()
    }

    /// Record a synonym hop, failing on cycles and overlong chains.
    fn follow_synonym(
        &self,
        synonym: String,
        target: &ObjectName,
        synonyms: &mut Vec<String>,
    ) -> Result<()> {
        synonyms.push(synonym);
        let target = target.qualified();
        debug!("following synonym {} -> {}", synonyms[synonyms.len() - 1], target);

        if synonyms.iter().any(|s| eq_ignore_case(s, &target)) {
            let mut chain = synonyms.clone();
            chain.push(target);
            return Err(Error::SynonymCycle {
                name: synonyms[0].clone(),
                chain,
            });
        }
        if synonyms.len() > self.options.max_synonym_depth {
            return Err(Error::SynonymDepthExceeded {
                name: synonyms[0].clone(),
                max_depth: self.options.max_synonym_depth,
            });
        }
        Ok(())
    }

    async fn build_object_type(
        &mut self,
        name: ObjectName,
        qualified: &str,
        param: C::Param,
    ) -> Result<Arc<TypeInfo>> {
        let describe_err = |e| Error::describe(qualified, e);

        let type_ref = self.catalog.type_ref(&param).map_err(describe_err)?;
        let handle = self
            .catalog
            .type_by_ref(&type_ref)
            .await
            .map_err(describe_err)?;

        // typecode is not available on system-predefined types
        let typecode = if self
            .catalog
            .is_predefined_type(&param)
            .map_err(describe_err)?
        {
            None
        } else {
            Some(self.catalog.typecode(&param).map_err(describe_err)?)
        };

        let (layout, collection_typecode) = match typecode {
            Some(code) if code.is_collection() => {
                let element = self
                    .catalog
                    .collection_typecode(&param)
                    .map_err(describe_err)?;
                let layout = materialize(
                    &*self.catalog,
                    qualified,
                    &param,
                    1,
                    ColumnContext::CollectionElement,
                )?;
                (layout, Some(element))
            }
            _ => (
                self.children(qualified, &param, ChildList::TypeAttributes)?,
                None,
            ),
        };

        let shape = TypeShape::Object(ObjectType {
            handle,
            typecode,
            collection_typecode,
        });
        Ok(self.cache_new(name, shape, layout))
    }

    fn children(&self, qualified: &str, param: &C::Param, list: ChildList) -> Result<Layout> {
        let source = self
            .catalog
            .child_list(param, list)
            .map_err(|e| Error::describe(qualified, e))?;
        let count = self
            .catalog
            .child_count(param, list)
            .map_err(|e| Error::describe(qualified, e))?;
        materialize(&*self.catalog, qualified, &source, count, list.context())
    }

    fn cache_new(&mut self, name: ObjectName, shape: TypeShape, layout: Layout) -> Arc<TypeInfo> {
        self.cache
            .insert(TypeInfo::new(self.connection_id, name, shape, layout))
    }
}

/// A requested kind must match the described kind exactly.
fn check_kind(name: &str, expected: Option<TypeKind>, actual: TypeKind) -> Result<()> {
    match expected {
        Some(expected) if expected != actual => {
            warn!(
                "type info '{}' has wrong type: expected {}, got {}",
                name, expected, actual
            );
            Err(Error::TypeMismatch {
                name: name.to_string(),
                expected,
                actual,
            })
        }
        _ => Ok(()),
    }
}
