//! In-process catalog.
//!
//! `MemoryCatalog` answers describe requests from objects registered in
//! memory. It resolves unqualified names against a current schema and then
//! `PUBLIC`, the way a session's describe does, and can be told to fail at
//! chosen steps so error paths of resolution can be exercised without a
//! server.

use std::collections::HashMap;
use std::future::{ready, Future};
use std::sync::Arc;

use bytes::Bytes;

use crate::error::{Error, Result};
use crate::protocol::describe::{
    Catalog, ChildList, ColumnContext, DescribeRequest, ObjectKind, SynonymTarget, TypeCode,
    TypeHandle, TypeRef,
};
use crate::protocol::types::ColumnMetadata;

const PUBLIC_SCHEMA: &str = "PUBLIC";

// ORA-04043: object does not exist
const ORA_OBJECT_NOT_FOUND: u32 = 4043;
// ORA-24334: no descriptor for this position
const ORA_NO_DESCRIPTOR: u32 = 24334;
// ORA-22303: type not found
const ORA_TYPE_NOT_FOUND: u32 = 22303;

/// Definition of a user-defined type.
#[derive(Debug, Clone)]
pub struct TypeDefinition {
    pub handle: TypeHandle,
    pub typecode: TypeCode,
    pub predefined: bool,
    pub attributes: Vec<ColumnMetadata>,
    /// Collection typecode and element, for named collections.
    pub element: Option<(TypeCode, ColumnMetadata)>,
}

/// An object registered in a `MemoryCatalog`.
#[derive(Debug, Clone)]
pub enum CatalogObject {
    Table(Vec<ColumnMetadata>),
    TableAlias(Vec<ColumnMetadata>),
    View(Vec<ColumnMetadata>),
    Type(TypeDefinition),
    Synonym(SynonymTarget),
    /// Any other object kind, described by its raw parameter type.
    Other(u8),
}

impl CatalogObject {
    fn kind(&self) -> ObjectKind {
        match self {
            CatalogObject::Table(_) => ObjectKind::Table,
            CatalogObject::TableAlias(_) => ObjectKind::TableAlias,
            CatalogObject::View(_) => ObjectKind::View,
            CatalogObject::Type(_) => ObjectKind::Type,
            CatalogObject::Synonym(_) => ObjectKind::Synonym,
            CatalogObject::Other(raw) => ObjectKind::from_raw(*raw),
        }
    }

    fn columns(&self) -> Option<&[ColumnMetadata]> {
        match self {
            CatalogObject::Table(cols)
            | CatalogObject::TableAlias(cols)
            | CatalogObject::View(cols) => Some(cols),
            _ => None,
        }
    }

    fn type_definition(&self) -> Option<&TypeDefinition> {
        match self {
            CatalogObject::Type(def) => Some(def),
            _ => None,
        }
    }
}

/// Handle to a described object, or to one of its child lists.
#[derive(Debug, Clone)]
pub struct MemoryParam {
    key: String,
    object: Arc<CatalogObject>,
    list: Option<ChildList>,
}

/// Injected failure for one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The describe call itself fails with an Oracle error.
    Describe { code: u32, message: String },
    /// Reading a child list or its count fails.
    ChildList,
    /// Describing the child at this 1-based ordinal fails.
    Column(u16),
    /// Loading the type definition fails.
    TypeByRef,
}

/// Catalog backed by registered objects.
#[derive(Debug)]
pub struct MemoryCatalog {
    current_schema: String,
    objects: HashMap<String, Arc<CatalogObject>>,
    types: HashMap<Bytes, TypeHandle>,
    failures: HashMap<String, Failure>,
    next_oid: u64,
    describe_count: usize,
}

impl MemoryCatalog {
    /// Create an empty catalog whose session schema is `current_schema`.
    pub fn new(current_schema: impl Into<String>) -> Self {
        Self {
            current_schema: current_schema.into(),
            objects: HashMap::new(),
            types: HashMap::new(),
            failures: HashMap::new(),
            next_oid: 1,
            describe_count: 0,
        }
    }

    /// Register an object under `schema.name`.
    pub fn add_object(&mut self, schema: &str, name: &str, object: CatalogObject) {
        if let CatalogObject::Type(def) = &object {
            self.types.insert(def.handle.oid.clone(), def.handle.clone());
        }
        self.objects.insert(key(schema, name), Arc::new(object));
    }

    pub fn add_table(&mut self, schema: &str, name: &str, columns: Vec<ColumnMetadata>) {
        self.add_object(schema, name, CatalogObject::Table(columns));
    }

    pub fn add_table_alias(&mut self, schema: &str, name: &str, columns: Vec<ColumnMetadata>) {
        self.add_object(schema, name, CatalogObject::TableAlias(columns));
    }

    pub fn add_view(&mut self, schema: &str, name: &str, columns: Vec<ColumnMetadata>) {
        self.add_object(schema, name, CatalogObject::View(columns));
    }

    /// Register an object type with the given attributes.
    pub fn add_object_type(&mut self, schema: &str, name: &str, attributes: Vec<ColumnMetadata>) {
        let def = TypeDefinition {
            handle: self.new_handle(),
            typecode: TypeCode::Object,
            predefined: false,
            attributes,
            element: None,
        };
        self.add_object(schema, name, CatalogObject::Type(def));
    }

    /// Register a named collection type (`Varray` or `NestedTable`).
    pub fn add_collection_type(
        &mut self,
        schema: &str,
        name: &str,
        collection_typecode: TypeCode,
        element: ColumnMetadata,
    ) {
        let def = TypeDefinition {
            handle: self.new_handle(),
            typecode: TypeCode::NamedCollection,
            predefined: false,
            attributes: Vec::new(),
            element: Some((collection_typecode, element)),
        };
        self.add_object(schema, name, CatalogObject::Type(def));
    }

    /// Register a system-predefined type such as `SYS.ANYDATA`.
    pub fn add_predefined_type(&mut self, schema: &str, name: &str) {
        let def = TypeDefinition {
            handle: self.new_handle(),
            typecode: TypeCode::Opaque,
            predefined: true,
            attributes: Vec::new(),
            element: None,
        };
        self.add_object(schema, name, CatalogObject::Type(def));
    }

    /// Register a local synonym.
    pub fn add_synonym(&mut self, schema: &str, name: &str, target_schema: &str, target: &str) {
        self.add_object(
            schema,
            name,
            CatalogObject::Synonym(SynonymTarget::new(target_schema, target)),
        );
    }

    /// Register a public synonym.
    pub fn add_public_synonym(&mut self, name: &str, target: SynonymTarget) {
        self.add_object(PUBLIC_SCHEMA, name, CatalogObject::Synonym(target));
    }

    /// Make operations on `schema.name` fail. Keys of remote objects carry
    /// the `@link` suffix in `name`.
    pub fn inject_failure(&mut self, schema: &str, name: &str, failure: Failure) {
        self.failures.insert(key(schema, name), failure);
    }

    pub fn clear_failures(&mut self) {
        self.failures.clear();
    }

    /// Number of describe requests served.
    pub fn describe_count(&self) -> usize {
        self.describe_count
    }

    fn new_handle(&mut self) -> TypeHandle {
        let oid = Bytes::from(self.next_oid.to_be_bytes().to_vec());
        self.next_oid += 1;
        TypeHandle { oid, version: 1 }
    }

    fn failure(&self, param: &MemoryParam) -> Option<&Failure> {
        self.failures.get(&param.key)
    }

    /// Find the object a describe name refers to.
    fn lookup(&self, name: &str, request: DescribeRequest) -> Result<MemoryParam> {
        let mut candidates = vec![name.to_string()];
        if !name.contains('.') {
            candidates.push(key(&self.current_schema, name));
            if request.public_scope {
                candidates.push(key(PUBLIC_SCHEMA, name));
            }
        }

        let (key, object) = candidates
            .into_iter()
            .find_map(|k| self.objects.get(&k).map(|o| (k, Arc::clone(o))))
            .ok_or_else(|| {
                Error::oracle(
                    ORA_OBJECT_NOT_FOUND,
                    format!("object {} does not exist", name),
                )
            })?;

        if let Some(Failure::Describe { code, message }) = self.failures.get(&key) {
            return Err(Error::oracle(*code, message.clone()));
        }

        Ok(MemoryParam {
            key,
            object,
            list: None,
        })
    }

    fn type_definition<'p>(&self, param: &'p MemoryParam) -> Result<&'p TypeDefinition> {
        param
            .object
            .type_definition()
            .ok_or_else(|| not_available("type attribute", param))
    }
}

impl Catalog for MemoryCatalog {
    type Param = MemoryParam;

    fn describe_any(
        &mut self,
        name: &str,
        request: DescribeRequest,
    ) -> impl Future<Output = Result<MemoryParam>> + Send {
        self.describe_count += 1;
        ready(self.lookup(name, request))
    }

    fn type_by_ref(&mut self, type_ref: &TypeRef) -> impl Future<Output = Result<TypeHandle>> + Send {
        let failed = self
            .failures
            .iter()
            .any(|(k, f)| *f == Failure::TypeByRef && self.owns_type(k, type_ref));
        let result = if failed {
            Err(Error::oracle(ORA_TYPE_NOT_FOUND, "type definition unavailable"))
        } else {
            self.types.get(&type_ref.0).cloned().ok_or_else(|| {
                Error::oracle(ORA_TYPE_NOT_FOUND, "type not found")
            })
        };
        ready(result)
    }

    fn object_kind(&self, param: &MemoryParam) -> Result<ObjectKind> {
        Ok(param.object.kind())
    }

    fn type_ref(&self, param: &MemoryParam) -> Result<TypeRef> {
        Ok(TypeRef(self.type_definition(param)?.handle.oid.clone()))
    }

    fn is_predefined_type(&self, param: &MemoryParam) -> Result<bool> {
        Ok(self.type_definition(param)?.predefined)
    }

    fn typecode(&self, param: &MemoryParam) -> Result<TypeCode> {
        let def = self.type_definition(param)?;
        if def.predefined {
            return Err(Error::protocol(format!(
                "typecode is not available for predefined type {}",
                param.key
            )));
        }
        Ok(def.typecode)
    }

    fn collection_typecode(&self, param: &MemoryParam) -> Result<TypeCode> {
        self.type_definition(param)?
            .element
            .as_ref()
            .map(|(code, _)| *code)
            .ok_or_else(|| not_available("collection typecode", param))
    }

    fn child_list(&self, param: &MemoryParam, list: ChildList) -> Result<MemoryParam> {
        if self.failure(param) == Some(&Failure::ChildList) {
            return Err(Error::oracle(ORA_NO_DESCRIPTOR, "child list unavailable"));
        }
        let valid = match list {
            ChildList::Columns => param.object.columns().is_some(),
            ChildList::TypeAttributes => param.object.type_definition().is_some(),
        };
        if !valid {
            return Err(not_available("child list", param));
        }
        Ok(MemoryParam {
            key: param.key.clone(),
            object: Arc::clone(&param.object),
            list: Some(list),
        })
    }

    fn child_count(&self, param: &MemoryParam, list: ChildList) -> Result<u16> {
        let count = match list {
            ChildList::Columns => param.object.columns().map(|c| c.len()),
            ChildList::TypeAttributes => param.object.type_definition().map(|d| d.attributes.len()),
        }
        .ok_or_else(|| not_available("child count", param))?;
        u16::try_from(count).map_err(|_| Error::protocol("too many children"))
    }

    fn synonym_target(&self, param: &MemoryParam) -> Result<SynonymTarget> {
        match param.object.as_ref() {
            CatalogObject::Synonym(target) => Ok(target.clone()),
            _ => Err(not_available("synonym target", param)),
        }
    }

    fn describe_column(
        &self,
        source: &MemoryParam,
        ordinal: u16,
        context: ColumnContext,
    ) -> Result<ColumnMetadata> {
        if self.failure(source) == Some(&Failure::Column(ordinal)) {
            return Err(Error::oracle(
                ORA_NO_DESCRIPTOR,
                format!("no descriptor for position {}", ordinal),
            ));
        }

        let index = usize::from(ordinal)
            .checked_sub(1)
            .ok_or_else(|| Error::protocol("ordinals start at 1"))?;
        let column = match (context, source.list) {
            (ColumnContext::TableColumn, Some(ChildList::Columns)) => {
                source.object.columns().and_then(|c| c.get(index))
            }
            (ColumnContext::TypeAttribute, Some(ChildList::TypeAttributes)) => source
                .object
                .type_definition()
                .and_then(|d| d.attributes.get(index)),
            (ColumnContext::CollectionElement, None) if index == 0 => source
                .object
                .type_definition()
                .and_then(|d| d.element.as_ref())
                .map(|(_, element)| element),
            _ => None,
        };

        column.cloned().ok_or_else(|| {
            Error::oracle(
                ORA_NO_DESCRIPTOR,
                format!("no descriptor for position {} of {}", ordinal, source.key),
            )
        })
    }
}

impl MemoryCatalog {
    fn owns_type(&self, key: &str, type_ref: &TypeRef) -> bool {
        self.objects
            .get(key)
            .and_then(|o| o.type_definition())
            .is_some_and(|d| d.handle.oid == type_ref.0)
    }
}

fn key(schema: &str, name: &str) -> String {
    if schema.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", schema, name)
    }
}

fn not_available(what: &str, param: &MemoryParam) -> Error {
    Error::protocol(format!("{} not available for {}", what, param.key))
}
