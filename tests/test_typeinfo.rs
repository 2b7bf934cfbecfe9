//! Integration tests for type-info resolution against an in-memory catalog.

use std::sync::Arc;

use oracle_typeinfo::protocol::constants::*;
use oracle_typeinfo::protocol::memory::{Failure, MemoryCatalog};
use oracle_typeinfo::typeinfo::OFFSET_UNSET;
use oracle_typeinfo::{
    ColumnMetadata, Connection, Error, IdentifierOverflow, ObjectKind, SharedConnection, TypeCode,
    TypeInfoOptions, TypeKind, TypeShape,
};

fn emp_columns() -> Vec<ColumnMetadata> {
    vec![
        ColumnMetadata::new("EMPNO", ORA_TYPE_NUM_NUMBER as u8)
            .with_precision(4, 0)
            .with_nullable(false),
        ColumnMetadata::new("ENAME", ORA_TYPE_NUM_VARCHAR as u8).with_max_size(10),
        ColumnMetadata::new("HIREDATE", ORA_TYPE_NUM_DATE as u8),
        ColumnMetadata::new("SAL", ORA_TYPE_NUM_BINARY_DOUBLE as u8),
    ]
}

fn hr_catalog() -> MemoryCatalog {
    let mut catalog = MemoryCatalog::new("HR");
    catalog.add_table("HR", "EMP", emp_columns());
    catalog.add_view(
        "HR",
        "EMP_V",
        vec![ColumnMetadata::new("ENAME", ORA_TYPE_NUM_VARCHAR as u8).with_max_size(10)],
    );
    catalog.add_object_type(
        "HR",
        "ADDRESS_T",
        vec![
            ColumnMetadata::new("STREET", ORA_TYPE_NUM_VARCHAR as u8).with_max_size(40),
            ColumnMetadata::new("ZIP", ORA_TYPE_NUM_NUMBER as u8).with_precision(5, 0),
        ],
    );
    catalog.add_collection_type(
        "HR",
        "PHONES_T",
        TypeCode::Varray,
        ColumnMetadata::new("COLUMN_VALUE", ORA_TYPE_NUM_VARCHAR as u8).with_max_size(20),
    );
    catalog
}

#[tokio::test]
async fn test_resolve_table() {
    let mut conn = Connection::new(hr_catalog());

    let emp = conn.get_type_info("hr.emp", Some(TypeKind::Table)).await.unwrap();

    assert_eq!(emp.kind(), TypeKind::Table);
    assert_eq!(emp.schema(), "HR");
    assert_eq!(emp.name(), "EMP");
    assert_eq!(emp.connection_id(), conn.id());
    assert_eq!(emp.column_count(), 4);
    assert_eq!(emp.column(1).unwrap().name, "EMPNO");
    assert!(!emp.column(1).unwrap().nullable);
    assert_eq!(emp.find_column("sal"), Some(4));
    assert_eq!(conn.refcount(&emp), Some(1));
}

#[tokio::test]
async fn test_offsets_are_set_for_every_column() {
    let mut conn = Connection::new(hr_catalog());
    let emp = conn.get_type_info("emp", None).await.unwrap();

    assert_eq!(emp.offsets().len(), emp.column_count());
    assert!(emp.offsets().iter().all(|&o| o != OFFSET_UNSET && o >= 0));
    // NUMBER 0..22, handle 24..32, DATE 32..40, BINARY_DOUBLE 40..48
    assert_eq!(emp.offsets(), &[0, 24, 32, 40]);
    assert_eq!(emp.struct_size(), 48);
    assert_eq!(emp.struct_align(), 8);
}

#[tokio::test]
async fn test_repeat_lookup_shares_descriptor() {
    let mut conn = Connection::new(hr_catalog());

    let first = conn.get_type_info("emp", Some(TypeKind::Table)).await.unwrap();
    let second = conn.get_type_info("EMP", Some(TypeKind::Table)).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(conn.refcount(&first), Some(2));
    assert_eq!(conn.catalog().describe_count(), 1);

    conn.release_type_info(&second).unwrap();
    assert_eq!(conn.refcount(&first), Some(1));
    conn.release_type_info(&first).unwrap();
    assert_eq!(conn.refcount(&first), None);
    assert!(!conn.contains(Some(TypeKind::Table), "emp").unwrap());

    // evicted, so the next lookup describes again
    let third = conn.get_type_info("emp", Some(TypeKind::Table)).await.unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(conn.catalog().describe_count(), 2);
}

#[tokio::test]
async fn test_any_kind_hits_cached_entry() {
    let mut conn = Connection::new(hr_catalog());
    let typed = conn.get_type_info("emp", Some(TypeKind::Table)).await.unwrap();
    let any = conn.get_type_info("emp", None).await.unwrap();

    assert!(Arc::ptr_eq(&typed, &any));
    assert_eq!(conn.cached_type_count(), 1);
}

#[tokio::test]
async fn test_kind_mismatch() {
    let mut conn = Connection::new(hr_catalog());

    match conn.get_type_info("emp_v", Some(TypeKind::Table)).await {
        Err(Error::TypeMismatch {
            name,
            expected,
            actual,
        }) => {
            assert_eq!(name, "EMP_V");
            assert_eq!(expected, TypeKind::Table);
            assert_eq!(actual, TypeKind::View);
        }
        other => panic!("Expected TypeMismatch, got {:?}", other),
    }
    assert!(matches!(
        conn.get_type_info("emp", Some(TypeKind::View)).await,
        Err(Error::TypeMismatch { .. })
    ));
    assert!(matches!(
        conn.get_type_info("address_t", Some(TypeKind::Table)).await,
        Err(Error::TypeMismatch { .. })
    ));
    assert_eq!(conn.cached_type_count(), 0);

    let view = conn.get_type_info("emp_v", Some(TypeKind::View)).await.unwrap();
    assert_eq!(view.kind(), TypeKind::View);
}

#[tokio::test]
async fn test_unknown_kind_accepts_all_supported() {
    let mut conn = Connection::new(hr_catalog());

    let table = conn.get_type_info("emp", None).await.unwrap();
    let view = conn.get_type_info("emp_v", None).await.unwrap();
    let object = conn.get_type_info("address_t", None).await.unwrap();

    assert_eq!(table.kind(), TypeKind::Table);
    assert_eq!(view.kind(), TypeKind::View);
    assert_eq!(object.kind(), TypeKind::Type);
    assert_eq!(conn.cached_type_count(), 3);
}

#[tokio::test]
async fn test_object_type() {
    let mut conn = Connection::new(hr_catalog());
    let address = conn.get_type_info("hr.address_t", Some(TypeKind::Type)).await.unwrap();

    assert_eq!(address.column_count(), 2);
    assert_eq!(address.typecode(), Some(TypeCode::Object));
    assert_eq!(address.collection_typecode(), None);
    assert!(address.type_handle().is_some());
    assert!(matches!(address.shape(), TypeShape::Object(_)));
}

#[tokio::test]
async fn test_collection_type_has_single_element() {
    let mut conn = Connection::new(hr_catalog());
    let phones = conn.get_type_info("phones_t", Some(TypeKind::Type)).await.unwrap();

    assert_eq!(phones.typecode(), Some(TypeCode::NamedCollection));
    assert_eq!(phones.collection_typecode(), Some(TypeCode::Varray));
    assert_eq!(phones.column_count(), 1);
    assert_eq!(phones.column(1).unwrap().name, "COLUMN_VALUE");
    assert_eq!(phones.offsets(), &[0]);
}

#[tokio::test]
async fn test_predefined_type_skips_typecode() {
    let mut catalog = hr_catalog();
    catalog.add_predefined_type("SYS", "ANYDATA");
    let mut conn = Connection::new(catalog);

    let anydata = conn.get_type_info("sys.anydata", None).await.unwrap();
    assert_eq!(anydata.kind(), TypeKind::Type);
    assert_eq!(anydata.typecode(), None);
    assert_eq!(anydata.column_count(), 0);
    assert!(anydata.offsets().is_empty());
}

#[tokio::test]
async fn test_quoted_names_are_case_sensitive() {
    let mut catalog = hr_catalog();
    catalog.add_table("HR", "\"Mixed\"", emp_columns());
    let mut conn = Connection::new(catalog);

    let mixed = conn.get_type_info("hr.\"Mixed\"", None).await.unwrap();
    assert_eq!(mixed.name(), "\"Mixed\"");
    assert!(matches!(
        conn.get_type_info("hr.mixed", None).await,
        Err(Error::Describe { .. })
    ));
}

#[tokio::test]
async fn test_unsupported_object_kind() {
    let mut catalog = hr_catalog();
    catalog.add_object(
        "HR",
        "EMP_SEQ",
        oracle_typeinfo::protocol::memory::CatalogObject::Other(PTYPE_SEQ),
    );
    let mut conn = Connection::new(catalog);

    match conn.get_type_info("emp_seq", None).await {
        Err(Error::UnsupportedObject { name, kind }) => {
            assert_eq!(name, "EMP_SEQ");
            assert_eq!(kind, ObjectKind::Other(PTYPE_SEQ));
        }
        other => panic!("Expected UnsupportedObject, got {:?}", other),
    }
    assert_eq!(conn.cached_type_count(), 0);
}

#[tokio::test]
async fn test_missing_object_carries_remote_diagnostic() {
    let mut conn = Connection::new(hr_catalog());

    match conn.get_type_info("nope", None).await {
        Err(Error::Describe { name, source }) => {
            assert_eq!(name, "NOPE");
            assert!(matches!(*source, Error::Oracle { code: 4043, .. }));
        }
        other => panic!("Expected Describe error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_column_failure_leaves_no_entry() {
    for k in 1..=4u16 {
        let mut catalog = hr_catalog();
        catalog.inject_failure("HR", "EMP", Failure::Column(k));
        let mut conn = Connection::new(catalog);

        // a descriptor for another object must survive the failure
        let view = conn.get_type_info("emp_v", None).await.unwrap();

        let result = conn.get_type_info("emp", Some(TypeKind::Table)).await;
        match result {
            Err(Error::Describe { name, source }) => {
                assert_eq!(name, "EMP");
                assert!(matches!(*source, Error::Oracle { code: 24334, .. }));
            }
            other => panic!("Expected Describe error at column {}, got {:?}", k, other),
        }
        assert!(!conn.contains(None, "emp").unwrap());
        assert_eq!(conn.cached_type_count(), 1);
        assert_eq!(conn.refcount(&view), Some(1));

        conn.catalog_mut().clear_failures();
        let emp = conn.get_type_info("emp", Some(TypeKind::Table)).await.unwrap();
        assert_eq!(emp.column_count(), 4);
    }
}

#[tokio::test]
async fn test_attribute_failure_leaves_no_entry() {
    for k in 1..=2u16 {
        let mut catalog = hr_catalog();
        catalog.inject_failure("HR", "ADDRESS_T", Failure::Column(k));
        let mut conn = Connection::new(catalog);

        match conn.get_type_info("address_t", Some(TypeKind::Type)).await {
            Err(Error::Describe { name, source }) => {
                assert_eq!(name, "ADDRESS_T");
                assert!(matches!(*source, Error::Oracle { code: 24334, .. }));
            }
            other => panic!("Expected Describe error at attribute {}, got {:?}", k, other),
        }
        assert!(!conn.contains(None, "address_t").unwrap());
        assert_eq!(conn.cached_type_count(), 0);

        conn.catalog_mut().clear_failures();
        let address = conn.get_type_info("address_t", Some(TypeKind::Type)).await.unwrap();
        assert_eq!(address.column_count(), 2);
    }
}

#[tokio::test]
async fn test_collection_element_failure_leaves_no_entry() {
    let mut catalog = hr_catalog();
    catalog.inject_failure("HR", "PHONES_T", Failure::Column(1));
    let mut conn = Connection::new(catalog);

    let emp = conn.get_type_info("emp", None).await.unwrap();

    match conn.get_type_info("phones_t", Some(TypeKind::Type)).await {
        Err(Error::Describe { name, source }) => {
            assert_eq!(name, "PHONES_T");
            assert!(matches!(*source, Error::Oracle { code: 24334, .. }));
        }
        other => panic!("Expected Describe error for the element, got {:?}", other),
    }
    assert!(!conn.contains(None, "phones_t").unwrap());
    assert_eq!(conn.cached_type_count(), 1);
    assert_eq!(conn.refcount(&emp), Some(1));

    conn.catalog_mut().clear_failures();
    let phones = conn.get_type_info("phones_t", Some(TypeKind::Type)).await.unwrap();
    assert_eq!(phones.column_count(), 1);
}

#[tokio::test]
async fn test_other_remote_failures_leave_no_entry() {
    for failure in [
        Failure::ChildList,
        Failure::Describe {
            code: 3113,
            message: "end-of-file on communication channel".to_string(),
        },
    ] {
        let mut catalog = hr_catalog();
        catalog.inject_failure("HR", "EMP", failure);
        let mut conn = Connection::new(catalog);

        assert!(matches!(
            conn.get_type_info("hr.emp", None).await,
            Err(Error::Describe { .. })
        ));
        assert_eq!(conn.cached_type_count(), 0);
    }

    let mut catalog = hr_catalog();
    catalog.inject_failure("HR", "ADDRESS_T", Failure::TypeByRef);
    let mut conn = Connection::new(catalog);
    assert!(matches!(
        conn.get_type_info("address_t", Some(TypeKind::Type)).await,
        Err(Error::Describe { .. })
    ));
    assert_eq!(conn.cached_type_count(), 0);
}

#[tokio::test]
async fn test_invalid_arguments() {
    let mut conn = Connection::new(hr_catalog());
    assert!(matches!(
        conn.get_type_info("", None).await,
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        conn.get_type_info("hr.", None).await,
        Err(Error::InvalidArgument { .. })
    ));
    assert_eq!(conn.catalog().describe_count(), 0);
}

#[tokio::test]
async fn test_identifier_overflow_policy() {
    let long_name = "E".repeat(40);
    let mut catalog = hr_catalog();
    catalog.add_table("HR", &"E".repeat(30), emp_columns());

    let options = TypeInfoOptions::new().with_max_identifier_len(30);
    let mut conn = Connection::with_options(catalog, options.clone());
    let truncated = conn.get_type_info(&format!("hr.{}", long_name), None).await.unwrap();
    assert_eq!(truncated.name().len(), 30);

    let strict = options.with_identifier_overflow(IdentifierOverflow::Reject);
    let mut conn = Connection::with_options(hr_catalog(), strict);
    assert!(matches!(
        conn.get_type_info(&long_name, None).await,
        Err(Error::IdentifierTooLong { max_len: 30, .. })
    ));
}

#[tokio::test]
async fn test_shared_connection_creates_one_descriptor() {
    let shared = SharedConnection::new(Connection::new(hr_catalog()));

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let shared = shared.clone();
        tasks.push(tokio::spawn(async move {
            shared.get_type_info("emp", Some(TypeKind::Table)).await
        }));
    }

    let mut infos = Vec::new();
    for task in tasks {
        infos.push(task.await.unwrap().unwrap());
    }
    assert!(infos.iter().all(|i| Arc::ptr_eq(i, &infos[0])));

    {
        let conn = shared.lock().await;
        assert_eq!(conn.cached_type_count(), 1);
        assert_eq!(conn.refcount(&infos[0]), Some(8));
        assert_eq!(conn.catalog().describe_count(), 1);
    }

    for info in &infos {
        shared.release_type_info(info).await.unwrap();
    }
    assert_eq!(shared.lock().await.cached_type_count(), 0);
}
