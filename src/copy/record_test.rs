use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::{
    copy::{CopyConfig, copy, copy_with_config},
    runtime::{
        equal::deep_equal,
        heap::ValueHeap,
        native_function::NativeFunction,
        record::{FieldDecl, Record, RecordType},
        timestamp::{Timestamp, time_type},
        types::Type,
        value::Value,
    },
};

fn noop(_: Vec<Value>) -> Result<Value, String> {
    Ok(Value::Ref(None))
}

fn inner_type() -> Rc<RecordType> {
    RecordType::new("Inner", vec![FieldDecl::public("value", Type::Int)])
}

#[test]
fn plain_record_is_copied_as_a_scalar() {
    let mut heap = ValueHeap::new();
    let source = Value::record(Record::new(inner_type(), vec![Value::Integer(3)]).unwrap());

    let output = copy_with_config(&source, &mut heap, &CopyConfig::default()).unwrap();

    assert_eq!(output.value, source);
    assert_eq!(output.stats.scalars, 1);
    assert_eq!(output.stats.records, 0);
    match (&source, &output.value) {
        (Value::Record(left), Value::Record(right)) => assert!(!Rc::ptr_eq(left, right)),
        _ => panic!("expected records"),
    }
}

#[test]
fn private_fields_are_copied_exactly() {
    let session = RecordType::new(
        "Session",
        vec![
            FieldDecl::public("user", Type::Str),
            FieldDecl::private("token", Type::Ref),
            FieldDecl::private("scopes", Type::List),
        ],
    );

    let mut heap = ValueHeap::new();
    let token = heap.alloc(Value::string("s3cr3t"));
    let source = Value::record(
        Record::new(
            session,
            vec![
                Value::string("ada"),
                Value::Ref(Some(token)),
                Value::list(vec![Value::string("read")]),
            ],
        )
        .unwrap(),
    );

    let copied = copy(&source, &mut heap).unwrap();
    let fields = copied.as_record().unwrap().raw_fields();

    let copied_token = fields[1].as_handle().unwrap();
    assert_ne!(copied_token, token);
    assert_eq!(heap.get(copied_token), Some(&Value::string("s3cr3t")));
    assert_eq!(fields[2], Value::list(vec![Value::string("read")]));
    assert!(deep_equal(&source, &heap, &copied, &heap));
}

#[test]
fn null_reference_fields_stay_null() {
    let foo = RecordType::new("Foo", vec![FieldDecl::public("A", Type::Int)]);
    let bar = RecordType::new("Bar", vec![FieldDecl::public("B", Type::Int)]);
    let foo_bar = RecordType::new(
        "FooBar",
        vec![
            FieldDecl::public("Foo", Type::Ref),
            FieldDecl::public("Bar", Type::Ref),
            FieldDecl::public("Foo2", Type::Ref),
            FieldDecl::public("Bar2", Type::Ref),
        ],
    );

    let mut heap = ValueHeap::new();
    let foo2 = heap.alloc(Value::record(Record::new(foo, vec![Value::Integer(1)]).unwrap()));
    let bar2 = heap.alloc(Value::record(Record::new(bar, vec![Value::Integer(2)]).unwrap()));
    let src = heap.alloc(Value::record(
        Record::new(
            foo_bar,
            vec![
                Value::Ref(None),
                Value::Ref(None),
                Value::Ref(Some(foo2)),
                Value::Ref(Some(bar2)),
            ],
        )
        .unwrap(),
    ));
    let source = Value::Ref(Some(src));

    let copied = copy(&source, &mut heap).unwrap();
    let dst = heap.get(copied.as_handle().unwrap()).unwrap().as_record().unwrap();

    assert_eq!(dst.get("Foo"), Some(&Value::Ref(None)));
    assert_eq!(dst.get("Bar"), Some(&Value::Ref(None)));
    assert_ne!(dst.get("Foo2").and_then(Value::as_handle), Some(foo2));
    assert_ne!(dst.get("Bar2").and_then(Value::as_handle), Some(bar2));
    assert!(deep_equal(&source, &heap, &copied, &heap));
}

#[test]
fn function_field_fails_the_record() {
    let handler = RecordType::new(
        "Handler",
        vec![
            FieldDecl::public("name", Type::Str),
            FieldDecl::private("callback", Type::Function),
        ],
    );
    let source = Value::record(
        Record::new(
            handler,
            vec![
                Value::string("on_click"),
                Value::Function(NativeFunction::new("noop", noop)),
            ],
        )
        .unwrap(),
    );

    let mut heap = ValueHeap::new();
    let err = copy(&source, &mut heap).unwrap_err();
    assert_eq!(err.to_string(), "cannot copy Function value at $.callback");
}

#[test]
fn timestamps_keep_their_private_state() {
    let holder = RecordType::new(
        "Foo",
        vec![
            FieldDecl::public("Time1", Type::Record(time_type())),
            FieldDecl::public("Time2", Type::Record(time_type())),
        ],
    );

    let pacific = DateTime::parse_from_rfc3339("2024-07-04T09:15:00.000000042-07:00").unwrap();
    let local = Timestamp::in_zone(&pacific, "America/Los_Angeles");
    let utc = Timestamp::utc(&Utc::now());

    let mut heap = ValueHeap::new();
    let fields = vec![
        local.to_value(&mut heap).unwrap(),
        utc.to_value(&mut heap).unwrap(),
    ];
    let source = Value::record(Record::new(holder, fields).unwrap());

    let copied = copy(&source, &mut heap).unwrap();
    let src = source.as_record().unwrap();
    let dst = copied.as_record().unwrap();

    for field in ["Time1", "Time2"] {
        let before = Timestamp::from_value(src.get(field).unwrap(), &heap).unwrap();
        let after = Timestamp::from_value(dst.get(field).unwrap(), &heap).unwrap();
        assert_eq!(before, after);
        assert!(before.instant_eq(&after));
        assert_eq!(before.to_rfc3339(), after.to_rfc3339());
    }

    let src_loc = src.get("Time1").and_then(Value::as_record).unwrap().raw_fields()[2].clone();
    let dst_loc = dst.get("Time1").and_then(Value::as_record).unwrap().raw_fields()[2].clone();
    assert_ne!(src_loc, dst_loc);
    assert!(deep_equal(&source, &heap, &copied, &heap));
}

#[test]
fn nested_plain_record_is_rebuilt_with_private_fields() {
    let pair = RecordType::new(
        "Pair",
        vec![
            FieldDecl::public("left", Type::Record(inner_type())),
            FieldDecl::private("note", Type::Str),
        ],
    );
    let inner = Value::record(Record::new(inner_type(), vec![Value::Integer(1)]).unwrap());
    let source =
        Value::record(Record::new(pair, vec![inner, Value::string("hidden")]).unwrap());

    let mut heap = ValueHeap::new();
    let copied = copy(&source, &mut heap).unwrap();
    let fields = copied.as_record().unwrap().raw_fields();

    assert_eq!(copied, source);
    assert_eq!(fields[1], Value::string("hidden"));
    match (&source.as_record().unwrap().raw_fields()[0], &fields[0]) {
        (Value::Record(left), Value::Record(right)) => assert!(!Rc::ptr_eq(left, right)),
        _ => panic!("expected nested records"),
    }
    assert_eq!(heap.total_allocations(), 0);
}
