use std::rc::Rc;

use crate::{
    copy::{
        category::Category,
        config::CopyConfig,
        dispatch::copier_for,
        error::CopyError,
        state::CopyState,
    },
    runtime::{
        channel::Channel,
        heap::ValueHeap,
        native_function::NativeFunction,
        record::{FieldDecl, Record, RecordType},
        types::Type,
        value::Value,
    },
};

fn noop(_: Vec<Value>) -> Result<Value, String> {
    Ok(Value::Ref(None))
}

fn linked_record() -> Value {
    let ty = RecordType::new(
        "Link",
        vec![
            FieldDecl::public("next", Type::Ref),
            FieldDecl::private("tag", Type::Str),
        ],
    );
    Value::record(Record::new(ty, vec![Value::Ref(None), Value::string("t")]).unwrap())
}

#[test]
fn copiers_reject_values_of_other_categories() {
    let cases = [
        (Value::map([(1i64, Value::Integer(2)), (2i64, Value::Integer(4))]), Category::Map),
        (Value::list(vec![Value::Integer(2), Value::Integer(8)]), Category::List),
        (Value::array(vec![Value::Integer(1), Value::Integer(3)]), Category::Array),
        (Value::any(Value::Integer(5)), Category::Wrapper),
        (linked_record(), Category::Record),
        (Value::Ref(None), Category::Reference),
        (Value::Integer(3), Category::Scalar),
        (Value::Function(NativeFunction::new("noop", noop)), Category::Unsupported),
    ];

    let mut heap = ValueHeap::new();
    let mut state = CopyState::new(&mut heap, &CopyConfig::default());

    for (input, category) in &cases {
        for other in Category::ALL {
            if other == *category {
                continue;
            }
            let result = copier_for(other)(input, &mut state);
            match result {
                Err(CopyError::CategoryMismatch {
                    expected, found, ..
                }) => {
                    assert_eq!(expected, other);
                    assert_eq!(found, *category);
                }
                other_result => panic!(
                    "{} copier on {} value: expected mismatch, got {:?}",
                    other, category, other_result
                ),
            }
        }
    }
}

#[test]
fn copiers_accept_their_own_category() {
    let cases = [
        (Value::map([(1i64, Value::Integer(2))]), Category::Map),
        (Value::list(vec![Value::Integer(2)]), Category::List),
        (Value::array(vec![Value::Integer(2)]), Category::Array),
        (Value::any(Value::Integer(2)), Category::Wrapper),
        (linked_record(), Category::Record),
        (Value::Ref(None), Category::Reference),
        (Value::string("s"), Category::Scalar),
    ];

    let mut heap = ValueHeap::new();
    let mut state = CopyState::new(&mut heap, &CopyConfig::default());

    for (input, category) in &cases {
        let copied = copier_for(*category)(input, &mut state).unwrap();
        assert_eq!(&copied, input);
    }
}

#[test]
fn unsupported_copier_rejects_functions_and_channels() {
    let mut heap = ValueHeap::new();
    let mut state = CopyState::new(&mut heap, &CopyConfig::default());
    let reject = copier_for(Category::Unsupported);

    let function = Value::Function(NativeFunction::new("noop", noop));
    assert!(matches!(
        reject(&function, &mut state),
        Err(CopyError::Unsupported {
            type_name: "Function",
            ..
        })
    ));

    let channel = Value::Channel(Rc::new(Channel::new()));
    assert!(matches!(
        reject(&channel, &mut state),
        Err(CopyError::Unsupported {
            type_name: "Channel",
            ..
        })
    ));
}

#[test]
fn route_enforces_depth_limit() {
    let nested = Value::any(Value::any(Value::any(Value::Integer(1))));

    let mut heap = ValueHeap::new();
    let mut state = CopyState::new(&mut heap, &CopyConfig::default().with_max_depth(3));
    let err = state.route(&nested).unwrap_err();
    assert_eq!(
        err.to_string(),
        "copy depth limit of 3 exceeded at $.(any).(any).(any)"
    );

    let mut state = CopyState::new(&mut heap, &CopyConfig::default().with_max_depth(4));
    assert_eq!(state.route(&nested).unwrap(), nested);
}
