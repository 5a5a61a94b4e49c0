use std::rc::Rc;

use replica::runtime::{
    native_function::NativeFunction,
    record::{FieldDecl, RecordType},
    types::Type,
    value::Value,
};

/// Routes `log` output through the test harness. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn noop(_: Vec<Value>) -> Result<Value, String> {
    Ok(Value::Ref(None))
}

pub fn callable() -> Value {
    Value::Function(NativeFunction::new("noop", noop))
}

/// `Foo { Foo: Ref, Bar: Int }`, a record that can point at itself.
pub fn linked_type() -> Rc<RecordType> {
    RecordType::new(
        "Foo",
        vec![
            FieldDecl::public("Foo", Type::Ref),
            FieldDecl::public("Bar", Type::Int),
        ],
    )
}
