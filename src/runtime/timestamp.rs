//! Built-in `Time` record: an instant plus the location it is displayed in.
//!
//! The record is opaque. All of its fields are private, and the location is
//! held behind a reference to a private `Location` record, so a `Time` value
//! is only reproduced faithfully if its private representation is.

use std::rc::Rc;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

use crate::runtime::{
    heap::ValueHeap,
    record::{FieldDecl, Record, RecordError, RecordType},
    types::Type,
    value::Value,
};

const SECS: usize = 0;
const NANOS: usize = 1;
const LOC: usize = 2;

const LOC_NAME: usize = 0;
const LOC_OFFSET: usize = 1;

thread_local! {
    static TIME_TYPE: Rc<RecordType> = RecordType::new(
        "Time",
        vec![
            FieldDecl::private("secs", Type::Int),
            FieldDecl::private("nanos", Type::Int),
            FieldDecl::private("loc", Type::Ref),
        ],
    );
    static LOCATION_TYPE: Rc<RecordType> = RecordType::new(
        "Location",
        vec![
            FieldDecl::private("name", Type::Str),
            FieldDecl::private("offset", Type::Int),
        ],
    );
}

/// Record type of `Time` values, for declaring fields that hold one.
pub fn time_type() -> Rc<RecordType> {
    TIME_TYPE.with(Rc::clone)
}

fn location_type() -> Rc<RecordType> {
    LOCATION_TYPE.with(Rc::clone)
}

/// Named fixed UTC offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub name: String,
    pub offset_secs: i32,
}

/// Host-side view of a `Time` value.
///
/// `==` compares the full state, location included. [`Timestamp::instant_eq`]
/// compares only the instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    secs: i64,
    nanos: u32,
    zone: Option<Zone>,
}

impl Timestamp {
    /// A timestamp displayed in UTC; it carries no location.
    pub fn utc(at: &DateTime<Utc>) -> Self {
        Self {
            secs: at.timestamp(),
            nanos: at.timestamp_subsec_nanos(),
            zone: None,
        }
    }

    /// A timestamp displayed in the named zone at `at`'s offset.
    pub fn in_zone(at: &DateTime<FixedOffset>, name: &str) -> Self {
        Self {
            secs: at.timestamp(),
            nanos: at.timestamp_subsec_nanos(),
            zone: Some(Zone {
                name: name.to_string(),
                offset_secs: at.offset().local_minus_utc(),
            }),
        }
    }

    pub fn zone(&self) -> Option<&Zone> {
        self.zone.as_ref()
    }

    /// Returns `true` when both timestamps denote the same instant.
    pub fn instant_eq(&self, other: &Self) -> bool {
        self.secs == other.secs && self.nanos == other.nanos
    }

    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(self.zone.as_ref().map_or(0, |z| z.offset_secs))?;
        let utc = DateTime::from_timestamp(self.secs, self.nanos)?;
        Some(utc.with_timezone(&offset))
    }

    /// RFC 3339 rendering with as many fractional digits as needed.
    pub fn to_rfc3339(&self) -> Option<String> {
        self.to_datetime()
            .map(|at| at.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    /// Stores this timestamp as a `Time` record, allocating its location in `heap`.
    pub fn to_value(&self, heap: &mut ValueHeap) -> Result<Value, RecordError> {
        let loc = match &self.zone {
            Some(zone) => {
                let location = Record::new(
                    location_type(),
                    vec![
                        Value::String(zone.name.as_str().into()),
                        Value::Integer(zone.offset_secs as i64),
                    ],
                )?;
                Some(heap.alloc(Value::record(location)))
            }
            None => None,
        };

        let time = Record::new(
            time_type(),
            vec![
                Value::Integer(self.secs),
                Value::Integer(self.nanos as i64),
                Value::Ref(loc),
            ],
        )?;
        Ok(Value::record(time))
    }

    /// Reads a `Time` record back. Returns `None` for any other value.
    pub fn from_value(value: &Value, heap: &ValueHeap) -> Option<Self> {
        let record = value.as_record()?;
        if **record.record_type() != *time_type() {
            return None;
        }

        let fields = record.raw_fields();
        let (Value::Integer(secs), Value::Integer(nanos), Value::Ref(loc)) =
            (&fields[SECS], &fields[NANOS], &fields[LOC])
        else {
            return None;
        };

        let zone = match loc {
            None => None,
            Some(handle) => Some(read_zone(heap.get(*handle)?)?),
        };

        Some(Self {
            secs: *secs,
            nanos: u32::try_from(*nanos).ok()?,
            zone,
        })
    }
}

fn read_zone(value: &Value) -> Option<Zone> {
    let record = value.as_record()?;
    if **record.record_type() != *location_type() {
        return None;
    }

    let fields = record.raw_fields();
    match (&fields[LOC_NAME], &fields[LOC_OFFSET]) {
        (Value::String(name), Value::Integer(offset)) => Some(Zone {
            name: name.to_string(),
            offset_secs: i32::try_from(*offset).ok()?,
        }),
        _ => None,
    }
}
