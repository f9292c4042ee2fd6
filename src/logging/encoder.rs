//! Record encoders.
//!
//! The file sink serializes records as JSON objects for machine
//! consumption; the console sink writes tab-separated human-readable
//! lines. Both render the timestamp as `YYYY-MM-DD HH:MM:SS.mmm` and
//! the severity as an upper-case tag.

use std::io;

use serde_json::{Map, Value};

use crate::logging::record::{Record, TIMESTAMP_FORMAT};

/// Serializes one record into the sink's output representation.
pub trait Encode: Send + Sync {
    fn encode(&self, record: &Record<'_>, buf: &mut Vec<u8>) -> io::Result<()>;
}

/// JSON object per line, key order fixed:
/// `ts`, `level`, `caller`, `msg`, then the record's fields, then
/// `stacktrace` when present.
#[derive(Debug, Default)]
pub struct JsonEncoder;

impl Encode for JsonEncoder {
    fn encode(&self, record: &Record<'_>, buf: &mut Vec<u8>) -> io::Result<()> {
        let mut object = Map::new();
        object.insert(
            "ts".to_string(),
            Value::from(record.time.format(TIMESTAMP_FORMAT).to_string()),
        );
        object.insert("level".to_string(), Value::from(record.level.as_str()));
        object.insert("caller".to_string(), Value::from(record.caller.to_string()));
        object.insert("msg".to_string(), Value::from(record.message));
        for field in record.fields {
            object.insert(field.key.to_string(), field.value.clone());
        }
        if let Some(stack) = &record.stacktrace {
            object.insert("stacktrace".to_string(), Value::from(stack.as_str()));
        }

        serde_json::to_writer(&mut *buf, &Value::Object(object))?;
        buf.push(b'\n');
        Ok(())
    }
}

/// Tab-separated line:
/// `ts<TAB>LEVEL<TAB>caller<TAB>msg<TAB>{fields}` with the stack trace,
/// when present, on the following lines.
#[derive(Debug, Default)]
pub struct ConsoleEncoder;

impl Encode for ConsoleEncoder {
    fn encode(&self, record: &Record<'_>, buf: &mut Vec<u8>) -> io::Result<()> {
        use std::io::Write;

        write!(
            buf,
            "{}\t{}\t{}\t{}",
            record.time.format(TIMESTAMP_FORMAT),
            record.level.as_str(),
            record.caller,
            record.message
        )?;

        if !record.fields.is_empty() {
            let mut object = Map::new();
            for field in record.fields {
                object.insert(field.key.to_string(), field.value.clone());
            }
            buf.push(b'\t');
            serde_json::to_writer(&mut *buf, &Value::Object(object))?;
        }
        buf.push(b'\n');

        if let Some(stack) = &record.stacktrace {
            writeln!(buf, "{}", stack)?;
        }
        Ok(())
    }
}
