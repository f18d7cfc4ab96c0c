use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_scalar, result_of};

/// Format output as tables: scalar fields as Field/Value rows, then one table
/// per array of records (holders, classes, milestones).
pub fn print_table(value: &Value) {
    match result_of(value) {
        Value::Object(map) => print_object(map),
        Value::Array(arr) => print_records(arr),
        other => println!("{}", format_scalar(other)),
    }

    if let Some(envelope) = value.as_object() {
        print_envelope_notes(envelope);
    }
}

fn print_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut record_sets: Vec<(&str, &[Value])> = Vec::new();

    for (key, val) in map {
        match val {
            Value::Array(items) if matches!(items.first(), Some(Value::Object(_))) => {
                record_sets.push((key.as_str(), items.as_slice()));
            }
            Value::Object(inner) => {
                for (sub_key, sub_val) in inner {
                    builder.push_record([format!("{key}.{sub_key}"), format_scalar(sub_val)]);
                }
            }
            _ => builder.push_record([key.clone(), format_scalar(val)]),
        }
    }
    println!("{}", Table::from(builder));

    for (name, records) in record_sets {
        println!("\n{name}:");
        print_records(records);
    }
}

fn print_records(arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            println!("{}", format_scalar(item));
        }
        if arr.is_empty() {
            println!("(empty)");
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_scalar).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
