use serde_json::Value;

use super::{format_scalar, result_of};

/// Keys that carry the headline answer, in priority order.
const PRIORITY_KEYS: [&str; 8] = [
    "requirement",
    "next_due",
    "display",
    "within_limit",
    "percent_raised",
    "days",
    "total_fully_diluted",
    "remaining_capacity",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);

    if let Value::Object(map) = result {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key) {
                if !val.is_null() {
                    println!("{}", format_scalar(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_scalar(val));
            return;
        }
    }

    println!("{}", format_scalar(result));
}
