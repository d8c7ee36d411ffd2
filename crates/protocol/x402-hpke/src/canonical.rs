//! Canonical JSON serialization.
//!
//! One serializer feeds both the AAD builder and the sidecar projection,
//! so byte identity between the two holds by construction: scalars as
//! their JSON literals, arrays element-wise, object keys sorted by Unicode
//! code point, no whitespace between tokens.

use serde_json::{Map, Value};

use x402_hpke_types::{X402Error, X402Result};

/// Serialize a value to its canonical compact form.
pub fn to_canonical_string(value: &Value) -> X402Result<String> {
    let mut out = String::new();
    write_value(&mut out, value)?;
    Ok(out)
}

/// Deep-normalize a value: object keys sorted, numbers checked finite.
pub fn canonicalize(value: &Value) -> X402Result<Value> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(value.clone()),
        Value::Number(n) => {
            check_finite(n)?;
            Ok(value.clone())
        }
        Value::Array(items) => Ok(Value::Array(
            items.iter().map(canonicalize).collect::<X402Result<_>>()?,
        )),
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = Map::new();
            for key in keys {
                out.insert(key.clone(), canonicalize(&map[key])?);
            }
            Ok(Value::Object(out))
        }
    }
}

fn check_finite(n: &serde_json::Number) -> X402Result<()> {
    // serde_json numbers cannot hold NaN or infinities, so this guard only
    // trips if that ever changes (e.g. arbitrary-precision builds).
    if let Some(f) = n.as_f64() {
        if !f.is_finite() {
            return Err(X402Error::invalid("non-finite number"));
        }
    }
    Ok(())
}

fn write_value(out: &mut String, value: &Value) -> X402Result<()> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => {
            check_finite(n)?;
            out.push_str(&n.to_string());
        }
        Value::String(s) => {
            let escaped =
                serde_json::to_string(s).map_err(|_| X402Error::invalid("unencodable string"))?;
            out.push_str(&escaped);
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, &Value::String((*key).clone()))?;
                out.push(':');
                write_value(out, &map[*key])?;
            }
            out.push('}');
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(to_canonical_string(&json!(null)).unwrap(), "null");
        assert_eq!(to_canonical_string(&json!(true)).unwrap(), "true");
        assert_eq!(to_canonical_string(&json!(42)).unwrap(), "42");
        assert_eq!(to_canonical_string(&json!("a\"b")).unwrap(), "\"a\\\"b\"");
    }

    #[test]
    fn test_object_keys_are_sorted() {
        let value = json!({"b": 2, "a": 1, "Z": 0});
        assert_eq!(
            to_canonical_string(&value).unwrap(),
            "{\"Z\":0,\"a\":1,\"b\":2}"
        );
    }

    #[test]
    fn test_nested_structures_are_compact() {
        let value = json!({"outer": {"y": [1, 2, {"k": "v"}], "x": null}});
        assert_eq!(
            to_canonical_string(&value).unwrap(),
            "{\"outer\":{\"x\":null,\"y\":[1,2,{\"k\":\"v\"}]}}"
        );
    }

    #[test]
    fn test_key_order_does_not_change_bytes() {
        let a: Value = serde_json::from_str("{\"x\": 1, \"y\": {\"b\": 2, \"a\": 3}}").unwrap();
        let b: Value = serde_json::from_str("{\"y\":{\"a\":3,\"b\":2},\"x\":1}").unwrap();
        assert_eq!(
            to_canonical_string(&a).unwrap(),
            to_canonical_string(&b).unwrap()
        );
    }

    #[test]
    fn test_canonicalize_sorts_deeply() {
        let value = json!({"b": {"d": 1, "c": 2}, "a": 3});
        let normalized = canonicalize(&value).unwrap();
        assert_eq!(
            serde_json::to_string(&normalized).unwrap(),
            "{\"a\":3,\"b\":{\"c\":2,\"d\":1}}"
        );
    }

    #[test]
    fn test_unicode_passes_through() {
        assert_eq!(
            to_canonical_string(&json!("héllo")).unwrap(),
            "\"héllo\""
        );
    }
}
