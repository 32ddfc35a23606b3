//! [`Dump`] for parsed JSON and TOML documents.
//!
//! Document arrays and objects hold values of any type, so their elements are
//! erased slots: every child carries a `(type)` annotation naming the variant
//! it holds. Arrays report `cap = len`.

use std::borrow::Cow;

use crate::core::types::{Dump, Float, MapShape, Seq, Shape};

fn erased_seq<'a, T: Dump>(items: &'a [T]) -> Seq<'a> {
    Seq {
        items: items.iter().map(|item| item as &dyn Dump).collect(),
        cap: items.len(),
        erased: true,
    }
}

fn erased_map<'a, T: Dump>(entries: impl Iterator<Item = (&'a String, &'a T)>) -> MapShape<'a>
where
    T: 'a,
{
    MapShape {
        entries: entries
            .map(|(key, value)| (key as &dyn Dump, value as &dyn Dump))
            .collect(),
        key_erased: false,
        value_erased: true,
    }
}

impl Dump for serde_json::Value {
    fn type_name(&self) -> Cow<'static, str> {
        use serde_json::Value;
        Cow::Borrowed(match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(n) if n.is_i64() => "i64",
            Value::Number(n) if n.is_u64() => "u64",
            Value::Number(_) => "f64",
            Value::String(_) => "String",
            Value::Array(_) => "Vec<Value>",
            Value::Object(_) => "Map<String, Value>",
        })
    }

    fn shape(&self) -> Shape<'_> {
        use serde_json::Value;
        match self {
            Value::Null => Shape::Nil,
            Value::Bool(b) => Shape::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Shape::Int(i.into())
                } else if let Some(u) = n.as_u64() {
                    Shape::Uint(u.into())
                } else {
                    match n.as_f64() {
                        Some(f) => Shape::Float(Float::F64(f)),
                        None => Shape::Other(n.to_string()),
                    }
                }
            }
            Value::String(s) => Shape::Str(Cow::Borrowed(s.as_str())),
            Value::Array(items) => Shape::Slice(erased_seq(items)),
            Value::Object(map) => Shape::Map(erased_map(map.iter())),
        }
    }
}

impl Dump for toml::Value {
    fn type_name(&self) -> Cow<'static, str> {
        use toml::Value;
        Cow::Borrowed(match self {
            Value::String(_) => "String",
            Value::Integer(_) => "i64",
            Value::Float(_) => "f64",
            Value::Boolean(_) => "bool",
            Value::Datetime(_) => "Datetime",
            Value::Array(_) => "Vec<Value>",
            Value::Table(_) => "Table",
        })
    }

    fn shape(&self) -> Shape<'_> {
        use toml::Value;
        match self {
            Value::String(s) => Shape::Str(Cow::Borrowed(s.as_str())),
            Value::Integer(i) => Shape::Int((*i).into()),
            Value::Float(f) => Shape::Float(Float::F64(*f)),
            Value::Boolean(b) => Shape::Bool(*b),
            Value::Datetime(dt) => Shape::Other(dt.to_string()),
            Value::Array(items) => Shape::Slice(erased_seq(items)),
            Value::Table(table) => Shape::Map(erased_map(table.iter())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::render;
    use crate::io::config::DumpConfig;

    fn one_space() -> DumpConfig {
        DumpConfig {
            indent: " ".to_string(),
            ..DumpConfig::default()
        }
    }

    #[test]
    fn json_object_annotates_values() {
        let value: serde_json::Value =
            serde_json::from_str(r#"{"name": "ada", "tags": [1, -2, 2.5], "none": null}"#)
                .expect("parse");
        assert_eq!(
            render(&value, &one_space()),
            "Map<String, Value>\n (len=3) {\n  \"name\" : (String) \"ada\",\n  \"none\" : (null) <nil>,\n  \"tags\" : (Vec<Value>) (len=3, cap=3)[(i64) 1, (i64) -2, (f64) 2.5],\n }"
        );
    }

    #[test]
    fn json_scalars_pick_numeric_width() {
        let big: serde_json::Value = serde_json::from_str("18446744073709551615").expect("parse");
        assert_eq!(render(&big, &one_space()), "u64\n 18446744073709551615");
        let null = serde_json::Value::Null;
        assert_eq!(render(&null, &one_space()), "null\n <nil>");
    }

    #[test]
    fn toml_table_renders_datetime_as_other() {
        let table: toml::Table = toml::from_str(
            "title = \"x\"\nwhen = 1979-05-27T07:32:00Z\nports = [80, 443]\n",
        )
        .expect("parse");
        let value = toml::Value::Table(table);
        let out = render(&value, &one_space());
        assert!(out.starts_with("Table\n (len=3) {"), "{out}");
        assert!(out.contains("\"when\" : (Datetime) 1979-05-27T07:32:00Z,"), "{out}");
        assert!(
            out.contains("\"ports\" : (Vec<Value>) (len=2, cap=2)[(i64) 80, (i64) 443],"),
            "{out}"
        );
    }

    #[test]
    fn nested_documents_respect_depth() {
        let value: serde_json::Value =
            serde_json::from_str(r#"{"a": {"b": {"c": 1}}}"#).expect("parse");
        let config = DumpConfig {
            indent: " ".to_string(),
            max_depth: 2,
        };
        assert_eq!(
            render(&value, &config),
            "Map<String, Value>\n (len=1) {\n  \"a\" : (Map<String, Value>) (len=1) {\n   \"b\" : (Map<String, Value>) (len=1) {...},\n  },\n }"
        );
    }
}
