use serde_json::{Map, Value};

use crate::properties::{Property, PropertyData};

impl Property {
    pub fn encode(&self) -> Map<String, Value> {
        let mut map = Map::new();

        map.insert("name".to_owned(), Value::from(self.name.as_str()));
        map.insert("type".to_owned(), Value::from(self.data.tag()));

        match &self.data {
            PropertyData::Float { default, min, max } => {
                map.insert("default".to_owned(), Value::from(*default));
                map.insert("min".to_owned(), Value::from(*min));
                map.insert("max".to_owned(), Value::from(*max));
            }
            PropertyData::Bool { default } => {
                map.insert("default".to_owned(), Value::from(*default));
            }
            PropertyData::Int { default, min, max } => {
                map.insert("default".to_owned(), Value::from(*default));
                map.insert("min".to_owned(), Value::from(*min));
                map.insert("max".to_owned(), Value::from(*max));
            }
            PropertyData::Color {
                default,
                uses_alpha,
            } => {
                map.insert("default".to_owned(), default.clone());
                map.insert("usesAlpha".to_owned(), Value::from(*uses_alpha));
            }
            PropertyData::File { default } => {
                map.insert("default".to_owned(), Value::from(default.as_str()));
            }
            PropertyData::String {
                default,
                min_length,
                max_length,
                needs_unicode,
            } => {
                map.insert("default".to_owned(), Value::from(default.as_str()));
                map.insert("minLength".to_owned(), Value::from(*min_length));
                map.insert("maxLength".to_owned(), Value::from(*max_length));
                map.insert("needsUnicode".to_owned(), Value::from(*needs_unicode));
            }
            PropertyData::LongString { default } => {
                map.insert("type".to_owned(), Value::from("Text"));
                map.insert("default".to_owned(), Value::from(default.as_str()));
            }
            PropertyData::Enum { enum_type, default } => {
                map.insert("type".to_owned(), Value::from(format!("Enum:{enum_type}")));
                map.insert("default".to_owned(), Value::from(default.as_str()));
            }
            PropertyData::Vector2 { default, min, max } => {
                map.insert("default".to_owned(), pair(default));
                map.insert("min".to_owned(), pair(min));
                map.insert("max".to_owned(), pair(max));
            }
            PropertyData::Tile { default, min, max } => {
                let (index, relative_to) = default;

                map.insert(
                    "default".to_owned(),
                    Value::Array(vec![
                        Value::from(*index),
                        Value::from(relative_to.to_string()),
                    ]),
                );
                map.insert("min".to_owned(), Value::from(*min));
                map.insert("max".to_owned(), Value::from(*max));
            }
            PropertyData::Rating { default } => {
                map.insert("default".to_owned(), default.clone());
            }
            // tolerated partial encode: the base map only
            PropertyData::Unknown { .. } => {}
        }

        map
    }
}

fn pair(values: &[f64; 2]) -> Value {
    Value::Array(vec![Value::from(values[0]), Value::from(values[1])])
}
