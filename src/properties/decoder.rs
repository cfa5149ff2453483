use serde_json::{Map, Value};

use crate::json::{parse_enum, TreeExt};
use crate::properties::{Property, PropertyData, TileRelativeTo};

impl Property {
    // never fails: absent or mis-shaped fields fall back to their zero
    // values, unrecognized type labels land in PropertyData::Unknown
    pub fn decode(map: &Map<String, Value>) -> Property {
        let name = map.string_field("name");
        let label = map.string_field("type");

        let data = match label.as_str() {
            "Float" => PropertyData::Float {
                default: map.f64_field("default"),
                min: map.f64_field("min"),
                max: map.f64_field("max"),
            },
            "Bool" => PropertyData::Bool {
                default: map.bool_field("default"),
            },
            "Int" => PropertyData::Int {
                default: map.i64_field("default"),
                min: map.i64_field("min"),
                max: map.i64_field("max"),
            },
            "Color" => PropertyData::Color {
                default: map.get("default").cloned().unwrap_or(Value::Null),
                uses_alpha: map.bool_field("usesAlpha"),
            },
            "File" => PropertyData::File {
                default: map.string_field("default"),
            },
            "String" => PropertyData::String {
                default: map.string_field("default"),
                min_length: map.i64_field("minLength"),
                max_length: map.i64_field("maxLength"),
                needs_unicode: map.bool_field("needsUnicode"),
            },
            "Text" => PropertyData::LongString {
                default: map.string_field("default"),
            },
            "Vector2" => PropertyData::Vector2 {
                default: map.pair_field("default"),
                min: map.pair_field("min"),
                max: map.pair_field("max"),
            },
            "Tile" => PropertyData::Tile {
                default: tile_default(map),
                min: map.i64_field("min"),
                max: map.i64_field("max"),
            },
            "Rating" => PropertyData::Rating {
                default: map.get("default").cloned().unwrap_or(Value::Null),
            },
            other => match other.strip_prefix("Enum:") {
                Some(enum_type) => PropertyData::Enum {
                    enum_type: enum_type.to_owned(),
                    default: map.string_field("default"),
                },
                None => PropertyData::Unknown {
                    type_label: other.to_owned(),
                },
            },
        };

        Property { name, data }
    }
}

fn tile_default(map: &Map<String, Value>) -> (i64, TileRelativeTo) {
    match map.get("default") {
        Some(Value::Array(parts)) => (
            parts.first().and_then(Value::as_i64).unwrap_or_default(),
            parts
                .get(1)
                .and_then(Value::as_str)
                .map(|label| parse_enum(label, TileRelativeTo::ThisTile))
                .unwrap_or(TileRelativeTo::ThisTile),
        ),
        _ => (0, TileRelativeTo::ThisTile),
    }
}
