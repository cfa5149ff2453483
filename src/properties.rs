use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::json::label_enum;

mod decoder;
mod encoder;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub data: PropertyData,
}

impl Property {
    pub fn new(name: &str, data: PropertyData) -> Self {
        Self {
            name: name.to_owned(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyData {
    Float {
        default: f64,
        min: f64,
        max: f64,
    },
    Bool {
        default: bool,
    },
    Int {
        default: i64,
        min: i64,
        max: i64,
    },
    Color {
        default: Value, // opaque color value, passed through unchanged
        uses_alpha: bool,
    },
    File {
        default: String,
    },
    String {
        default: String,
        min_length: i64,
        max_length: i64,
        needs_unicode: bool,
    },
    LongString {
        default: String,
    },
    Enum {
        enum_type: String,
        default: String,
    },
    Vector2 {
        default: [f64; 2],
        min: [f64; 2],
        max: [f64; 2],
    },
    Tile {
        default: (i64, TileRelativeTo),
        min: i64,
        max: i64,
    },
    Rating {
        default: Value,
    },
    Unknown {
        // descriptor tables are allowed to grow variants this codec does not
        // know; such entries keep their label and carry no typed payload
        type_label: String,
    },
}

impl PropertyData {
    pub fn tag(&self) -> &str {
        match self {
            PropertyData::Float { .. } => "Float",
            PropertyData::Bool { .. } => "Bool",
            PropertyData::Int { .. } => "Int",
            PropertyData::Color { .. } => "Color",
            PropertyData::File { .. } => "File",
            PropertyData::String { .. } => "String",
            PropertyData::LongString { .. } => "LongString",
            PropertyData::Enum { .. } => "Enum",
            PropertyData::Vector2 { .. } => "Vector2",
            PropertyData::Tile { .. } => "Tile",
            PropertyData::Rating { .. } => "Rating",
            PropertyData::Unknown { type_label } => type_label,
        }
    }
}

label_enum!(TileRelativeTo {
    ThisTile,
    Start,
    End,
});
