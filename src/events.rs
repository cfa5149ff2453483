use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::json::{label_enum, parse_enum, TreeExt};
use crate::properties::Property;

label_enum!(EventType {
    None,
    SetSpeed,
    Twirl,
    Checkpoint,
    SetHitsound,
    PlaySound,
    SetPlanetRotation,
    Pause,
    AutoPlayTiles,
    ColorTrack,
    AnimateTrack,
    RecolorTrack,
    MoveTrack,
    PositionTrack,
    MoveCamera,
    SetFilter,
    HallOfMirrors,
    ShakeScreen,
    Flash,
    Bloom,
    ScreenTile,
    ScreenScroll,
    AddDecoration,
    AddText,
    SetText,
    MoveDecorations,
    RepeatEvents,
    SetConditionalEvents,
    Hold,
});

label_enum!(ExecutionTime {
    OnPreBar,
    OnBar,
    OnBeat,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInfo {
    pub name: String,
    pub event_type: EventType,
    pub execution_time: ExecutionTime,
    pub properties: IndexMap<String, Property>,
}

pub fn encode_event_infos(event_infos: &IndexMap<String, EventInfo>) -> Vec<Value> {
    let mut result = Vec::with_capacity(event_infos.len());

    for info in event_infos.values() {
        let mut map = Map::new();

        map.insert("name".to_owned(), Value::from(info.name.as_str()));
        map.insert(
            "executionTime".to_owned(),
            Value::from(info.execution_time.to_string()),
        );

        let properties = info
            .properties
            .values()
            .map(|property| Value::Object(property.encode()))
            .collect();

        map.insert("properties".to_owned(), Value::Array(properties));
        result.push(Value::Object(map));
    }

    result
}

pub fn decode_event_infos(event_info_list: &[Value]) -> IndexMap<String, EventInfo> {
    let mut result = IndexMap::new();

    for entry in event_info_list {
        let map = match entry.as_object() {
            Some(map) => map,
            None => continue,
        };

        let name = map.string_field("name");
        let event_type = parse_enum(&name, EventType::None);
        let execution_time = parse_enum(&map.string_field("executionTime"), ExecutionTime::OnBar);
        let mut properties = IndexMap::new();

        if let Some(Value::Array(property_list)) = map.get("properties") {
            for entry in property_list {
                let property_map = match entry.as_object() {
                    Some(map) => map,
                    None => continue,
                };

                // entries explicitly marked disabled are retained in source
                // data for forward compatibility and must never decode
                if property_map.get("enabled").and_then(Value::as_bool) == Some(false) {
                    continue;
                }

                let property = Property::decode(property_map);

                properties.insert(property.name.clone(), property);
            }
        }

        result.insert(
            name.clone(),
            EventInfo {
                name,
                event_type,
                execution_time,
                properties,
            },
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::properties::PropertyData;

    fn sample_info(name: &str) -> EventInfo {
        let mut properties = IndexMap::new();

        properties.insert(
            "angleOffset".to_owned(),
            Property::new(
                "angleOffset",
                PropertyData::Float {
                    default: 0.0,
                    min: -360.0,
                    max: 360.0,
                },
            ),
        );
        properties.insert(
            "ease".to_owned(),
            Property::new(
                "ease",
                PropertyData::Enum {
                    enum_type: "Ease".to_owned(),
                    default: "Linear".to_owned(),
                },
            ),
        );

        EventInfo {
            name: name.to_owned(),
            event_type: parse_enum(name, EventType::None),
            execution_time: ExecutionTime::OnBar,
            properties,
        }
    }

    #[test]
    fn encode_then_decode_preserves_infos_and_order() {
        let mut infos = IndexMap::new();

        infos.insert("MoveTrack".to_owned(), sample_info("MoveTrack"));
        infos.insert("SetSpeed".to_owned(), sample_info("SetSpeed"));

        let decoded = decode_event_infos(&encode_event_infos(&infos));

        assert_eq!(decoded, infos);
        assert_eq!(
            decoded.keys().collect::<Vec<_>>(),
            vec!["MoveTrack", "SetSpeed"]
        );
    }

    #[test]
    fn disabled_properties_are_skipped() {
        let list = vec![json!({
            "name": "MoveTrack",
            "executionTime": "OnBar",
            "properties": [
                {"name": "duration", "type": "Float", "default": 1.0, "min": 0.0, "max": 100.0},
                {"name": "gapLength", "type": "Int", "default": 0, "min": 0, "max": 50, "enabled": false},
            ],
        })];
        let decoded = decode_event_infos(&list);
        let info = &decoded["MoveTrack"];

        assert!(info.properties.contains_key("duration"));
        assert!(!info.properties.contains_key("gapLength"));
    }

    #[test]
    fn duplicate_names_keep_the_enabled_entry() {
        let list = vec![json!({
            "name": "SetSpeed",
            "executionTime": "OnBar",
            "properties": [
                {"name": "bpm", "type": "Float", "default": 100.0, "min": 1.0, "max": 1000.0, "enabled": false},
                {"name": "bpm", "type": "Float", "default": 120.0, "min": 1.0, "max": 1000.0},
            ],
        })];
        let decoded = decode_event_infos(&list);
        let property = &decoded["SetSpeed"].properties["bpm"];

        assert_eq!(
            property.data,
            PropertyData::Float {
                default: 120.0,
                min: 1.0,
                max: 1000.0,
            }
        );
    }

    #[test]
    fn unknown_event_name_resolves_to_the_sentinel() {
        let list = vec![json!({
            "name": "NoSuchEvent",
            "executionTime": "OnBar",
            "properties": [],
        })];
        let decoded = decode_event_infos(&list);

        assert_eq!(decoded["NoSuchEvent"].event_type, EventType::None);
    }

    #[test]
    fn unknown_execution_time_defaults_to_on_bar() {
        let list = vec![json!({
            "name": "Twirl",
            "executionTime": "Whenever",
            "properties": [],
        })];
        let decoded = decode_event_infos(&list);

        assert_eq!(decoded["Twirl"].execution_time, ExecutionTime::OnBar);
    }

    #[test]
    fn missing_name_keys_the_info_under_the_empty_string() {
        let list = vec![json!({"executionTime": "OnBeat", "properties": []})];
        let decoded = decode_event_infos(&list);
        let info = &decoded[""];

        assert_eq!(info.name, "");
        assert_eq!(info.event_type, EventType::None);
        assert_eq!(info.execution_time, ExecutionTime::OnBeat);
    }

    #[test]
    fn unknown_enum_property_type_does_not_fail_the_decode() {
        let list = vec![json!({
            "name": "AnimateTrack",
            "executionTime": "OnBar",
            "properties": [
                {"name": "ease", "type": "Enum:NoSuchType", "default": "Linear"},
            ],
        })];
        let decoded = decode_event_infos(&list);

        assert!(decoded["AnimateTrack"].properties.contains_key("ease"));
    }
}
