use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::events::EventType;
use crate::json::{escape_string, parse_enum, TreeExt};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelEvent {
    pub event_type: EventType,
    pub floor: i64,
    pub parts: IndexMap<String, Value>,
}

impl LevelEvent {
    pub fn new(event_type: EventType, floor: i64) -> Self {
        Self {
            event_type,
            floor,
            parts: IndexMap::new(),
        }
    }

    pub fn with_part(mut self, key: &str, value: Value) -> Self {
        self.parts.insert(key.to_owned(), value);
        self
    }

    // never fails: a missing floor is 0, an unknown event type is the sentinel
    pub fn from_tree(map: &Map<String, Value>) -> LevelEvent {
        let floor = map.i64_field("floor");
        let event_type = parse_enum(&map.string_field("eventType"), EventType::None);
        let mut parts = IndexMap::new();

        for (key, value) in map {
            if key == "floor" || key == "eventType" {
                continue;
            }

            parts.insert(key.clone(), value.clone());
        }

        LevelEvent {
            event_type,
            floor,
            parts,
        }
    }

    // the body of a JSON object literal, without its enclosing braces
    pub fn render_fragment(&self) -> String {
        let mut pieces = Vec::with_capacity(self.parts.len() + 2);

        pieces.push(format!("\"floor\": {}", self.floor));

        if self.event_type != EventType::None {
            pieces.push(format!("\"eventType\": \"{}\"", self.event_type));
        }

        for (key, value) in &self.parts {
            pieces.push(format!("\"{}\": {}", escape_string(key), value));
        }

        pieces.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::json::parse_lenient;

    #[test]
    fn fragments_render_floor_and_type_first() {
        let event = LevelEvent::new(EventType::SetSpeed, 4)
            .with_part("speedType", json!("Bpm"))
            .with_part("beatsPerMinute", json!(170.0));

        assert_eq!(
            event.render_fragment(),
            "\"floor\": 4, \"eventType\": \"SetSpeed\", \"speedType\": \"Bpm\", \"beatsPerMinute\": 170.0"
        );
    }

    #[test]
    fn fragment_round_trips_through_the_tree_form() {
        let event = LevelEvent::new(EventType::MoveTrack, 12)
            .with_part("duration", json!(2.5))
            .with_part("positionOffset", json!([1.0, 0.0]));

        let wrapped = format!("{{{}}}", event.render_fragment());
        let tree = parse_lenient(&wrapped).unwrap();
        let rebuilt = LevelEvent::from_tree(tree.as_object().unwrap());

        assert_eq!(rebuilt, event);
    }

    #[test]
    fn missing_keys_fall_back_to_sentinels() {
        let tree = json!({"bpm": 120});
        let event = LevelEvent::from_tree(tree.as_object().unwrap());

        assert_eq!(event.floor, 0);
        assert_eq!(event.event_type, EventType::None);
        assert_eq!(event.parts["bpm"], json!(120));
    }

    #[test]
    fn unknown_event_type_labels_become_the_sentinel() {
        let tree = json!({"floor": 3, "eventType": "NoSuchEvent"});
        let event = LevelEvent::from_tree(tree.as_object().unwrap());

        assert_eq!(event.event_type, EventType::None);
    }
}
