use anyhow::bail;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::json::{escape_string, normalize_fragment, parse_lenient};
use crate::level_event::LevelEvent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBundle {
    pub name: String,
    pub author: String,
    pub events: Vec<String>,
}

impl EventBundle {
    pub fn from_events(name: &str, author: &str, events: &[LevelEvent]) -> Self {
        let events = events
            .iter()
            .map(|event| normalize_fragment(&event.render_fragment()))
            .collect();

        Self {
            name: name.to_owned(),
            author: author.to_owned(),
            events,
        }
    }

    // textual composition around pre-rendered fragments; the trailing comma
    // after every event object is part of the persisted dialect
    pub fn encode(&self) -> String {
        let mut block = String::new();

        for event in &self.events {
            block.push_str("        { ");
            block.push_str(event);
            block.push_str("},\n");
        }

        format!(
            "{{\n    \"name\": \"{}\",\n    \"author\": \"{}\",\n    \"events\": [\n{}    ]\n}}",
            escape_string(&self.name),
            escape_string(&self.author),
            block,
        )
    }

    // a bundle without identity metadata is not a bundle
    pub fn decode(data: &Map<String, Value>) -> anyhow::Result<EventBundle> {
        let name = match data.get("name").and_then(Value::as_str) {
            Some(name) => name.to_owned(),
            None => bail!("bundle has no string \"name\""),
        };
        let author = match data.get("author").and_then(Value::as_str) {
            Some(author) => author.to_owned(),
            None => bail!("bundle has no string \"author\""),
        };

        let mut events = Vec::new();

        if let Some(Value::Array(entries)) = data.get("events") {
            for entry in entries {
                let map = match entry.as_object() {
                    Some(map) => map,
                    None => bail!("bundle event entry is not an object"),
                };

                let fragment = LevelEvent::from_tree(map).render_fragment();

                events.push(normalize_fragment(&fragment));
            }
        }

        Ok(EventBundle {
            name,
            author,
            events,
        })
    }

    // one instance per fragment, repositioned to the given floor; order is
    // the application order
    pub fn instantiate_at(&self, floor: i64) -> anyhow::Result<Vec<LevelEvent>> {
        let mut result = Vec::with_capacity(self.events.len());

        for fragment in &self.events {
            let tree = parse_lenient(&format!("{{{fragment}}}"))?;
            let map = match tree.as_object() {
                Some(map) => map,
                None => bail!("fragment did not parse to an object body"),
            };
            let mut event = LevelEvent::from_tree(map);

            event.floor = floor;
            result.push(event);
        }

        Ok(result)
    }
}
