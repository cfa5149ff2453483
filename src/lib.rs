mod bundle;
mod events;
mod json;
mod level_event;
mod properties;
mod store;

pub use bundle::EventBundle;
pub use events::{decode_event_infos, encode_event_infos, EventInfo, EventType, ExecutionTime};
pub use json::{normalize_fragment, parse_enum, parse_lenient};
pub use level_event::LevelEvent;
pub use properties::{Property, PropertyData, TileRelativeTo};
pub use store::{BundleStore, FileSettings, MemorySettings, SettingsStore, BUNDLES_KEY};
