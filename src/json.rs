use std::str::FromStr;

use serde_json::{Map, Value};

macro_rules! label_enum {
    (
        $name:ident { $($variant:ident),+ $(,)? }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $($variant,)+
        }

        impl std::str::FromStr for $name {
            type Err = ();

            fn from_str(label: &str) -> Result<Self, ()> {
                match label {
                    $(stringify!($variant) => Ok(Self::$variant),)+
                    _ => Err(()),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let label = match self {
                    $(Self::$variant => stringify!($variant),)+
                };

                f.write_str(label)
            }
        }
    };
}

pub(crate) use label_enum;

pub fn parse_enum<T: FromStr>(label: &str, default: T) -> T {
    label.parse().unwrap_or(default)
}

pub fn normalize_fragment(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_was_space = false;

    for c in text.chars() {
        match c {
            '\t' => {}
            ' ' => {
                if !last_was_space {
                    result.push(' ');
                }

                last_was_space = true;
            }
            _ => {
                result.push(c);
                last_was_space = false;
            }
        }
    }

    result
}

pub fn parse_lenient(text: &str) -> anyhow::Result<Value> {
    let value = serde_json::from_str(&strip_trailing_commas(text))?;

    Ok(value)
}

// drops a comma whose next non-whitespace character closes the surrounding
// list or object; string literals are passed through untouched
pub fn strip_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if in_string {
            result.push(c);

            if c == '\\' {
                if let Some(&escaped) = chars.get(i + 1) {
                    result.push(escaped);
                    i += 2;
                    continue;
                }
            } else if c == '"' {
                in_string = false;
            }

            i += 1;
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                result.push(c);
            }
            ',' => {
                let mut j = i + 1;

                while j < chars.len() && chars[j].is_whitespace() {
                    j += 1;
                }

                if !matches!(chars.get(j), Some(']') | Some('}')) {
                    result.push(c);
                }
            }
            _ => result.push(c),
        }

        i += 1;
    }

    result
}

pub fn escape_string(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if (c as u32) < 0x20 => result.push_str(&format!("\\u{:04x}", c as u32)),
            c => result.push(c),
        }
    }

    result
}

pub trait TreeExt {
    fn string_field(&self, key: &str) -> String;
    fn f64_field(&self, key: &str) -> f64;
    fn i64_field(&self, key: &str) -> i64;
    fn bool_field(&self, key: &str) -> bool;
    fn pair_field(&self, key: &str) -> [f64; 2];
}

impl TreeExt for Map<String, Value> {
    fn string_field(&self, key: &str) -> String {
        self.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned()
    }

    fn f64_field(&self, key: &str) -> f64 {
        self.get(key).and_then(Value::as_f64).unwrap_or_default()
    }

    fn i64_field(&self, key: &str) -> i64 {
        let value = match self.get(key) {
            Some(value) => value,
            None => return 0,
        };

        value
            .as_i64()
            .or_else(|| value.as_f64().map(|f| f as i64))
            .unwrap_or_default()
    }

    fn bool_field(&self, key: &str) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or_default()
    }

    fn pair_field(&self, key: &str) -> [f64; 2] {
        match self.get(key) {
            Some(Value::Array(parts)) => [
                parts.first().and_then(Value::as_f64).unwrap_or_default(),
                parts.get(1).and_then(Value::as_f64).unwrap_or_default(),
            ],
            _ => [0.0, 0.0],
        }
    }
}
