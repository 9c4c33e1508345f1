//! Line-oriented wall and settings text formats
//!
//! Walls: one `x,y,height,width` integer quadruple per line.
//! Settings: `key: v1,v2,...` integer lists, one key per line.
//!
//! Blank lines are ignored. Malformed lines are logged and skipped.

use std::collections::BTreeMap;

use stalker_math::Rect;

/// Parsed value of a settings line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    /// Single integer
    Scalar(i64),
    /// Two or more integers
    List(Vec<i64>),
}

impl SettingValue {
    pub fn as_scalar(&self) -> Option<i64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::List(_) => None,
        }
    }

    /// Values as a slice, scalars included
    pub fn values(&self) -> &[i64] {
        match self {
            Self::Scalar(v) => std::slice::from_ref(v),
            Self::List(values) => values,
        }
    }
}

/// Settings keyed by name
pub type RawSettings = BTreeMap<String, SettingValue>;

fn parse_ints(text: &str) -> Option<Vec<i64>> {
    text.split(',')
        .map(|part| part.trim().parse::<i64>().ok())
        .collect()
}

/// Parse a wall list
pub fn parse_walls(text: &str) -> Vec<Rect> {
    let mut walls = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_ints(line).as_deref() {
            Some(&[x, y, height, width]) if width > 0 && height > 0 => {
                walls.push(Rect::new(x as f32, y as f32, width as f32, height as f32));
            }
            _ => log::warn!("skipping malformed wall on line {}: {line:?}", line_no + 1),
        }
    }
    walls
}

/// Parse a settings file
pub fn parse_settings(text: &str) -> RawSettings {
    let mut settings = RawSettings::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parsed = line.split_once(':').and_then(|(key, values)| {
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            let mut values = parse_ints(values)?;
            let value = if values.len() == 1 {
                SettingValue::Scalar(values.remove(0))
            } else {
                SettingValue::List(values)
            };
            Some((key.to_string(), value))
        });

        match parsed {
            Some((key, value)) => {
                settings.insert(key, value);
            }
            None => log::warn!("skipping malformed setting on line {}: {line:?}", line_no + 1),
        }
    }
    settings
}
