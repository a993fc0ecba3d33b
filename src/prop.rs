use std::collections::BTreeMap;

/// A value an actor property can hold.
///
/// Only [`Prop::Number`] is tweened over time; every other variant is applied
/// as an atomic transition regardless of the requested duration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Prop {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl Prop {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) | Self::Flag(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) | Self::Flag(_) => None,
        }
    }
}

impl From<f64> for Prop {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for Prop {
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}

impl From<i32> for Prop {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<&str> for Prop {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Prop {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<bool> for Prop {
    fn from(v: bool) -> Self {
        Self::Flag(v)
    }
}

/// Target property set for one animation step, keyed by property name.
pub type Targets = BTreeMap<String, Prop>;

/// Build a [`Targets`] map from key/value pairs.
pub fn targets<K, V, I>(pairs: I) -> Targets
where
    K: Into<String>,
    V: Into<Prop>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Build a single-entry [`Targets`] map.
pub fn target(key: impl Into<String>, value: impl Into<Prop>) -> Targets {
    let mut t = Targets::new();
    t.insert(key.into(), value.into());
    t
}
