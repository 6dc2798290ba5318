// core/src/models/amount.rs

// The backend keeps prices in float columns, so amounts arrive either as
// `1000` or `1000.0`. Both are accepted and rounded to whole units.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
  Whole(i64),
  Fractional(f64),
}

impl RawAmount {
  fn into_whole(self) -> i64 {
    match self {
      RawAmount::Whole(value) => value,
      RawAmount::Fractional(value) => value.round() as i64,
    }
  }
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
  D: Deserializer<'de>,
{
  RawAmount::deserialize(deserializer).map(RawAmount::into_whole)
}

pub(crate) fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
  D: Deserializer<'de>,
{
  Option::<RawAmount>::deserialize(deserializer).map(|raw| raw.map(RawAmount::into_whole))
}
