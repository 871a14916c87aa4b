use std::ops::Deref;

use serde::Deserialize;

/// A duration written as whitespace separated parts like `"1d 2h 3m 4s"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .split_whitespace()
            .try_fold(0u64, |total, part| Some(total + parse_seconds(part)?))
            .map(|seconds| Self(std::time::Duration::from_secs(seconds)))
            .ok_or_else(|| serde::de::Error::custom("Invalid duration"))
    }
}

fn parse_seconds(part: &str) -> Option<u64> {
    let unit_pos = part.find(|c: char| !c.is_ascii_digit())?;
    let (value, unit) = part.split_at(unit_pos);
    let factor = match unit {
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => return None,
    };
    value.parse::<u64>().ok()?.checked_mul(factor)
}
