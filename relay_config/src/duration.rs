use std::ops::Deref;

use serde::Deserialize;

/// A duration written as whitespace separated parts like `"1d 2h 3m 4s"`.
/// A part without a unit is read as seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl Duration {
    fn parse(s: &str) -> Option<Self> {
        s.split_whitespace()
            .try_fold(std::time::Duration::ZERO, |acc, part| {
                let (value, unit) =
                    part.split_at(part.find(|c: char| !c.is_ascii_digit()).unwrap_or(part.len()));
                let value = value.parse::<u64>().ok()?;
                let factor = match unit {
                    "" | "s" => 1,
                    "m" => 60,
                    "h" => 60 * 60,
                    "d" => 24 * 60 * 60,
                    _ => return None,
                };
                Some(acc + std::time::Duration::from_secs(value.checked_mul(factor)?))
            })
            .map(Self)
    }
}

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
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid duration: {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration() {
        for (input, expected) in [
            ("13s", Some(13)),
            ("90", Some(90)),
            ("42m", Some(42 * 60)),
            ("7h", Some(7 * 60 * 60)),
            ("20d", Some(20 * 24 * 60 * 60)),
            ("", Some(0)),
            ("1d 2h 3m 4s", Some(((24 + 2) * 60 + 3) * 60 + 4)),
            ("xyz", None),
            ("7dd", None),
            ("s", None),
        ] {
            let value = serde_json::Value::String(input.into());
            let output = serde_json::from_value::<Duration>(value)
                .ok()
                .map(|x| x.0.as_secs());
            assert_eq!(output, expected, "{input:?}");
        }
    }
}
