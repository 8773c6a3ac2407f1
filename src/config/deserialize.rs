// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Handles ports given as numbers or strings, and one-or-many deploy entries.

use serde::Deserialize;
use serde_yaml::Value;

use super::DeployConfig;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PortEntry {
    Number(i64),
    Text(String),
}

/// Accepts `port: 2222` and `port: "2222"`. Range checking happens later, when
/// the transport is resolved, so out-of-range numbers are kept as-is here.
pub fn deserialize_port<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let entry: Option<PortEntry> = Option::deserialize(deserializer)?;
    match entry {
        None => Ok(None),
        Some(PortEntry::Number(n)) => Ok(Some(n)),
        Some(PortEntry::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid port: {s}"))),
    }
}

/// Accepts a single mapping or a list of them. The node's shape picks the
/// target type, so a bad field reports its own error.
pub fn deserialize_deploy_entries<'de, D>(deserializer: D) -> Result<Vec<DeployConfig>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<Value> = Option::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value @ Value::Sequence(_)) => {
            Vec::<DeployConfig>::deserialize(value).map_err(D::Error::custom)
        }
        Some(value @ Value::Mapping(_)) => DeployConfig::deserialize(value)
            .map(|entry| vec![entry])
            .map_err(D::Error::custom),
        Some(_) => Err(D::Error::custom("deploy must be a mapping or a list of mappings")),
    }
}
