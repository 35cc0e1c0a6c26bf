use crate::Properties;
use serde::Deserialize;
use serde_yaml::Value;
use tracing::debug;

const PROFILES_KEY: &str = "spring.profiles";

/// Flatten a (possibly multi-document) `application.yml` into properties.
///
/// Without an active profile the first document is used. With one, the
/// document whose `spring.profiles` equals it is used, falling back to the
/// first document when no document matches.
pub fn properties_from_yaml(
    content: &str,
    active_profile: Option<&str>,
) -> Result<Properties, serde_yaml::Error> {
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(content) {
        let value = Value::deserialize(document)?;
        if !value.is_null() {
            documents.push(flatten(&value));
        }
    }

    let selected = match active_profile {
        Some(profile) => {
            let position = documents
                .iter()
                .position(|doc| doc.get(PROFILES_KEY) == Some(profile));
            if position.is_none() {
                debug!(profile, "No YAML document for profile, using the default document");
            }
            position.unwrap_or(0)
        }
        None => 0,
    };

    Ok(if selected < documents.len() {
        documents.swap_remove(selected)
    } else {
        Properties::new()
    })
}

/// Flatten a YAML tree into dotted keys; sequence items become `key[i]`
pub fn flatten(value: &Value) -> Properties {
    let mut props = Properties::new();
    flatten_into(&mut props, String::new(), value);
    props
}

fn flatten_into(props: &mut Properties, prefix: String, value: &Value) {
    match value {
        Value::Mapping(mapping) => {
            for (key, child) in mapping {
                let Some(key) = scalar_to_string(key) else {
                    continue;
                };
                let path = if prefix.is_empty() {
                    key
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(props, path, child);
            }
        }
        Value::Sequence(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(props, format!("{}[{}]", prefix, index), child);
            }
        }
        Value::Tagged(tagged) => flatten_into(props, prefix, &tagged.value),
        scalar => {
            if !prefix.is_empty() {
                props.insert(prefix, scalar_to_string(scalar).unwrap_or_default());
            }
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
