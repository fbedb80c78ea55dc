//! Body decoding for the configured response format

use scrobblekit_shared_config::ResponseFormat;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{LastfmError, LastfmResult};
use crate::wrappers::{ErrorResponse, XmlStatus};

/// List containers and their entry key
///
/// Last.fm builds its JSON from the XML document, so a list holding a single
/// entry arrives as a bare object instead of an array.
const JSON_LISTS: &[(&str, &str)] = &[
    ("toptags", "tag"),
    ("tags", "tag"),
    ("topalbums", "album"),
    ("toptracks", "track"),
    ("similarartists", "artist"),
    ("similar", "artist"),
];

/// Decode a success body into its envelope type
pub(crate) fn decode<W: DeserializeOwned>(format: ResponseFormat, body: &str) -> LastfmResult<W> {
    match format {
        ResponseFormat::Json => {
            let mut value: Value = serde_json::from_str(body)?;
            wrap_single_entries(&mut value);
            Ok(serde_json::from_value(value)?)
        }
        ResponseFormat::Xml => Ok(quick_xml::de::from_str(body)?),
    }
}

/// Turn every lone list entry into a one-element array
fn wrap_single_entries(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                let entry_key = JSON_LISTS
                    .iter()
                    .find(|(container, _)| *container == key.as_str())
                    .map(|(_, entry)| *entry);

                if let (Some(entry_key), Value::Object(list)) = (entry_key, &mut *child) {
                    if let Some(entry) = list.get_mut(entry_key) {
                        if entry.is_object() {
                            let single = entry.take();
                            *entry = Value::Array(vec![single]);
                        }
                    }
                }

                wrap_single_entries(child);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(wrap_single_entries),
        _ => {}
    }
}

/// Extract a Last.fm error envelope from a body, if it is one
pub(crate) fn api_error(format: ResponseFormat, body: &str) -> Option<LastfmError> {
    match format {
        ResponseFormat::Json => {
            let error = serde_json::from_str::<ErrorResponse>(body).ok()?;
            Some(LastfmError::Api {
                code: error.error,
                message: error.message,
            })
        }
        ResponseFormat::Xml => {
            let status = quick_xml::de::from_str::<XmlStatus>(body).ok()?;
            if status.status != "failed" {
                return None;
            }
            let error = status.error?;
            Some(LastfmError::Api {
                code: error.code,
                message: error.message.trim().to_string(),
            })
        }
    }
}
