//! PATCH bodies need three states per nullable field: absent (leave it),
//! `null` (clear it), or a value (set it).

use serde::{Deserialize, Deserializer};

/// Deserialize into `Option<Option<T>>`. Pair with `#[serde(default)]` so a
/// missing key stays `None` while an explicit `null` becomes `Some(None)`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "nullable")]
        note: Option<Option<String>>,
    }

    fn parse(json: &str) -> Option<Option<String>> {
        serde_json::from_str::<Patch>(json).unwrap().note
    }

    #[test]
    fn distinguishes_missing_null_and_value() {
        assert_eq!(parse("{}"), None);
        assert_eq!(parse(r#"{ "note": null }"#), Some(None));
        assert_eq!(parse(r#"{ "note": "hi" }"#), Some(Some("hi".to_string())));
    }

    #[test]
    fn wrong_type_is_still_an_error() {
        assert!(serde_json::from_str::<Patch>(r#"{ "note": 5 }"#).is_err());
    }
}
