//! Request-body extractors.

use axum::extract::FromRequest;
use roster_core::subordinate::SubordinateFields;
use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// `axum::Json` whose rejections are reported as [`ApiError`] JSON bodies.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Body of `POST /subordinates` and `PATCH /subordinates/{id}`.
///
/// Clients may wrap the fields as `{"subordinate": {...}}` or send them bare.
/// When a `subordinate` key is present only its value is read; the bare form
/// is never used as a fallback for a malformed wrapped body.
#[derive(Debug)]
pub struct SubordinateBody(SubordinateFields);

impl SubordinateBody {
  pub fn into_fields(self) -> SubordinateFields { self.0 }
}

impl<'de> Deserialize<'de> for SubordinateBody {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let mut object = Map::<String, Value>::deserialize(deserializer)?;
    let fields = match object.remove("subordinate") {
      Some(Value::Object(inner)) => inner,
      Some(_) => return Err(D::Error::custom("subordinate must be an object")),
      None => object,
    };
    parse_fields(&fields).map(SubordinateBody).map_err(D::Error::custom)
  }
}

/// Read the profile fields, naming the first one that is not a string.
///
/// Unknown keys (including `owner`) are ignored.
fn parse_fields(object: &Map<String, Value>) -> Result<SubordinateFields, String> {
  let text = |name: &str| match object.get(name) {
    None | Some(Value::Null) => Ok(None),
    Some(Value::String(s)) => Ok(Some(s.clone())),
    Some(_) => Err(format!("{name} must be a string")),
  };

  Ok(SubordinateFields {
    first_name: text("first_name")?,
    last_name:  text("last_name")?,
    address:    text("address")?,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn wrapped_and_bare_bodies_agree() {
    let wrapped: SubordinateBody =
      serde_json::from_str(r#"{"subordinate":{"first_name":"Ada","address":""}}"#).unwrap();
    let bare: SubordinateBody =
      serde_json::from_str(r#"{"first_name":"Ada","address":""}"#).unwrap();

    for body in [wrapped, bare] {
      let f = body.into_fields();
      assert_eq!(f.first_name.as_deref(), Some("Ada"));
      assert_eq!(f.last_name, None);
      assert_eq!(f.address.as_deref(), Some(""));
    }
  }

  #[test]
  fn mistyped_wrapped_field_is_an_error() {
    let err = serde_json::from_str::<SubordinateBody>(
      r#"{"subordinate":{"first_name":42,"last_name":"King"}}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("first_name must be a string"), "{err}");
  }

  #[test]
  fn mistyped_bare_field_is_an_error() {
    let err = serde_json::from_str::<SubordinateBody>(r#"{"address":["a","b"]}"#).unwrap_err();
    assert!(err.to_string().contains("address must be a string"), "{err}");
  }

  #[test]
  fn non_object_wrapper_is_an_error() {
    let err = serde_json::from_str::<SubordinateBody>(r#"{"subordinate":"Ada"}"#).unwrap_err();
    assert!(err.to_string().contains("subordinate must be an object"), "{err}");
  }

  #[test]
  fn null_fields_and_owner_are_ignored() {
    let body: SubordinateBody =
      serde_json::from_str(r#"{"first_name":null,"owner":"someone"}"#).unwrap();
    let f = body.into_fields();
    assert_eq!(f.first_name, None);
    assert_eq!(f.last_name, None);
  }
}
