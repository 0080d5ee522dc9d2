//! Input validation for cat, review, and list submissions.
//!
//! Every field is checked independently and all failures are collected, so a
//! caller can present the complete list of problems in one pass. Input that
//! passes comes back trimmed and typed; input that fails is never written.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::{
  cat::{CatFields, CatUpdate},
  review::ReviewFields,
};

/// Longest accepted value for the short text fields of a cat or list.
pub const MAX_TEXT_LEN: usize = 50;

/// Longest accepted review body.
pub const MAX_REVIEW_LEN: usize = 2000;

// ─── Errors ──────────────────────────────────────────────────────────────────

/// One violated constraint on one submitted field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field:   &'static str,
  pub message: String,
}

impl FieldError {
  fn new(field: &'static str, message: impl Into<String>) -> Self {
    Self { field, message: message.into() }
  }
}

// ─── Raw input ───────────────────────────────────────────────────────────────

/// Cat fields exactly as a client submitted them.
///
/// Only the allowlisted fields are read; anything else in the request body
/// (an owner id in particular) is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCatFields {
  #[serde(default)]
  pub name:     Option<String>,
  #[serde(default)]
  pub breed:    Option<String>,
  #[serde(default)]
  pub size:     Option<String>,
  /// Any truthy marker is accepted: a non-empty string, `true`, or a
  /// non-zero number.
  #[serde(default, deserialize_with = "truthy_marker")]
  pub friendly: Option<String>,
  #[serde(default)]
  pub coat:     Option<String>,
  /// `None` when the key is absent, `Some(None)` for an explicit `null`.
  #[serde(default, deserialize_with = "present")]
  pub img_url:  Option<Option<String>>,
}

impl From<CatFields> for RawCatFields {
  fn from(f: CatFields) -> Self {
    Self {
      name:     Some(f.name),
      breed:    Some(f.breed),
      size:     Some(f.size),
      friendly: Some(f.friendly),
      coat:     Some(f.coat),
      img_url:  Some(f.img_url),
    }
  }
}

impl From<CatUpdate> for RawCatFields {
  fn from(u: CatUpdate) -> Self {
    let replace = u.replace_img_url;
    let mut raw = Self::from(u.fields);
    if !replace {
      raw.img_url = None;
    }
    raw
  }
}

/// Review content exactly as a client submitted it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReviewFields {
  #[serde(default)]
  pub body:   Option<String>,
  #[serde(default)]
  pub rating: Option<i64>,
}

// ─── Pipeline ────────────────────────────────────────────────────────────────

/// Validate and normalise a cat submission.
pub fn validate_cat(raw: &RawCatFields) -> Result<CatFields, Vec<FieldError>> {
  let mut errors = Vec::new();

  let name = required_text(
    &mut errors,
    "name",
    raw.name.as_deref(),
    "Please provide a name",
    "Name must be 50 characters or less",
  );
  let breed = required_text(
    &mut errors,
    "breed",
    raw.breed.as_deref(),
    "Please provide a breed",
    "Breed must be 50 characters or less",
  );
  let size = required_text(
    &mut errors,
    "size",
    raw.size.as_deref(),
    "Please provide a size",
    "Size must be 50 characters or less",
  );
  // Any non-empty marker counts, whitespace included, and is kept verbatim.
  let friendly = match raw.friendly.as_deref().filter(|v| !v.is_empty()) {
    Some(v) => Some(v.to_owned()),
    None => {
      errors.push(FieldError::new(
        "friendly",
        "Please select an option for friendly",
      ));
      None
    }
  };
  let coat = required_text(
    &mut errors,
    "coat",
    raw.coat.as_deref(),
    "Please provide the color of the cat's coat",
    "Color of coat must be 50 characters or less",
  );
  let img_url = non_blank(raw.img_url.as_ref().and_then(Option::as_deref))
    .map(str::to_owned);

  match (name, breed, size, friendly, coat) {
    (Some(name), Some(breed), Some(size), Some(friendly), Some(coat))
      if errors.is_empty() =>
    {
      Ok(CatFields { name, breed, size, friendly, coat, img_url })
    }
    _ => Err(errors),
  }
}

/// Validate an owner's edit. The rules are those of [`validate_cat`]; a
/// submission without an `imgUrl` key leaves the stored url alone, while an
/// explicit `null` or blank value clears it.
pub fn validate_cat_update(
  raw: &RawCatFields,
) -> Result<CatUpdate, Vec<FieldError>> {
  let fields = validate_cat(raw)?;
  Ok(CatUpdate { fields, replace_img_url: raw.img_url.is_some() })
}

/// Validate a review submission.
pub fn validate_review(
  raw: &RawReviewFields,
) -> Result<ReviewFields, Vec<FieldError>> {
  let mut errors = Vec::new();

  let body = match non_blank(raw.body.as_deref()) {
    None => {
      errors.push(FieldError::new("body", "Please provide a review"));
      None
    }
    Some(v) if v.chars().count() > MAX_REVIEW_LEN => {
      errors.push(FieldError::new(
        "body",
        "Review must be 2000 characters or less",
      ));
      None
    }
    Some(v) => Some(v.to_owned()),
  };

  let rating = match raw.rating {
    None => {
      errors.push(FieldError::new("rating", "Please provide a rating"));
      None
    }
    Some(r @ 1..=5) => u8::try_from(r).ok(),
    Some(_) => {
      errors.push(FieldError::new("rating", "Rating must be between 1 and 5"));
      None
    }
  };

  match (body, rating) {
    (Some(body), Some(rating)) if errors.is_empty() => {
      Ok(ReviewFields { body, rating })
    }
    _ => Err(errors),
  }
}

/// Validate the name of a new cat list.
pub fn validate_list_name(raw: Option<&str>) -> Result<String, Vec<FieldError>> {
  let mut errors = Vec::new();
  required_text(
    &mut errors,
    "name",
    raw,
    "Please provide a name for the list",
    "List name must be 50 characters or less",
  )
  .ok_or(errors)
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn non_blank(value: Option<&str>) -> Option<&str> {
  value.map(str::trim).filter(|v| !v.is_empty())
}

/// A required short text field: present, non-blank, at most
/// [`MAX_TEXT_LEN`] characters. Pushes at most one error.
fn required_text(
  errors: &mut Vec<FieldError>,
  field: &'static str,
  value: Option<&str>,
  missing: &str,
  too_long: &str,
) -> Option<String> {
  match non_blank(value) {
    None => {
      errors.push(FieldError::new(field, missing));
      None
    }
    Some(v) if v.chars().count() > MAX_TEXT_LEN => {
      errors.push(FieldError::new(field, too_long));
      None
    }
    Some(v) => Some(v.to_owned()),
  }
}

/// Wraps whatever is present in `Some`, so that with `#[serde(default)]` a
/// missing key and an explicit `null` stay distinguishable.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  T::deserialize(deserializer).map(Some)
}

/// Deserialise a loosely-typed "was this ticked" value into its textual
/// marker. Falsy values (`false`, `0`, `""`, `null`) become `None`.
fn truthy_marker<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  struct Marker;

  impl<'de> de::Visitor<'de> for Marker {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str("a string, boolean, or number")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
      Ok(v.then(|| "true".to_owned()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
      Ok((v != 0).then(|| v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
      Ok((v != 0).then(|| v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
      Ok((v != 0.0 && !v.is_nan()).then(|| v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
      Ok((!v.is_empty()).then(|| v.to_owned()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> { Ok(None) }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> { Ok(None) }

    fn visit_some<D2>(self, d: D2) -> Result<Self::Value, D2::Error>
    where
      D2: Deserializer<'de>,
    {
      d.deserialize_any(self)
    }
  }

  deserializer.deserialize_any(Marker)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn milo() -> RawCatFields {
    RawCatFields {
      name:     Some("Milo".into()),
      breed:    Some("Tabby".into()),
      size:     Some("Medium".into()),
      friendly: Some("yes".into()),
      coat:     Some("Orange".into()),
      img_url:  None,
    }
  }

  fn fields_of(errors: &[FieldError]) -> Vec<&'static str> {
    errors.iter().map(|e| e.field).collect()
  }

  #[test]
  fn valid_cat_passes_unchanged() {
    let fields = validate_cat(&milo()).unwrap();
    assert_eq!(fields.name, "Milo");
    assert_eq!(fields.breed, "Tabby");
    assert_eq!(fields.size, "Medium");
    assert_eq!(fields.friendly, "yes");
    assert_eq!(fields.coat, "Orange");
    assert_eq!(fields.img_url, None);
  }

  #[test]
  fn values_are_trimmed() {
    let mut raw = milo();
    raw.name = Some("  Milo  ".into());
    raw.img_url = Some(Some("   ".into()));
    let fields = validate_cat(&raw).unwrap();
    assert_eq!(fields.name, "Milo");
    assert_eq!(fields.img_url, None);
  }

  #[test]
  fn name_of_51_chars_is_rejected() {
    let mut raw = milo();
    raw.name = Some("x".repeat(51));
    let errors = validate_cat(&raw).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "name");
    assert!(errors[0].message.contains("50 characters"));
  }

  #[test]
  fn name_of_exactly_50_chars_is_accepted() {
    let mut raw = milo();
    raw.name = Some("x".repeat(50));
    assert!(validate_cat(&raw).is_ok());
  }

  #[test]
  fn length_counts_characters_not_bytes() {
    let mut raw = milo();
    raw.coat = Some("é".repeat(50));
    assert!(validate_cat(&raw).is_ok());
  }

  #[test]
  fn all_errors_are_collected() {
    let errors = validate_cat(&RawCatFields::default()).unwrap_err();
    assert_eq!(
      fields_of(&errors),
      ["name", "breed", "size", "friendly", "coat"]
    );
  }

  #[test]
  fn blank_values_count_as_missing() {
    let mut raw = milo();
    raw.breed = Some("   ".into());
    raw.friendly = Some(String::new());
    let errors = validate_cat(&raw).unwrap_err();
    assert_eq!(fields_of(&errors), ["breed", "friendly"]);
    assert_eq!(errors[0].message, "Please provide a breed");
  }

  #[test]
  fn cat_fields_revalidate_cleanly() {
    let fields = validate_cat(&milo()).unwrap();
    let again = validate_cat(&RawCatFields::from(fields.clone())).unwrap();
    assert_eq!(again, fields);
  }

  #[test]
  fn friendly_accepts_truthy_markers() {
    for body in [
      r#"{"friendly":"yes"}"#,
      r#"{"friendly":"no"}"#,
      r#"{"friendly":true}"#,
      r#"{"friendly":1}"#,
      r#"{"friendly":" "}"#,
    ] {
      let raw: RawCatFields = serde_json::from_str(body).unwrap();
      assert!(raw.friendly.is_some(), "{body}");
    }
  }

  #[test]
  fn whitespace_friendly_marker_is_kept_verbatim() {
    let mut raw = milo();
    raw.friendly = Some(" ".into());
    let fields = validate_cat(&raw).unwrap();
    assert_eq!(fields.friendly, " ");

    raw.friendly = Some(" yes ".into());
    assert_eq!(validate_cat(&raw).unwrap().friendly, " yes ");
  }

  #[test]
  fn img_url_absent_and_null_are_distinct() {
    let absent: RawCatFields = serde_json::from_str(r#"{"name":"Milo"}"#).unwrap();
    let null: RawCatFields =
      serde_json::from_str(r#"{"name":"Milo","imgUrl":null}"#).unwrap();
    let set: RawCatFields =
      serde_json::from_str(r#"{"name":"Milo","imgUrl":"a.png"}"#).unwrap();
    assert_eq!(absent.img_url, None);
    assert_eq!(null.img_url, Some(None));
    assert_eq!(set.img_url, Some(Some("a.png".into())));
  }

  #[test]
  fn update_keeps_img_url_only_when_absent() {
    let mut raw = milo();
    assert!(!validate_cat_update(&raw).unwrap().replace_img_url);

    raw.img_url = Some(None);
    let update = validate_cat_update(&raw).unwrap();
    assert!(update.replace_img_url);
    assert_eq!(update.fields.img_url, None);

    raw.img_url = Some(Some(" b.png ".into()));
    let update = validate_cat_update(&raw).unwrap();
    assert_eq!(update.fields.img_url.as_deref(), Some("b.png"));
  }

  #[test]
  fn cat_update_revalidates_cleanly() {
    let update = CatUpdate {
      fields:          validate_cat(&milo()).unwrap(),
      replace_img_url: false,
    };
    let again = validate_cat_update(&RawCatFields::from(update.clone())).unwrap();
    assert_eq!(again, update);
  }

  #[test]
  fn friendly_rejects_falsy_markers() {
    for body in [
      r#"{"friendly":false}"#,
      r#"{"friendly":0}"#,
      r#"{"friendly":""}"#,
      r#"{"friendly":null}"#,
      r#"{}"#,
    ] {
      let raw: RawCatFields = serde_json::from_str(body).unwrap();
      assert!(raw.friendly.is_none(), "{body}");
    }
  }

  #[test]
  fn owner_id_in_body_is_ignored() {
    let raw: RawCatFields =
      serde_json::from_str(r#"{"name":"Milo","userId":99}"#).unwrap();
    assert_eq!(raw.name.as_deref(), Some("Milo"));
  }

  #[test]
  fn review_requires_body_and_rating() {
    let errors = validate_review(&RawReviewFields::default()).unwrap_err();
    assert_eq!(fields_of(&errors), ["body", "rating"]);
  }

  #[test]
  fn review_rating_out_of_range() {
    let raw = RawReviewFields { body: Some("Purrs a lot".into()), rating: Some(6) };
    let errors = validate_review(&raw).unwrap_err();
    assert_eq!(fields_of(&errors), ["rating"]);
  }

  #[test]
  fn review_passes() {
    let raw = RawReviewFields { body: Some(" Purrs a lot ".into()), rating: Some(5) };
    let fields = validate_review(&raw).unwrap();
    assert_eq!(fields, ReviewFields { body: "Purrs a lot".into(), rating: 5 });
  }

  #[test]
  fn list_name_rules() {
    assert_eq!(validate_list_name(Some(" Favourites ")).unwrap(), "Favourites");
    assert_eq!(validate_list_name(None).unwrap_err().len(), 1);
    let long = "l".repeat(51);
    let errors = validate_list_name(Some(&long)).unwrap_err();
    assert!(errors[0].message.contains("50 characters"));
  }
}
