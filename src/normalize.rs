use serde_json::Value;

use crate::model::Recipe;

// Known field spellings per canonical field, highest priority first.
// TheMealDB uses the str* names; already-normalized records use the short ones.
const ID_ALIASES: &[&str] = &["id", "idMeal"];
const TITLE_ALIASES: &[&str] = &["title", "name", "strMeal"];
const THUMB_ALIASES: &[&str] = &["thumb", "image", "strMealThumb"];
const SOURCE_ALIASES: &[&str] = &["source", "link", "strSource", "strYoutube"];

/// First non-empty string value among the aliased keys, or `""`.
///
/// Null, missing, non-string and empty values all fall through to the next
/// alias, so a record with `"strSource": null` still picks up `strYoutube`.
fn resolve_field(record: &Value, aliases: &[&str]) -> String {
    aliases
        .iter()
        .filter_map(|key| record.get(key))
        .filter_map(Value::as_str)
        .find(|value| !value.is_empty())
        .map(str::to_owned)
        .unwrap_or_default()
}

/// Map a recipe-like record from any known source shape into the canonical
/// `Recipe`. Never fails; fields with no usable alias become empty strings.
pub fn normalize_record(record: &Value) -> Recipe {
    Recipe {
        id: resolve_field(record, ID_ALIASES),
        title: resolve_field(record, TITLE_ALIASES),
        thumb: resolve_field(record, THUMB_ALIASES),
        source: resolve_field(record, SOURCE_ALIASES),
    }
}
