//! Catalog data model shared by the engine and the frontend.
//!
//! The JSON files exported for the tour are not uniform: item ids arrive as
//! numbers or strings depending on the export, and the `photo` field is a
//! list of plain URLs in some datasets and a list of `{ thumb, original }`
//! objects in others. Both shapes normalize here so the rest of the code
//! only ever sees `String` ids and a flat list of image URLs.

use serde::{Deserialize, Deserializer};

/// One record of a catalog dataset (an artifact, a tower or a
/// reconstruction workspace).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogItem {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    /// English name; primary `name` is used as fallback.
    #[serde(rename = "name_en", default)]
    pub name_alt: Option<String>,
    #[serde(rename = "cate_id", default, deserialize_with = "opt_id_string")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    /// Flattened image URLs; the first entry is the thumbnail source.
    #[serde(rename = "photo", default, deserialize_with = "photo_urls")]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "description_en", default)]
    pub description_alt: Option<String>,
    #[serde(rename = "link_3d", default)]
    pub link_3d: Option<String>,
}

/// A catalog category, loaded independently of the items.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(rename = "nameEn", default)]
    pub name_alt: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Number(serde_json::Number),
}

impl IdRepr {
    fn into_string(self) -> String {
        match self {
            IdRepr::Text(s) => s,
            IdRepr::Number(n) => n.to_string(),
        }
    }
}

fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    IdRepr::deserialize(deserializer).map(IdRepr::into_string)
}

fn opt_id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<IdRepr>::deserialize(deserializer)?.map(IdRepr::into_string))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PhotoRepr {
    Url(String),
    Sized {
        #[serde(default)]
        thumb: Option<String>,
        #[serde(default)]
        original: Option<String>,
    },
}

impl PhotoRepr {
    fn into_url(self) -> Option<String> {
        match self {
            PhotoRepr::Url(url) => Some(url),
            PhotoRepr::Sized { thumb, original } => thumb.or(original),
        }
    }
}

fn photo_urls<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let photos = Vec::<PhotoRepr>::deserialize(deserializer)?;
    Ok(photos.into_iter().filter_map(PhotoRepr::into_url).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tower_style_record() {
        let item: CatalogItem = serde_json::from_str(
            r#"{
                "id": 7,
                "name": "Tháp B1",
                "name_en": "Tower B1",
                "cate_id": 2,
                "code": "B1",
                "photo": ["img/b1.jpg", "img/b1-side.jpg"]
            }"#,
        )
        .unwrap();
        assert_eq!(item.id, "7");
        assert_eq!(item.category_id.as_deref(), Some("2"));
        assert_eq!(item.images, vec!["img/b1.jpg", "img/b1-side.jpg"]);
        assert_eq!(item.name_alt.as_deref(), Some("Tower B1"));
        assert!(item.description.is_none());
    }

    #[test]
    fn parses_asset_style_record_with_sized_photos() {
        let item: CatalogItem = serde_json::from_str(
            r#"{
                "id": "42",
                "name": "Đài thờ",
                "photo": [
                    {"thumb": "thumb/42.jpg", "original": "full/42.jpg"},
                    {"original": "full/42b.jpg"}
                ],
                "description": "Mô tả",
                "link_3d": "https://example.com/3d/42"
            }"#,
        )
        .unwrap();
        assert_eq!(item.id, "42");
        assert_eq!(item.images, vec!["thumb/42.jpg", "full/42b.jpg"]);
        assert_eq!(item.link_3d.as_deref(), Some("https://example.com/3d/42"));
        assert!(item.category_id.is_none());
    }

    #[test]
    fn parses_category_with_camel_case_english_name() {
        let category: Category =
            serde_json::from_str(r#"{"id": 1, "name": "Nhóm A", "nameEn": "Group A"}"#).unwrap();
        assert_eq!(category.id, "1");
        assert_eq!(category.name_alt.as_deref(), Some("Group A"));
    }
}
