//! Locale handling: label selection and the fixed UI strings.
//!
//! The tour player reports its locale as a short identifier; the catalog
//! data carries Vietnamese text in the primary fields and English in the
//! `_en` fields. Nothing here fetches or caches anything; the frontend
//! polls the player and re-renders on change.

pub const DEFAULT_LOCALE: &str = "vi";

/// The player reports English as either bare `en` or `en-US`.
pub fn is_english(locale: &str) -> bool {
    locale == "en" || locale == "en-US"
}

/// Picks the alternate-language text when the locale asks for it and the
/// record actually has one; the primary text is the fallback.
pub fn localized<'a>(locale: &str, primary: &'a str, alternate: Option<&'a str>) -> &'a str {
    if is_english(locale) {
        if let Some(alt) = alternate {
            if !alt.is_empty() {
                return alt;
            }
        }
    }
    primary
}

/// A primary/alternate text pair configured per widget (placeholders,
/// empty-state messages).
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizedText {
    pub primary: String,
    pub alternate: String,
}

impl LocalizedText {
    pub fn new(primary: impl Into<String>, alternate: impl Into<String>) -> Self {
        Self { primary: primary.into(), alternate: alternate.into() }
    }

    pub fn pick(&self, locale: &str) -> &str {
        if is_english(locale) { &self.alternate } else { &self.primary }
    }
}

/// Fixed strings shared by every widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiText {
    AllCategories,
    Loading,
    LoadFailed,
    ErrorTitle,
    NoInformationTitle,
    NoInformation,
    NoDescription,
    NoImages,
    ImagesLabel,
    Untitled,
    View3d,
    Confirm3d,
}

pub fn ui_text(locale: &str, key: UiText) -> &'static str {
    let english = is_english(locale);
    match key {
        UiText::AllCategories => if english { "All" } else { "Tất cả" },
        UiText::Loading => if english { "Loading information" } else { "Đang tải thông tin" },
        UiText::LoadFailed => if english { "Failed to load information" } else { "Không thể tải thông tin" },
        UiText::ErrorTitle => if english { "Error" } else { "Lỗi" },
        UiText::NoInformationTitle => if english { "No Information" } else { "Không có thông tin" },
        UiText::NoInformation => {
            if english { "No information available for this item" } else { "Không có thông tin cho mục này" }
        }
        UiText::NoDescription => if english { "No description available" } else { "Không có mô tả" },
        UiText::NoImages => if english { "No images available" } else { "Không có hình ảnh" },
        UiText::ImagesLabel => if english { "Images" } else { "Hình ảnh" },
        UiText::Untitled => if english { "Untitled" } else { "Chưa có tên" },
        UiText::View3d => if english { "View 3D model" } else { "Xem mô hình 3D" },
        UiText::Confirm3d => {
            if english { "Do you want to view the 3D model?" } else { "Bạn có muốn xem 3D không?" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_variants() {
        assert!(is_english("en"));
        assert!(is_english("en-US"));
        assert!(!is_english("vi"));
        assert!(!is_english("en-GB"));
    }

    #[test]
    fn localized_falls_back_to_primary() {
        assert_eq!(localized("en", "Tháp", Some("Tower")), "Tower");
        assert_eq!(localized("en", "Tháp", None), "Tháp");
        assert_eq!(localized("en", "Tháp", Some("")), "Tháp");
        assert_eq!(localized("vi", "Tháp", Some("Tower")), "Tháp");
    }

    #[test]
    fn localized_text_picks_by_locale() {
        let text = LocalizedText::new("Không có tháp", "No towers found");
        assert_eq!(text.pick("vi"), "Không có tháp");
        assert_eq!(text.pick("en-US"), "No towers found");
    }
}
