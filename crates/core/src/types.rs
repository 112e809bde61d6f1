use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Order assigned to curated items that carry no explicit `order`.
pub const DEFAULT_ORDER: f64 = 100.0;

/// Fallback title for feed entries without one.
pub const FEED_FALLBACK_TITLE: &str = "Kein Titel";

/// Fallback link for feed entries and curated links without one.
pub const FALLBACK_LINK: &str = "#";

/// The about section (single object, not a collection)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    pub title: String,
    pub subtitle: String,
    pub image: String,
    pub image_alt: String,
    /// Markdown body rendered to HTML
    pub content: String,
    pub excerpt: String,
    pub cta_text: String,
    pub cta_link: String,
}

/// A client or audience testimonial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub quote: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub order: f64,
}

/// Press coverage entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PressArticle {
    pub slug: String,
    pub title: String,
    /// Serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    pub publication: String,
    pub link: String,
    pub image: String,
    pub excerpt: String,
}

/// Logo shown in the partner/client strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerLogo {
    pub name: String,
    pub logo: String,
    pub url: String,
    pub order: f64,
}

/// Per-page SEO metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSeo {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub og_image: String,
    pub canonical: String,
}

/// Follower/subscriber counter for one platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialStat {
    pub platform: String,
    pub label: String,
    pub value: f64,
    pub suffix: String,
    pub url: String,
    pub order: f64,
}

/// Item of an external news feed, reshaped for the frontend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub link: String,
    /// Human-readable German publication date
    pub date: String,
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_testimonial_omits_absent_optionals() {
        let t = Testimonial {
            author: "Ada".to_string(),
            position: None,
            company: None,
            quote: "Great talk".to_string(),
            image: Some("/img/ada.jpg".to_string()),
            order: DEFAULT_ORDER,
        };

        let json = serde_json::to_value(&t).unwrap();
        assert!(json.get("position").is_none());
        assert!(json.get("company").is_none());
        assert_eq!(json["image"], "/img/ada.jpg");
        assert_eq!(json["order"], 100.0);
    }

    #[test]
    fn test_press_date_serializes_as_iso_day() {
        let article = PressArticle {
            slug: "interview".to_string(),
            title: "Interview".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            publication: "Daily".to_string(),
            link: FALLBACK_LINK.to_string(),
            image: "/images/press.jpg".to_string(),
            excerpt: String::new(),
        };

        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["date"], "2024-03-05");
    }

    #[test]
    fn test_camel_case_keys() {
        let seo = PageSeo {
            title: "Home".to_string(),
            description: "Welcome".to_string(),
            keywords: vec![],
            og_image: "/og.jpg".to_string(),
            canonical: "https://example.com/".to_string(),
        };

        let json = serde_json::to_value(&seo).unwrap();
        assert_eq!(json["ogImage"], "/og.jpg");
    }
}
