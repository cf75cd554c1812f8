use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

/// Closed classification vocabulary shared with the report forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Education,
    Cars,
    Personal,
    Animals,
    People,
    WomenClothing,
    Accessories,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Education,
        Category::Cars,
        Category::Personal,
        Category::Animals,
        Category::People,
        Category::WomenClothing,
        Category::Accessories,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Education => "education",
            Category::Cars => "cars",
            Category::Personal => "personal",
            Category::Animals => "animals",
            Category::People => "people",
            Category::WomenClothing => "women-clothing",
            Category::Accessories => "accessories",
        }
    }

    /// Display label used by the category picker.
    pub fn label(self) -> &'static str {
        match self {
            Category::Education => "Education",
            Category::Cars => "Cars",
            Category::Personal => "Personal Things",
            Category::Animals => "Animals",
            Category::People => "People",
            Category::WomenClothing => "Women Clothing",
            Category::Accessories => "Accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| UnknownCategory(needle.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Selects the collection an item lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Lost,
    Found,
}

impl ItemKind {
    pub fn table(self) -> &'static str {
        match self {
            ItemKind::Lost => "lost_items",
            ItemKind::Found => "found_items",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Stored records. Category is raw text; rows written by older clients may
// carry blank names or categories outside the vocabulary.
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LostItemRecord {
    pub id: Uuid,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub last_seen_location: Option<String>,
    pub category: Option<String>,
    pub date: String,
    pub image_uri: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoundItemRecord {
    pub id: Uuid,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub date: String,
    pub image_uri: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Validated domain items. Only these reach the scorer.
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LostItem {
    pub id: Uuid,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub last_seen_location: Option<String>,
    pub category: Category,
    pub date: String,
    pub image_uri: Option<String>,
    pub location_coords: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoundItem {
    pub id: Uuid,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Category,
    pub date: String,
    pub image_uri: Option<String>,
    pub location_coords: Option<Coordinates>,
}

impl LostItem {
    /// Returns `None` when the record lacks a usable name or category.
    pub fn from_record(record: LostItemRecord) -> Option<Self> {
        let name = required_name(&record.name)?;
        let category = record.category.as_deref()?.parse().ok()?;
        Some(LostItem {
            id: record.id,
            owner_id: record.owner_id,
            name,
            description: record.description,
            last_seen_location: record.last_seen_location,
            category,
            date: record.date,
            image_uri: record.image_uri,
            location_coords: coords(record.latitude, record.longitude),
        })
    }
}

impl FoundItem {
    /// Returns `None` when the record lacks a usable name or category.
    pub fn from_record(record: FoundItemRecord) -> Option<Self> {
        let name = required_name(&record.name)?;
        let category = record.category.as_deref()?.parse().ok()?;
        Some(FoundItem {
            id: record.id,
            owner_id: record.owner_id,
            name,
            description: record.description,
            location: record.location,
            category,
            date: record.date,
            image_uri: record.image_uri,
            location_coords: coords(record.latitude, record.longitude),
        })
    }
}

fn required_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn coords(latitude: Option<f64>, longitude: Option<f64>) -> Option<Coordinates> {
    Some(Coordinates {
        latitude: latitude?,
        longitude: longitude?,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Report payloads
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewLostItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub last_seen_location: Option<String>,
    pub category: Option<Category>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub image_uri: Option<String>,
    #[serde(default)]
    pub location_coords: Option<Coordinates>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewFoundItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub category: Option<Category>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub image_uri: Option<String>,
    #[serde(default)]
    pub location_coords: Option<Coordinates>,
}

/// A report payload that passed validation; every text field is trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedReport {
    pub name: String,
    pub description: Option<String>,
    pub place: Option<String>,
    pub category: Category,
    pub date: String,
    pub image_uri: Option<String>,
    pub location_coords: Option<Coordinates>,
}

impl NewLostItem {
    pub fn validate(&self, now: DateTime<Utc>) -> Result<ValidatedReport, String> {
        ReportFields {
            name: &self.name,
            description: self.description.as_deref(),
            place: self.last_seen_location.as_deref(),
            category: self.category,
            date: self.date.as_deref(),
            image_uri: self.image_uri.as_deref(),
            location_coords: self.location_coords,
        }
        .validate(now)
    }
}

impl NewFoundItem {
    pub fn validate(&self, now: DateTime<Utc>) -> Result<ValidatedReport, String> {
        ReportFields {
            name: &self.name,
            description: self.description.as_deref(),
            place: self.location.as_deref(),
            category: self.category,
            date: self.date.as_deref(),
            image_uri: self.image_uri.as_deref(),
            location_coords: self.location_coords,
        }
        .validate(now)
    }
}

/// Borrowed view over either report payload. `place` is the last-seen
/// location for lost items and the found location for found items.
struct ReportFields<'a> {
    name: &'a str,
    description: Option<&'a str>,
    place: Option<&'a str>,
    category: Option<Category>,
    date: Option<&'a str>,
    image_uri: Option<&'a str>,
    location_coords: Option<Coordinates>,
}

impl ReportFields<'_> {
    fn validate(self, now: DateTime<Utc>) -> Result<ValidatedReport, String> {
        let name = required_name(self.name).ok_or_else(|| "Please enter item name".to_string())?;
        let category = self
            .category
            .ok_or_else(|| "Please select a category".to_string())?;

        Ok(ValidatedReport {
            name,
            description: trimmed(self.description),
            place: trimmed(self.place),
            category,
            // Creation-time snapshot, never re-derived later.
            date: trimmed(self.date).unwrap_or_else(|| report_date(now)),
            image_uri: trimmed(self.image_uri),
            location_coords: self.location_coords,
        })
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Human-readable report date, e.g. "Oct 16, 2026".
pub fn report_date(now: DateTime<Utc>) -> String {
    now.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn lost_record(name: &str, category: Option<&str>) -> LostItemRecord {
        LostItemRecord {
            id: Uuid::new_v4(),
            owner_id: "alice".to_string(),
            name: name.to_string(),
            description: None,
            last_seen_location: Some("Main Street".to_string()),
            category: category.map(str::to_string),
            date: "Oct 1, 2026".to_string(),
            image_uri: None,
            latitude: Some(31.95),
            longitude: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_category_wire_names_match_vocabulary() {
        let json = serde_json::to_string(&Category::WomenClothing).unwrap();
        assert_eq!(json, "\"women-clothing\"");
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        let err = "electronics".parse::<Category>().unwrap_err();
        assert_eq!(err, UnknownCategory("electronics".to_string()));
        assert_eq!(err.to_string(), "unknown category 'electronics'");
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_from_record_trims_name_and_parses_category() {
        let item = LostItem::from_record(lost_record("  black wallet ", Some("personal"))).unwrap();
        assert_eq!(item.name, "black wallet");
        assert_eq!(item.category, Category::Personal);
        // Only one half of the coordinate pair present.
        assert!(item.location_coords.is_none());
    }

    #[test]
    fn test_from_record_excludes_malformed() {
        assert!(LostItem::from_record(lost_record("   ", Some("personal"))).is_none());
        assert!(LostItem::from_record(lost_record("wallet", None)).is_none());
        assert!(LostItem::from_record(lost_record("wallet", Some("gadgets"))).is_none());
    }

    #[test]
    fn test_validate_requires_name_and_category() {
        let now = Utc::now();
        let mut report = NewLostItem {
            name: "  ".to_string(),
            category: Some(Category::Cars),
            ..Default::default()
        };
        assert_eq!(report.validate(now).unwrap_err(), "Please enter item name");

        report.name = "keys".to_string();
        report.category = None;
        assert_eq!(report.validate(now).unwrap_err(), "Please select a category");
    }

    #[test]
    fn test_validate_trims_and_snapshots_date() {
        let now = Utc.with_ymd_and_hms(2026, 10, 6, 12, 0, 0).unwrap();
        let report = NewFoundItem {
            name: " blue umbrella ".to_string(),
            location: Some("   ".to_string()),
            description: Some(" left on bench ".to_string()),
            category: Some(Category::Accessories),
            ..Default::default()
        };
        let validated = report.validate(now).unwrap();
        assert_eq!(validated.name, "blue umbrella");
        assert_eq!(validated.place, None);
        assert_eq!(validated.description.as_deref(), Some("left on bench"));
        assert_eq!(validated.date, "Oct 6, 2026");
    }

    #[test]
    fn test_both_payloads_map_their_place_field() {
        let now = Utc::now();
        let coords = Coordinates {
            latitude: 48.85,
            longitude: 2.35,
        };
        let lost = NewLostItem {
            name: "wallet".to_string(),
            last_seen_location: Some(" Main Street ".to_string()),
            category: Some(Category::Personal),
            date: Some("Oct 1, 2026".to_string()),
            location_coords: Some(coords),
            ..Default::default()
        }
        .validate(now)
        .unwrap();
        assert_eq!(lost.place.as_deref(), Some("Main Street"));
        assert_eq!(lost.date, "Oct 1, 2026");
        assert_eq!(lost.location_coords, Some(coords));

        let found = NewFoundItem {
            name: "wallet".to_string(),
            location: Some("Library".to_string()),
            category: Some(Category::Personal),
            image_uri: Some("file:///wallet.jpg".to_string()),
            ..Default::default()
        }
        .validate(now)
        .unwrap();
        assert_eq!(found.place.as_deref(), Some("Library"));
        assert_eq!(found.image_uri.as_deref(), Some("file:///wallet.jpg"));
    }
}
