use crate::domain::ports::Listing;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 區域或分類的選擇器：指定名稱，或是「全部」
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selector {
    #[default]
    All,
    Named(String),
}

impl Selector {
    pub fn named(name: impl Into<String>) -> Self {
        Selector::Named(name.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }

    pub fn matches(&self, key: &str) -> bool {
        match self {
            Selector::All => true,
            Selector::Named(name) => name == key,
        }
    }
}

fn is_wildcard(text: &str) -> bool {
    text.is_empty() || text.eq_ignore_ascii_case("all") || text == "전체"
}

/// Empty text, `all` (any case) and `전체` parse as [`Selector::All`]. A leading `=`
/// forces a literal name, so a region or category actually called `전체` is `=전체`.
impl FromStr for Selector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(literal) = trimmed.strip_prefix('=') {
            Ok(Selector::Named(literal.trim().to_string()))
        } else if is_wildcard(trimmed) {
            Ok(Selector::All)
        } else {
            Ok(Selector::Named(trimmed.to_string()))
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => write!(f, "전체"),
            Selector::Named(name) if is_wildcard(name) || name.starts_with('=') => {
                write!(f, "={}", name)
            }
            Selector::Named(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryEntry<T> {
    pub name: String,
    pub items: Vec<T>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionEntry<T> {
    pub name: String,
    pub categories: Vec<CategoryEntry<T>>,
}

/// Region -> category -> items, in document order. Read-only once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog<T> {
    regions: Vec<RegionEntry<T>>,
}

impl<T> Catalog<T> {
    pub fn new(regions: Vec<RegionEntry<T>>) -> Self {
        Self { regions }
    }

    pub fn empty() -> Self {
        Self {
            regions: Vec::new(),
        }
    }

    pub fn regions(&self) -> &[RegionEntry<T>] {
        &self.regions
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.regions
            .iter()
            .flat_map(|r| r.categories.iter())
            .map(|c| c.items.len())
            .sum()
    }
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Optional text fields read any non-string value as absent.
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(text)) => Ok(Some(text)),
        _ => Ok(None),
    }
}

/// 맛집 record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(rename = "식당명")]
    pub name: String,
    #[serde(rename = "가격대")]
    pub price: String,
    #[serde(rename = "주소")]
    pub address: String,
    #[serde(
        rename = "영업시간",
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub hours: Option<String>,
}

impl Restaurant {
    /// 가격대 is written as "/"-separated clauses, e.g. "점심 9000원 / 저녁 15000원".
    pub fn price_clauses(&self) -> Vec<&str> {
        self.price
            .split('/')
            .map(str::trim)
            .filter(|clause| !clause.is_empty())
            .collect()
    }
}

impl Listing for Restaurant {
    const LABEL: &'static str = "맛집";
    const REQUIRED_FIELDS: &'static [&'static str] = &["식당명", "가격대", "주소"];
    const COLUMNS: &'static [&'static str] = &["식당명", "가격대", "주소", "영업시간"];

    fn name(&self) -> &str {
        &self.name
    }

    fn address(&self) -> Option<&str> {
        Some(&self.address)
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.price.clone(),
            self.address.clone(),
            self.hours.clone().unwrap_or_default(),
        ]
    }

    fn detail_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("가격대", self.price_clauses().join("\n    ")),
            ("주소", self.address.clone()),
        ];
        if let Some(hours) = &self.hours {
            fields.push(("영업시간", hours.clone()));
        }
        fields
    }
}

/// 와이페이 가맹점 record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    #[serde(rename = "가맹점명")]
    pub name: String,
    #[serde(rename = "주소")]
    pub address: String,
    #[serde(
        rename = "전화번호",
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
}

impl Listing for Merchant {
    const LABEL: &'static str = "와이페이 가맹점";
    const REQUIRED_FIELDS: &'static [&'static str] = &["가맹점명", "주소"];
    const COLUMNS: &'static [&'static str] = &["가맹점명", "주소", "전화번호"];

    fn name(&self) -> &str {
        &self.name
    }

    fn address(&self) -> Option<&str> {
        Some(&self.address)
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.address.clone(),
            self.phone.clone().unwrap_or_default(),
        ]
    }
}

/// An item annotated with where it was found. Built per projection, never stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedItem<T> {
    #[serde(rename = "지역")]
    pub region: String,
    #[serde(rename = "분류")]
    pub category: String,
    #[serde(flatten)]
    pub item: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum DirectoryKind {
    Restaurants,
    Merchants,
}

impl fmt::Display for DirectoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryKind::Restaurants => write!(f, "{}", Restaurant::LABEL),
            DirectoryKind::Merchants => write!(f, "{}", Merchant::LABEL),
        }
    }
}
