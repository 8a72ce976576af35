use crate::core::{ConfigProvider, Listing};
use crate::utils::error::{DirectoryError, Result};
use url::Url;

pub const DEFAULT_NAVER_BASE: &str = "https://map.naver.com/p/search/";
pub const DEFAULT_KAKAO_BASE: &str = "https://map.kakao.com/";
pub const DEFAULT_GOOGLE_BASE: &str = "https://www.google.com/maps/search/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapProvider {
    Naver,
    Kakao,
    Google,
}

impl MapProvider {
    pub fn label(&self) -> &'static str {
        match self {
            MapProvider::Naver => "네이버 지도",
            MapProvider::Kakao => "카카오맵",
            MapProvider::Google => "구글 지도",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LinkBases {
    naver: Url,
    kakao: Url,
    google: Url,
}

impl LinkBases {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Ok(Self {
            naver: parse_base("links.naver_base", config.naver_base())?,
            kakao: parse_base("links.kakao_base", config.kakao_base())?,
            google: parse_base("links.google_base", config.google_base())?,
        })
    }
}

impl Default for LinkBases {
    fn default() -> Self {
        // constants are valid absolute URLs
        Self {
            naver: Url::parse(DEFAULT_NAVER_BASE).expect("valid default naver base"),
            kakao: Url::parse(DEFAULT_KAKAO_BASE).expect("valid default kakao base"),
            google: Url::parse(DEFAULT_GOOGLE_BASE).expect("valid default google base"),
        }
    }
}

fn parse_base(field: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value).map_err(|e| DirectoryError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;
    if url.cannot_be_a_base() {
        return Err(DirectoryError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        });
    }
    Ok(url)
}

/// Outbound search links for one listing. Nothing is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapLinks {
    pub naver: Url,
    pub kakao: Url,
    pub google: Url,
}

impl MapLinks {
    /// Naver and Google search for "name address", Kakao for the name alone.
    pub fn for_listing<T: Listing>(item: &T, bases: &LinkBases) -> Self {
        let with_address = match item.address().map(str::trim) {
            Some(address) if !address.is_empty() => format!("{} {}", item.name(), address),
            _ => item.name().to_string(),
        };

        let mut naver = bases.naver.clone();
        if let Ok(mut segments) = naver.path_segments_mut() {
            segments.pop_if_empty().push(&with_address);
        }

        let mut kakao = bases.kakao.clone();
        kakao.query_pairs_mut().append_pair("q", item.name());

        let mut google = bases.google.clone();
        google
            .query_pairs_mut()
            .append_pair("api", "1")
            .append_pair("query", &with_address);

        Self {
            naver,
            kakao,
            google,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (MapProvider, &Url)> {
        [
            (MapProvider::Naver, &self.naver),
            (MapProvider::Kakao, &self.kakao),
            (MapProvider::Google, &self.google),
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Merchant, Restaurant};

    fn restaurant() -> Restaurant {
        Restaurant {
            name: "가 식당".to_string(),
            price: "1000원".to_string(),
            address: "용인시 기흥구".to_string(),
            hours: None,
        }
    }

    #[test]
    fn test_links_are_percent_encoded() {
        let links = MapLinks::for_listing(&restaurant(), &LinkBases::default());

        assert!(links.naver.as_str().starts_with("https://map.naver.com/p/search/"));
        assert!(!links.naver.as_str().contains(' '));
        let segment = links.naver.path_segments().unwrap().last().unwrap().to_string();
        assert!(segment.starts_with("%EA%B0%80%20"));

        let kakao_query: Vec<(String, String)> = links.kakao.query_pairs().into_owned().collect();
        assert_eq!(kakao_query, vec![("q".to_string(), "가 식당".to_string())]);

        let google_query: Vec<(String, String)> = links.google.query_pairs().into_owned().collect();
        assert_eq!(
            google_query,
            vec![
                ("api".to_string(), "1".to_string()),
                ("query".to_string(), "가 식당 용인시 기흥구".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_address_uses_name_only() {
        let merchant = Merchant {
            name: "상점".to_string(),
            address: "  ".to_string(),
            phone: None,
        };
        let links = MapLinks::for_listing(&merchant, &LinkBases::default());
        let query: Vec<(String, String)> = links.google.query_pairs().into_owned().collect();
        assert_eq!(query[1].1, "상점");
        assert_eq!(links.iter().count(), 3);
    }
}
