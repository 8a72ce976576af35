use crate::core::links::MapLinks;
use crate::core::loader::LoadOutcome;
use crate::core::{Listing, ProjectedItem};
use crate::utils::error::DirectoryError;
use std::fmt::Write;

pub fn render_list<T: Listing>(items: &[ProjectedItem<T>]) -> String {
    if items.is_empty() {
        return "조건에 맞는 항목이 없습니다.\n".to_string();
    }

    let mut out = format!("{} {}개\n", T::LABEL, items.len());
    for (position, projected) in items.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {} ({} · {})",
            position + 1,
            projected.item.name(),
            projected.region,
            projected.category
        );
    }
    out
}

pub fn render_detail<T: Listing>(projected: &ProjectedItem<T>, links: &MapLinks) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", projected.item.name());
    let _ = writeln!(out, "  지역: {}", projected.region);
    let _ = writeln!(out, "  분류: {}", projected.category);
    for (label, value) in projected.item.detail_fields() {
        let _ = writeln!(out, "  {}: {}", label, value);
    }
    out.push('\n');
    for (provider, url) in links.iter() {
        let _ = writeln!(out, "  [{}] {}", provider.label(), url);
    }
    out
}

pub fn render_names<S: AsRef<str>>(title: &str, names: &[S]) -> String {
    let mut out = format!("{}\n", title);
    for name in names {
        let _ = writeln!(out, "  - {}", name.as_ref());
    }
    out
}

pub fn render_counts(counts: &[(String, usize)]) -> String {
    let total: usize = counts.iter().map(|(_, count)| count).sum();
    let width = counts
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (name, count) in counts {
        let padding = width - name.chars().count();
        let _ = writeln!(out, "  {}{}  {:>5}", name, " ".repeat(padding), count);
    }
    let _ = writeln!(out, "  합계 {}", total);
    out
}

/// User-visible diagnostics for a load attempt, empty when nothing went wrong.
pub fn render_load_diagnostics<T: Listing>(outcome: &LoadOutcome<T>) -> Vec<String> {
    let mut messages = Vec::new();
    if let Some(failure) = &outcome.failure {
        let error = DirectoryError::from(failure.clone());
        messages.push(format!("⚠️ {} {}", T::LABEL, error.user_friendly_message()));
        messages.push(format!("💡 {}", error.recovery_suggestion()));
    }
    if !outcome.skipped.is_empty() {
        messages.push(format!(
            "⚠️ 필수 항목이 빠진 {}개 레코드를 제외했습니다",
            outcome.skipped.len()
        ));
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::links::LinkBases;
    use crate::core::{Catalog, Restaurant};
    use crate::utils::error::LoadFailure;

    fn projected() -> ProjectedItem<Restaurant> {
        ProjectedItem {
            region: "기흥구".to_string(),
            category: "한식".to_string(),
            item: Restaurant {
                name: "가".to_string(),
                price: "점심 9000원/저녁 15000원".to_string(),
                address: "용인시 기흥구 1".to_string(),
                hours: Some("11:00-21:00".to_string()),
            },
        }
    }

    #[test]
    fn test_render_list_numbers_from_one() {
        let list = render_list(&[projected()]);
        assert!(list.contains("맛집 1개"));
        assert!(list.contains("  1. 가 (기흥구 · 한식)"));
        assert!(render_list::<Restaurant>(&[]).contains("없습니다"));
    }

    #[test]
    fn test_render_detail_has_fields_and_links() {
        let item = projected();
        let links = MapLinks::for_listing(&item.item, &LinkBases::default());
        let detail = render_detail(&item, &links);

        assert!(detail.contains("가격대: 점심 9000원\n    저녁 15000원"));
        assert!(detail.contains("영업시간: 11:00-21:00"));
        assert!(detail.contains("[네이버 지도] https://map.naver.com/p/search/"));
        assert!(detail.contains("[카카오맵]"));
        assert!(detail.contains("[구글 지도]"));
    }

    #[test]
    fn test_render_counts_total() {
        let counts = vec![("음식점".to_string(), 3), ("학원".to_string(), 2)];
        assert!(render_counts(&counts).contains("합계 5"));
    }

    #[test]
    fn test_load_diagnostics() {
        let outcome = LoadOutcome::<Restaurant>::failed(LoadFailure::NotFound {
            path: "restaurants.json".to_string(),
        });
        let messages = render_load_diagnostics(&outcome);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("⚠️ 맛집 데이터를 불러올 수 없습니다"));
        assert!(messages[0].contains("restaurants.json"));
        assert!(messages[1].contains("--data-dir"));
    }

    #[test]
    fn test_load_diagnostics_for_malformed_file_and_clean_load() {
        let outcome = LoadOutcome::<Restaurant>::failed(LoadFailure::Malformed {
            path: "restaurants.json".to_string(),
            message: "expected value".to_string(),
        });
        let messages = render_load_diagnostics(&outcome);
        assert!(messages[1].contains("region -> category"));

        let outcome = LoadOutcome::<Restaurant>::loaded(Catalog::empty(), Vec::new());
        assert!(render_load_diagnostics(&outcome).is_empty());
    }
}
