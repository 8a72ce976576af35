use anyhow::Result;
use tempfile::TempDir;
use yongin_directory::app::export::{write_export, ExportFormat};
use yongin_directory::core::projection::{category_counts, search_by_name};
use yongin_directory::{
    project, CatalogLoader, LinkBases, LocalStorage, MapLinks, Merchant, Restaurant, Selector,
    Session,
};

const SCENARIO: &str = r#"{
    "지역A": {
        "한식": [{"식당명":"가","가격대":"1000원","주소":"서울"}],
        "중식": []
    },
    "지역B": {
        "한식": [{"식당명":"나","가격대":"2000원","주소":"부산"}]
    }
}"#;

const TWO_BY_TWO: &str = r#"{
    "처인구": {
        "한식": [
            {"식당명":"r1","가격대":"p","주소":"a"},
            {"식당명":"r2","가격대":"p","주소":"a"}
        ],
        "분식": [{"식당명":"r3","가격대":"p","주소":"a"}]
    },
    "기흥구": {
        "중식": [{"식당명":"r4","가격대":"p","주소":"a"}],
        "한식": [
            {"식당명":"r5","가격대":"p","주소":"a"},
            {"식당명":"r6","가격대":"p","주소":"a"}
        ]
    }
}"#;

async fn load_restaurants(json: &str) -> Result<(TempDir, CatalogLoader<LocalStorage, Restaurant>)> {
    let temp_dir = TempDir::new()?;
    tokio::fs::write(temp_dir.path().join("restaurants.json"), json).await?;
    let loader = CatalogLoader::new(LocalStorage::new(temp_dir.path()), "restaurants.json");
    Ok((temp_dir, loader))
}

#[tokio::test]
async fn test_scenario_projections() -> Result<()> {
    let (_dir, loader) = load_restaurants(SCENARIO).await?;
    let catalog = loader.load().await.catalog.as_ref();

    let hansik = project(catalog, &Selector::All, &Selector::named("한식"));
    let summary: Vec<(&str, &str)> = hansik
        .iter()
        .map(|p| (p.item.name.as_str(), p.region.as_str()))
        .collect();
    assert_eq!(summary, vec![("가", "지역A"), ("나", "지역B")]);

    let region_a = project(catalog, &Selector::named("지역A"), &Selector::All);
    assert_eq!(region_a.len(), 1);
    assert_eq!(region_a[0].item.name, "가");
    assert_eq!(region_a[0].category, "한식");

    assert!(project(catalog, &Selector::named("지역C"), &Selector::All).is_empty());
    Ok(())
}

#[tokio::test]
async fn test_all_all_preserves_catalog_order() -> Result<()> {
    let (_dir, loader) = load_restaurants(TWO_BY_TWO).await?;
    let catalog = loader.load().await.catalog.as_ref();

    let names: Vec<String> = project(catalog, &Selector::All, &Selector::All)
        .into_iter()
        .map(|p| p.item.name)
        .collect();
    assert_eq!(names, vec!["r1", "r2", "r3", "r4", "r5", "r6"]);
    assert_eq!(names.len(), catalog.item_count());

    let hansik: Vec<String> = project(catalog, &Selector::All, &Selector::named("한식"))
        .into_iter()
        .map(|p| p.item.name)
        .collect();
    assert_eq!(hansik, vec!["r1", "r2", "r5", "r6"]);
    Ok(())
}

#[tokio::test]
async fn test_session_selection_and_links() -> Result<()> {
    let (_dir, loader) = load_restaurants(SCENARIO).await?;
    let catalog = loader.load().await.catalog.as_ref();

    let mut session: Session<Restaurant> = Session::new();
    session.set_category(Selector::named("한식"));
    let chosen = session.choose_index(catalog, 1)?.clone();
    assert_eq!(chosen.item.name, "나");

    let links = MapLinks::for_listing(&chosen.item, &LinkBases::default());
    let google: Vec<(String, String)> = links.google.query_pairs().into_owned().collect();
    assert_eq!(google[1], ("query".to_string(), "나 부산".to_string()));

    session.clear();
    assert!(!session.selection().is_selected());
    Ok(())
}

#[tokio::test]
async fn test_merchant_search_stats_and_export() -> Result<()> {
    let temp_dir = TempDir::new()?;
    tokio::fs::write(
        temp_dir.path().join("ypay_merchants.json"),
        r#"{
            "처인구": {
                "음식점": [
                    {"가맹점명":"백암순대","주소":"처인구 백암면","전화번호":"031-333-0000"},
                    {"가맹점명":"용인 베이커리","주소":"처인구 김량장동"}
                ],
                "학원": [{"가맹점명":"처인 수학학원","주소":"처인구 역북동"}]
            },
            "수지구": {
                "음식점": [{"가맹점명":"수지 BAKERY","주소":"수지구 풍덕천동"}]
            }
        }"#,
    )
    .await?;

    let loader: CatalogLoader<_, Merchant> =
        CatalogLoader::new(LocalStorage::new(temp_dir.path()), "ypay_merchants.json");
    let catalog = loader.load().await.catalog.as_ref();

    let all = project(catalog, &Selector::All, &Selector::All);
    let bakeries = search_by_name(all, "bakery");
    assert_eq!(bakeries.len(), 1);
    assert_eq!(bakeries[0].region, "수지구");

    assert_eq!(
        category_counts(catalog, &Selector::All),
        vec![("음식점".to_string(), 3), ("학원".to_string(), 1)]
    );

    let storage = LocalStorage::new(temp_dir.path());
    let items = project(catalog, &Selector::named("처인구"), &Selector::named("음식점"));
    let written = write_export(&storage, "out/merchants.csv", &items, ExportFormat::Csv).await?;
    assert_eq!(written, 2);

    let csv = tokio::fs::read_to_string(temp_dir.path().join("out/merchants.csv")).await?;
    assert!(csv.starts_with("지역,분류,가맹점명,주소,전화번호\n"));
    assert!(csv.contains("처인구,음식점,백암순대,처인구 백암면,031-333-0000"));
    Ok(())
}
