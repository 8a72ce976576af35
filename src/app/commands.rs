use crate::app::browse::Browser;
use crate::app::export::write_export;
use crate::app::render;
use crate::config::cli::LocalStorage;
use crate::config::toml_config::DirectoryConfig;
use crate::config::{Command, FilterArgs};
use crate::core::links::{LinkBases, MapLinks};
use crate::core::loader::CatalogLoader;
use crate::core::projection;
use crate::core::selection::Session;
use crate::core::{Catalog, ConfigProvider, Listing};
use crate::utils::error::{DirectoryError, Result};

fn session_for<T: Listing>(filter: &FilterArgs) -> Session<T> {
    let mut session = Session::new();
    session.set_region(filter.region.clone());
    session.set_category(filter.category.clone());
    session.set_name_filter(filter.name.clone());
    session
}

/// Loads the catalog for the command's directory kind and runs the command against it.
pub async fn run<T: Listing>(command: &Command, config: &DirectoryConfig) -> Result<()> {
    let kind = command.kind();
    let bases = LinkBases::from_config(config)?;

    let loader: CatalogLoader<_, T> =
        CatalogLoader::new(LocalStorage::new(config.data_dir()), config.data_file(kind));
    let outcome = loader.load().await;

    // a failed load still runs the command against an empty catalog
    for message in render::render_load_diagnostics(outcome) {
        eprintln!("{}", message);
    }
    let catalog: &Catalog<T> = &outcome.catalog;

    match command {
        Command::Regions { .. } => {
            print!("{}", render::render_names("지역", &projection::regions(catalog)));
        }
        Command::Categories { region, .. } => {
            let names = projection::categories(catalog, region);
            print!("{}", render::render_names(&format!("분류 ({})", region), &names));
        }
        Command::List(filter) => {
            let session = session_for::<T>(filter);
            print!("{}", render::render_list(&session.results(catalog)));
        }
        Command::Show { filter, number } => {
            let mut session = session_for::<T>(filter);
            let index = number
                .checked_sub(1)
                .ok_or_else(|| DirectoryError::SelectionOutOfRange {
                    index: *number,
                    len: session.results(catalog).len(),
                })?;
            let chosen = session.choose_index(catalog, index)?;
            let links = MapLinks::for_listing(&chosen.item, &bases);
            print!("{}", render::render_detail(chosen, &links));
        }
        Command::Stats { region, .. } => {
            println!("{} 분류별 개수 ({})", T::LABEL, region);
            print!("{}", render::render_counts(&projection::category_counts(catalog, region)));
        }
        Command::Export(args) => {
            let items = session_for::<T>(&args.filter).results(catalog);
            let storage = LocalStorage::new(".");
            let written = write_export(&storage, &args.output, &items, args.format).await?;
            tracing::info!("📁 Exported {} rows to {}", written, args.output);
            println!("✅ {}개 항목을 {}에 저장했습니다", written, args.output);
        }
        Command::Browse { .. } => {
            let mut browser = Browser::new(catalog, &bases);
            tokio::task::block_in_place(|| {
                let stdin = std::io::stdin();
                let stdout = std::io::stdout();
                browser.run(stdin.lock(), stdout.lock())
            })?;
        }
    }

    Ok(())
}
