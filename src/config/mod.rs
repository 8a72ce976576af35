pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_args::{CliConfig, Command, ExportArgs, FilterArgs};

#[cfg(feature = "cli")]
mod cli_args {
    use crate::app::export::ExportFormat;
    use crate::config::toml_config::DirectoryConfig;
    use crate::core::{DirectoryKind, Selector};
    use crate::utils::error::Result;
    use crate::utils::validation::Validate;
    use clap::{Args, Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "yongin-directory")]
    #[command(about = "용인시 맛집 / 와이페이 가맹점 directory lookup")]
    pub struct CliConfig {
        /// Path to a TOML configuration file
        #[arg(short, long, global = true)]
        pub config: Option<String>,

        /// Directory holding the JSON data files
        #[arg(long, global = true)]
        pub data_dir: Option<String>,

        #[arg(long, global = true)]
        pub restaurants_file: Option<String>,

        #[arg(long, global = true)]
        pub merchants_file: Option<String>,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Emit logs as JSON")]
        pub log_json: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// List region names
        Regions {
            #[arg(long, value_enum, default_value = "restaurants")]
            kind: DirectoryKind,
        },
        /// List categories under a region (or all regions)
        Categories {
            #[arg(long, value_enum, default_value = "restaurants")]
            kind: DirectoryKind,
            #[arg(long, default_value = "all")]
            region: Selector,
        },
        /// List entries matching the filters
        List(FilterArgs),
        /// Show one entry of the list with its map links
        Show {
            #[command(flatten)]
            filter: FilterArgs,
            /// 1-based position in the list
            #[arg(short, long)]
            number: usize,
        },
        /// Entry counts per category
        Stats {
            #[arg(long, value_enum, default_value = "merchants")]
            kind: DirectoryKind,
            #[arg(long, default_value = "all")]
            region: Selector,
        },
        /// Write the filtered list to a CSV or JSON file
        Export(ExportArgs),
        /// Interactive session
        Browse {
            #[arg(long, value_enum, default_value = "restaurants")]
            kind: DirectoryKind,
        },
    }

    #[derive(Debug, Clone, Args)]
    pub struct FilterArgs {
        #[arg(long, value_enum, default_value = "restaurants")]
        pub kind: DirectoryKind,
        /// Region name, or `all`; prefix `=` for a region literally named `all`/`전체`
        #[arg(long, default_value = "all")]
        pub region: Selector,
        /// Category name, or `all`; `=` forces a literal name as for `--region`
        #[arg(long, default_value = "all")]
        pub category: Selector,
        /// Keep entries whose name contains this text
        #[arg(long)]
        pub name: Option<String>,
    }

    #[derive(Debug, Clone, Args)]
    pub struct ExportArgs {
        #[command(flatten)]
        pub filter: FilterArgs,
        #[arg(long, value_enum, default_value = "csv")]
        pub format: ExportFormat,
        #[arg(short, long)]
        pub output: String,
    }

    impl Command {
        pub fn kind(&self) -> DirectoryKind {
            match self {
                Command::Regions { kind }
                | Command::Categories { kind, .. }
                | Command::Stats { kind, .. }
                | Command::Browse { kind } => *kind,
                Command::List(filter) | Command::Show { filter, .. } => filter.kind,
                Command::Export(args) => args.filter.kind,
            }
        }
    }

    impl CliConfig {
        /// 合併 TOML 配置與命令列覆蓋設定
        pub fn resolve(&self) -> Result<DirectoryConfig> {
            let mut config = match &self.config {
                Some(path) => {
                    tracing::info!("📁 Loading configuration from: {}", path);
                    DirectoryConfig::from_file(path)?
                }
                None => DirectoryConfig::default(),
            };

            if let Some(dir) = &self.data_dir {
                config.data.dir = dir.clone();
            }
            if let Some(file) = &self.restaurants_file {
                config.data.restaurants_file = file.clone();
            }
            if let Some(file) = &self.merchants_file {
                config.data.merchants_file = file.clone();
            }

            config.validate()?;
            Ok(config)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_list_command() {
            let cli = CliConfig::parse_from([
                "yongin-directory",
                "list",
                "--region",
                "기흥구",
                "--category",
                "전체",
                "--data-dir",
                "/srv/data",
            ]);
            match &cli.command {
                Command::List(filter) => {
                    assert_eq!(filter.region, Selector::named("기흥구"));
                    assert!(filter.category.is_all());
                    assert_eq!(filter.kind, DirectoryKind::Restaurants);
                }
                other => panic!("unexpected command {:?}", other),
            }
            let config = cli.resolve().unwrap();
            assert_eq!(config.data.dir, "/srv/data");
        }

        #[test]
        fn test_command_kind() {
            let cli = CliConfig::parse_from(["yongin-directory", "stats"]);
            assert_eq!(cli.command.kind(), DirectoryKind::Merchants);

            let cli = CliConfig::parse_from([
                "yongin-directory",
                "export",
                "--kind",
                "merchants",
                "--format",
                "json",
                "-o",
                "out.json",
            ]);
            assert_eq!(cli.command.kind(), DirectoryKind::Merchants);
        }

        #[test]
        fn test_override_is_validated() {
            let cli = CliConfig::parse_from([
                "yongin-directory",
                "regions",
                "--merchants-file",
                "merchants.xlsx",
            ]);
            assert!(cli.resolve().is_err());
        }
    }
}
