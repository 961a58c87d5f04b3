use clap::Parser;
use cotacao_common::BatchPolicy;
use cotacao_rust::{app, cli, config, display, error, export, logging};
use app::App;
use cli::{Cli, Commands, FavoriteAction};
use config::Config;
use error::Result;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("エラー: {}", e);
        std::process::exit(if e.is_input_error() { 2 } else { 1 });
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    let data_dir_override = cli.data_dir;
    let open_app = |config: &Config| -> Result<App> {
        let data_dir = match &data_dir_override {
            Some(dir) => dir.clone(),
            None => config.data_dir()?,
        };
        App::open(&data_dir, config)
    };

    match cli.command {
        Commands::Import { file } => {
            let app = open_app(&config)?;
            println!("📄 価格表を取り込み中: {}", file.display());
            let snapshot = app.import(&file)?;
            println!("✔ {}件を取り込みました", snapshot.len());
        }

        Commands::Search { keywords, file, json, export: export_path, limit, no_max } => {
            let app = open_app(&config)?;
            let mut lines = keywords;
            if let Some(path) = file {
                let content = std::fs::read_to_string(&path)?;
                lines.extend(content.lines().map(str::to_string));
            }

            if app.catalog_snapshot().is_none() {
                tracing::warn!("価格表が未読み込みです");
            }

            let result = if no_max {
                app.search_with_policy(&lines, &BatchPolicy::unlimited())?
            } else {
                app.search(&lines)?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                display::print_batch(&result, limit.or(config.display_limit));
            }

            if let Some(path) = export_path {
                export::write_quotation_excel(&result, &path)?;
                println!("✔ Excel出力: {}", path.display());
            }
        }

        Commands::Quote { item, json } => {
            let app = open_app(&config)?;
            let quotation = app.quote(&item)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&quotation)?);
            } else {
                display::print_quotation(&quotation);
            }
        }

        Commands::Items { limit } => {
            let app = open_app(&config)?;
            let limit = limit.unwrap_or(config.items_limit);
            match app.catalog_snapshot() {
                Some(snapshot) => display::print_items(snapshot.items(limit), snapshot.len()),
                None => println!("価格表: 未読み込み"),
            }
        }

        Commands::Count => {
            let app = open_app(&config)?;
            let count = app.catalog_snapshot().map(|s| s.len()).unwrap_or(0);
            println!("{}", count);
        }

        Commands::Status { json } => {
            let status = open_app(&config)?.status();
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                display::print_status(&status);
            }
        }

        Commands::Favorite { action } => {
            let app = open_app(&config)?;
            match action {
                FavoriteAction::Add { name } => {
                    if app.add_favorite(&name)? {
                        println!("★ お気に入りに追加: {}", name);
                    } else {
                        println!("登録済みです: {}", name);
                    }
                }
                FavoriteAction::Remove { name } => {
                    if app.remove_favorite(&name)? {
                        println!("✔ お気に入りから削除: {}", name);
                    } else {
                        println!("お気に入りにありません: {}", name);
                    }
                }
                FavoriteAction::List => {
                    let favorites = app.favorites();
                    if favorites.is_empty() {
                        println!("お気に入りはありません");
                    }
                    for name in favorites {
                        println!("★ {}", name);
                    }
                }
            }
        }

        Commands::Config { set_max_keywords, set_data_dir, show } => {
            if let Some(max) = set_max_keywords {
                config.max_keywords = max;
                config.save()?;
                println!("✔ キーワード上限を設定しました: {}", max);
            }
            if let Some(dir) = set_data_dir {
                println!("✔ データディレクトリを設定しました: {}", dir.display());
                config.data_dir = Some(dir);
                config.save()?;
            }
            if show {
                let max_keywords = if config.max_keywords == 0 {
                    "無制限".to_string()
                } else {
                    config.max_keywords.to_string()
                };
                println!("設定:");
                println!("  データディレクトリ: {}", config.data_dir()?.display());
                println!("  キーワード上限: {}", max_keywords);
                println!("  items 既定件数: {}", config.items_limit);
                println!(
                    "  表示件数: {}",
                    config.display_limit.map(|n| n.to_string()).unwrap_or_else(|| "全件".into())
                );
            }
        }
    }

    Ok(())
}
