use strategy_showcase::config::Config;
use strategy_showcase::page::write_site;
use strategy_showcase::store::StrategyStore;
use strategy_showcase::view::PAGE_SIZE;

#[tokio::main]
async fn main() {
    let config = Config::from_env();
    let http = reqwest::Client::new();

    eprintln!("╔══════════════════════════════════════════════════╗");
    eprintln!("║  {} | static site", config.site_title);
    eprintln!("║  Data: {}", config.data_source.label());
    eprintln!("║  Output: {} | Page size: {}", config.output_dir.display(), PAGE_SIZE);
    eprintln!("║  Holdings: {}* ({})", config.downloads_prefix, config.holdings_label);
    eprintln!("╚══════════════════════════════════════════════════╝");

    // Single attempt. A failure still produces a page with an inline error.
    let loaded = StrategyStore::load(&http, &config.data_source).await;
    if let Err(e) = &loaded {
        eprintln!("[MAIN] Error loading portfolio data: {}", e);
    }

    match write_site(&config, &loaded, &config.output_dir, chrono::Utc::now()) {
        Ok(paths) => {
            for p in &paths {
                println!("{}", p.display());
            }
        }
        Err(e) => {
            eprintln!("[MAIN] Failed to write site to {}: {}", config.output_dir.display(), e);
            std::process::exit(1);
        }
    }
}
