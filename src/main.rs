use clap::Parser;

use siteaudit::{AppConfig, SiteAnalyzer};

/// Audit a public web page: SEO tags, trust pages, UX heuristics and
/// PageSpeed metrics folded into one weighted score.
#[derive(Parser, Debug)]
#[command(name = "siteaudit", version, about)]
struct Cli {
    /// Domain or URL to audit (e.g. example.com)
    url: String,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    let analyzer = match SiteAnalyzer::new(&config) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    match analyzer.analyze(&cli.url).await {
        Ok(report) => {
            let json = if cli.pretty {
                serde_json::to_string_pretty(&report)
            } else {
                serde_json::to_string(&report)
            }
            .expect("report serializes");
            println!("{json}");
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(if e.is_client_error() { 2 } else { 1 });
        }
    }
}
