#[cfg(any(feature = "harvest", feature = "cdp"))]
mod cli {
    use clap::{Parser, Subcommand};
    use uxlens::{AuditConfig, ScoreReport};

    #[derive(Parser)]
    #[command(
        name = "uxlens",
        version,
        about = "Audit a web page's UX quality from the command line"
    )]
    struct Cli {
        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand)]
    enum Command {
        /// Load a URL, harvest its element inventory, and print the UX score
        Audit {
            url: String,
            /// Emit the full analyze response as JSON instead of a summary
            #[arg(long)]
            json: bool,
        },
        /// Score a previously captured element inventory (a JSON array of
        /// element snapshots)
        Score { path: std::path::PathBuf },
        /// Serve the analyze API (POST /analyze)
        Serve {
            #[arg(long, default_value_t = 8080)]
            port: u16,
        },
    }

    pub fn run() -> anyhow::Result<()> {
        env_logger::init();
        let cli = Cli::parse();
        let config = AuditConfig::default();

        match cli.command {
            Command::Audit { url, json } => {
                let response = uxlens::api::analyze_url(&config, &url)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&response)?);
                } else {
                    print_summary(&url, response.element_count, &response.scores);
                }
            }
            Command::Score { path } => {
                let data = std::fs::read_to_string(&path)?;
                let inventory: Vec<uxlens::ElementSnapshot> = serde_json::from_str(&data)?;
                let report = uxlens::score(&inventory);
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            Command::Serve { port } => uxlens::api::serve(config, port)?,
        }
        Ok(())
    }

    fn print_summary(url: &str, element_count: usize, scores: &ScoreReport) {
        println!("UX audit for {}", url);
        println!("  elements inventoried: {}", element_count);
        println!("  contrast:          {:>5.1}", scores.contrast_score);
        println!("  clickable spacing: {:>5.1}", scores.clickable_spacing_score);
        println!("  underlined links:  {:>5.1}", scores.underlined_links_score);
        println!("  font size:         {:>5.1}", scores.font_size_score);
        println!("  mobile:            {:>5.1}", scores.mobile_responsive_score);
        println!("  total:             {}/100", scores.total_score);
        if !scores.issues.is_empty() {
            println!("issues:");
            for issue in &scores.issues {
                println!("  - {}", issue);
            }
        }
        for note in &scores.font_size_notes {
            println!("  note: {}", note);
        }
    }
}

#[cfg(any(feature = "harvest", feature = "cdp"))]
fn main() -> anyhow::Result<()> {
    cli::run()
}

#[cfg(not(any(feature = "harvest", feature = "cdp")))]
fn main() {
    eprintln!("uxlens was built without a harvester backend; rebuild with --features harvest or --features cdp");
    std::process::exit(2);
}
