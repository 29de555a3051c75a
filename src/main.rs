use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use niche_analyzer::{NicheResearcher, ResearchOutcome};
use nichelens_core::{ApiCredentials, ResearchReport, ResearchSettings};
use reddit_client::RapidApiRedditClient;

#[derive(Parser)]
#[command(name = "nichelens", about = "Find product opportunities by analyzing Reddit niches")]
struct Cli {
    /// Optional TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Full research workflow: discover, analyze, aggregate, report
    Research {
        /// Niche keyword, e.g. "email marketing"
        niche: Vec<String>,
        /// Communities to analyze
        #[arg(long)]
        max_subs: Option<usize>,
        /// Posts to analyze per community
        #[arg(long)]
        posts: Option<u32>,
        /// Report output path (defaults to reports/<niche>_<timestamp>.json)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Discovery only: list ranked communities for a niche
    Discover {
        niche: Vec<String>,
        #[arg(long)]
        max_subs: Option<usize>,
    },
    /// Analyze a single community by name
    Analyze {
        subreddit: String,
        #[arg(long)]
        posts: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nichelens=info,niche_analyzer=info,reddit_client=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => ResearchSettings::from_toml_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => ResearchSettings::default(),
    };

    let credentials = ApiCredentials::from_env().context("reading RapidAPI credentials")?;
    let client = RapidApiRedditClient::new(credentials);

    match cli.command {
        Command::Research {
            niche,
            max_subs,
            posts,
            out,
        } => {
            let niche = join_niche(&niche)?;
            if let Some(max_subs) = max_subs {
                settings.max_communities = max_subs;
            }
            if let Some(posts) = posts {
                settings.posts_per_community = posts;
            }

            let researcher = NicheResearcher::new(&client, &client, settings);
            match researcher.research(&niche).await {
                ResearchOutcome::Report(report) => {
                    print_report_summary(&report);
                    let path = out.unwrap_or_else(|| default_report_path(&niche));
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("creating {}", parent.display()))?;
                    }
                    report
                        .write_json(&path)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Report saved to {}", path.display());
                }
                ResearchOutcome::NoCommunities => {
                    println!("No communities found for '{niche}'. Try different keywords.");
                }
            }
        }
        Command::Discover { niche, max_subs } => {
            let niche = join_niche(&niche)?;
            if let Some(max_subs) = max_subs {
                settings.max_communities = max_subs;
            }

            let researcher = NicheResearcher::new(&client, &client, settings);
            let communities = researcher.discover(&niche).await;
            if communities.is_empty() {
                println!("No communities found for '{niche}'.");
            }
            for community in communities {
                println!(
                    "r/{:<30} {:>12} subscribers  {}",
                    community.name,
                    community.subscribers,
                    truncate(&community.description, 80)
                );
            }
        }
        Command::Analyze { subreddit, posts } => {
            if let Some(posts) = posts {
                settings.posts_per_community = posts;
            }

            let researcher = NicheResearcher::new(&client, &client, settings);
            let analysis = researcher.analyze_community(&subreddit).await;
            println!(
                "r/{}: {} posts analyzed",
                analysis.community, analysis.posts_analyzed
            );
            println!(
                "Intents: {} questions, {} complaints, {} requests, {} showcases, {} discussions",
                analysis.intent_counts.question,
                analysis.intent_counts.complaint,
                analysis.intent_counts.request,
                analysis.intent_counts.showcase,
                analysis.intent_counts.discussion,
            );
            print_fragments("Pain points", &analysis.insights.pain_points);
            print_fragments("Questions", &analysis.insights.questions);
            print_fragments("Requests", &analysis.insights.requests);
            if !analysis.themes.is_empty() {
                println!("Themes: {}", analysis.themes.join(", "));
            }
        }
    }

    Ok(())
}

fn join_niche(words: &[String]) -> anyhow::Result<String> {
    let niche = words.join(" ");
    if niche.trim().is_empty() {
        anyhow::bail!("niche keyword must not be empty");
    }
    Ok(niche)
}

fn default_report_path(niche: &str) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from("reports").join(format!("{}_{stamp}.json", niche.replace(' ', "_")))
}

fn print_report_summary(report: &ResearchReport) {
    println!("Niche research: {}", report.niche);
    println!("  Communities analyzed: {}", report.communities_found.len());
    println!("  Posts analyzed:       {}", report.total_posts_analyzed);
    println!("  Pain points:          {}", report.insights.pain_points.len());
    println!("  Questions:            {}", report.insights.questions.len());
    println!("  Opportunities:        {}", report.opportunities.len());
    if !report.common_themes.is_empty() {
        println!("  Themes: {}", report.common_themes.join(", "));
    }
}

fn print_fragments(label: &str, fragments: &[String]) {
    if fragments.is_empty() {
        return;
    }
    println!("{label}:");
    for fragment in fragments.iter().take(10) {
        println!("  - {}", truncate(fragment, 100));
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        s.chars().take(max_chars).collect::<String>() + "..."
    }
}
