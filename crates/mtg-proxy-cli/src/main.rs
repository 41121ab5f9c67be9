mod logger;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use logger::ConsoleLogger;
use mtg_proxy::{
    CardFailure, CardRequest, PaperSize, Progress, ProxyError, ProxyOptions, RunReport,
    SheetStatistics, load_decklist, parse_line,
};
use std::path::PathBuf;

/// How many failed card names the summary lists before collapsing the rest.
const LISTED_FAILURES: usize = 5;

#[derive(Parser)]
#[command(
    name = "mtgp",
    about = "Print-ready proxy sheets from a Magic: The Gathering decklist",
    version
)]
struct Cli {
    /// Cards given inline, e.g. "4 Lightning Bolt" or "1 Sol Ring (C21) 263"
    cards: Vec<String>,

    /// Decklist file (plain text or CSV export)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output PDF file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Image density in dots per inch
    #[arg(long)]
    dpi: Option<u32>,

    /// Re-download artwork even when it is cached
    #[arg(long)]
    no_cache: bool,

    /// Rows per page
    #[arg(long)]
    rows: Option<usize>,

    /// Columns per page
    #[arg(long)]
    columns: Option<usize>,

    /// Output paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Directory for downloaded artwork
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// JSON options file; flags given on the command line take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective options to a JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Resolve cards and show sheet statistics, don't generate PDF
    #[arg(long)]
    stats_only: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors and suppress progress lines
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    Letter,
    Legal,
    A4,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::A4 => Self::A4,
        }
    }
}

impl Cli {
    /// Options from `--config` (or defaults), overridden by explicit flags.
    async fn options(&self) -> Result<ProxyOptions> {
        let mut options = match &self.config {
            Some(path) => ProxyOptions::load(path)
                .await
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ProxyOptions::default(),
        };

        if let Some(output) = &self.output {
            options.output_path = output.clone();
        }
        if let Some(dpi) = self.dpi {
            options.dpi = dpi;
        }
        if self.no_cache {
            options.use_cache = false;
        }
        if let Some(rows) = self.rows {
            options.rows = rows;
        }
        if let Some(columns) = self.columns {
            options.columns = columns;
        }
        if let Some(paper) = self.paper {
            options.paper_size = paper.into();
        }
        if let Some(cache_dir) = &self.cache_dir {
            options.cache_dir = cache_dir.clone();
        }

        options.validate()?;
        Ok(options)
    }

    /// File entries first, then inline cards.
    async fn requests(&self) -> Result<Vec<CardRequest>> {
        let mut requests = match &self.file {
            Some(path) => load_decklist(path)
                .await
                .with_context(|| format!("Failed to read decklist {}", path.display()))?,
            None => Vec::new(),
        };
        requests.extend(self.cards.iter().filter_map(|card| parse_line(card)));
        Ok(requests)
    }
}

fn progress_printer() -> mtg_proxy::ProgressObserver {
    Box::new(|progress: &Progress| match &progress.outcome {
        Ok(label) => println!("[{}/{}] ✓ {}", progress.processed, progress.total, label),
        Err(kind) => println!(
            "[{}/{}] ✗ {} ({})",
            progress.processed, progress.total, progress.requested_name, kind
        ),
    })
}

/// Failed names, at most [`LISTED_FAILURES`] of them, then a count of the rest.
fn failure_summary(failures: &[CardFailure]) -> String {
    let mut names: Vec<String> = failures
        .iter()
        .take(LISTED_FAILURES)
        .map(|f| f.requested_name.clone())
        .collect();
    if failures.len() > LISTED_FAILURES {
        names.push(format!("and {} more", failures.len() - LISTED_FAILURES));
    }
    names.join(", ")
}

fn print_statistics(stats: &SheetStatistics) {
    println!("Sheet Statistics:");
    println!("  Cards: {}", stats.cards);
    println!("  Pages: {}", stats.pages);
    println!("  Cards per page: {}", stats.cards_per_page);
    println!("  Empty slots: {}", stats.empty_slots);
}

fn print_failures(failures: &[CardFailure]) {
    if failures.is_empty() {
        return;
    }
    println!("Errors ({}): {}", failures.len(), failure_summary(failures));
    for failure in failures {
        log::info!("{}", failure);
    }
}

fn print_summary(report: &RunReport, options: &ProxyOptions) {
    println!(
        "Generated {} cards on {} page(s) → {}",
        report.statistics.cards,
        report.statistics.pages,
        options.output_path.display()
    );
    print_failures(&report.failures);
    println!("Print at 100% scale (no \"fit to page\") for accurate card size.");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logger = ConsoleLogger::new(ConsoleLogger::level_for(cli.verbose, cli.quiet), 1000);
    logger.clone().init()?;

    let options = cli.options().await?;
    if let Some(path) = &cli.save_config {
        options.save(path).await?;
        println!("Saved options → {}", path.display());
    }

    let requests = cli.requests().await?;
    if requests.is_empty() {
        bail!("No cards specified. Pass cards as arguments or use --file");
    }

    let copies: u32 = requests.iter().map(|r| r.quantity).sum();
    println!("Processing {} entries ({} cards)...", requests.len(), copies);

    let observer = (!cli.quiet).then(progress_printer);

    let result = if cli.stats_only {
        mtg_proxy::prepare_proxies(requests, options.clone(), observer).await
    } else {
        mtg_proxy::generate_proxies(requests, options.clone(), observer).await
    };

    let report = match result {
        Ok(report) => report,
        Err(ProxyError::EmptyResult(failures)) => {
            print_failures(&failures);
            bail!("No cards could be placed");
        }
        Err(e) => return Err(e.into()),
    };

    if cli.stats_only {
        print_statistics(&report.statistics);
        print_failures(&report.failures);
    } else {
        print_summary(&report, &options);
    }

    let warnings = logger.count_at_least(log::Level::Warn);
    if warnings > 0 && !cli.quiet {
        println!("{} warning(s) logged", warnings);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtg_proxy::FailureKind;

    fn failures(n: usize) -> Vec<CardFailure> {
        (0..n)
            .map(|i| CardFailure::new(format!("Card {}", i), FailureKind::CardNotFound, ""))
            .collect()
    }

    #[test]
    fn test_short_failure_list() {
        assert_eq!(failure_summary(&failures(2)), "Card 0, Card 1");
    }

    #[test]
    fn test_long_failure_list_collapses() {
        assert_eq!(
            failure_summary(&failures(8)),
            "Card 0, Card 1, Card 2, Card 3, Card 4, and 3 more"
        );
    }

    #[tokio::test]
    async fn test_flags_override_config() {
        let cli = Cli::parse_from(["mtgp", "--dpi", "150", "--no-cache", "--paper", "a4"]);
        let options = cli.options().await.unwrap();

        assert_eq!(options.dpi, 150);
        assert!(!options.use_cache);
        assert_eq!(options.paper_size, PaperSize::A4);
        assert_eq!(options.rows, 3);
    }

    #[tokio::test]
    async fn test_inline_cards_follow_file() {
        let cli = Cli::parse_from(["mtgp", "2 Forest", "Sol Ring", "0 Island"]);
        let requests = cli.requests().await.unwrap();

        assert_eq!(
            requests,
            vec![CardRequest::new("Forest", 2), CardRequest::new("Sol Ring", 1)]
        );
    }
}
