use clap::Parser;
use mmsearch::config;
use mmsearch::engine::{search, SearchOptions};
use mmsearch::opener::open_result;
use std::path::PathBuf;
use std::process::ExitCode;

/// Search FreeMind mind maps across a folder.
#[derive(Parser)]
#[command(name = "mmsearch", version, about)]
struct Cli {
    /// Text to look for in node text (and in notes with --notes)
    query: Option<String>,

    /// Folder to search; defaults to the saved default folder
    #[arg(long)]
    root: Option<PathBuf>,

    /// Also search inside notes
    #[arg(long)]
    notes: bool,

    /// Recurse into subfolders
    #[arg(long, short = 'r')]
    recursive: bool,

    /// Reject queries shorter than this many characters
    #[arg(long, default_value_t = 1, value_name = "LEN")]
    min_query_len: usize,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Open the N-th result (1-based) with the default viewer
    #[arg(long, value_name = "N")]
    open: Option<usize>,

    /// Remember FOLDER as the default root and exit
    #[arg(long, value_name = "FOLDER")]
    set_default_folder: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let pref_path = config::default_folder_pref_path();

    if let Some(folder) = cli.set_default_folder {
        if let Err(e) = config::save_default_folder(&pref_path, &folder) {
            eprintln!("Failed to save default folder: {}", e);
            return ExitCode::FAILURE;
        }
        println!("Default folder set to {}", folder.display());
        return ExitCode::SUCCESS;
    }

    let Some(query) = cli.query else {
        eprintln!("No query given.");
        return ExitCode::FAILURE;
    };

    let Some(root) = cli.root.or_else(|| config::load_default_folder(&pref_path)) else {
        eprintln!("No root folder given and no default saved; use --root or --set-default-folder.");
        return ExitCode::FAILURE;
    };

    let mut options = SearchOptions::new(query, &root);
    options.search_notes = cli.notes;
    options.include_subfolders = cli.recursive;
    options.min_query_len = cli.min_query_len;

    let results = search(&options);

    if cli.json {
        match serde_json::to_string_pretty(&results) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to encode results: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else if results.is_empty() {
        println!("No matches.");
    } else {
        for (i, result) in results.iter().enumerate() {
            println!("{:3}. {}", i + 1, result);
        }
    }

    if let Some(n) = cli.open {
        let Some(result) = n.checked_sub(1).and_then(|i| results.get(i)) else {
            eprintln!("No result #{} to open.", n);
            return ExitCode::FAILURE;
        };
        if let Err(e) = open_result(result, &root) {
            eprintln!("Failed to open file: {}", e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
