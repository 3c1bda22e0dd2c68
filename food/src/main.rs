//! Today Food - picks something to eat so you don't have to.
//!
//! Reads commands from stdin, one per line:
//!
//! ```bash
//! echo "pick lunch" | cargo run -p food -- --seed 42
//! ```

mod headless;
mod shuffle;

use food_core::{FoodStore, StoreConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shuffle::ShuffleEffect;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Command-line overrides applied on top of the environment.
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    help: bool,
    seed: Option<u64>,
    data_dir: Option<PathBuf>,
    window: Option<usize>,
    no_anim: bool,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => options.help = true,
            "--no-anim" => options.no_anim = true,
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                options.seed = Some(
                    value
                        .parse()
                        .map_err(|_| format!("Invalid seed '{value}'"))?,
                );
            }
            "--window" => {
                let value = iter.next().ok_or("--window needs a value")?;
                options.window = Some(
                    value
                        .parse()
                        .map_err(|_| format!("Invalid window size '{value}'"))?,
                );
            }
            "--data-dir" => {
                let value = iter.next().ok_or("--data-dir needs a value")?;
                options.data_dir = Some(PathBuf::from(value));
            }
            other => return Err(format!("Unknown option '{other}'")),
        }
    }

    Ok(options)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("food=info,food_core=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {message}");
            eprintln!("Run with --help for usage.");
            std::process::exit(2);
        }
    };

    if options.help {
        print_help();
        return Ok(());
    }

    let mut config = StoreConfig::from_env()?;
    if let Some(seed) = options.seed {
        config = config.with_seed(seed);
    }
    if let Some(window) = options.window {
        config = config.with_recent_window(window);
    }
    if let Some(dir) = options.data_dir {
        config = config.with_data_dir(dir);
    }

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };
    let mut store = FoodStore::new(config);
    tracing::info!(backend = store.storage_backend(), "Store ready");

    let shuffle = if options.no_anim {
        ShuffleEffect::new(0, Duration::ZERO)
    } else {
        ShuffleEffect::default()
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    headless::Shell::new(shuffle, rng).run(&mut store, stdin.lock(), &mut stdout)?;
    Ok(())
}

fn print_help() {
    println!("Today Food - what should I eat?");
    println!();
    println!("USAGE:");
    println!("  food [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help          Show this help message");
    println!("  --seed <N>          Seed the picker for reproducible picks");
    println!("  --window <N>        Number of recent picks to avoid (default: 3)");
    println!("  --data-dir <DIR>    Where to keep the menu and history");
    println!("  --no-anim           Skip the shuffle animation");
    println!();
    println!("ENVIRONMENT:");
    println!("  TODAY_FOOD_DATA_DIR, TODAY_FOOD_LOCAL_STORE, TODAY_FOOD_SEED,");
    println!("  TODAY_FOOD_CATEGORIES, TODAY_FOOD_RECENT_WINDOW, RUST_LOG");
    println!();
    println!("EXAMPLES:");
    println!("  food                                   # Interactive shell");
    println!("  echo 'pick dinner 2' | food --seed 7   # Scripted pick");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("food")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args_defaults() {
        assert_eq!(parse_args(&args(&[])), Ok(Options::default()));
    }

    #[test]
    fn test_parse_args_all() {
        let options = parse_args(&args(&[
            "--seed",
            "42",
            "--window",
            "5",
            "--data-dir",
            "/tmp/food",
            "--no-anim",
        ]))
        .unwrap();

        assert_eq!(options.seed, Some(42));
        assert_eq!(options.window, Some(5));
        assert_eq!(options.data_dir, Some(PathBuf::from("/tmp/food")));
        assert!(options.no_anim);
        assert!(!options.help);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&["--seed"])).is_err());
        assert!(parse_args(&args(&["--seed", "abc"])).is_err());
        assert!(parse_args(&args(&["--headless"])).is_err());
        assert!(parse_args(&args(&["-h"])).unwrap().help);
    }
}
