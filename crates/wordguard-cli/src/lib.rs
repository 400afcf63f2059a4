// wordguard-cli: shared utilities for CLI tools.

use std::io::{self, BufRead, BufWriter, StdoutLock};
use std::path::PathBuf;
use std::process;

use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use wordguard_screen::{Screen, ScreenConfig};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "WORDGUARD_LOG";

/// Environment variable naming a JSON config file.
const CONFIG_ENV: &str = "WORDGUARD_CONFIG";

/// Options shared by every tool.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CommonArgs {
    /// JSON config file (`-c`, `--config`).
    pub config: Option<String>,
    /// Word list, one word per line (`-d`, `--dict`).
    pub dict: Option<String>,
}

/// Install the stderr log subscriber. The filter comes from `WORDGUARD_LOG`
/// and defaults to `warn`.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Build a `Screen` from the command-line options.
///
/// The config file comes from `-c`, then `WORDGUARD_CONFIG`; without one the
/// defaults apply. A `-d` word list becomes the user dictionary. Fails when
/// no word could be loaded.
pub fn load_screen(args: &CommonArgs) -> Result<Screen, String> {
    let config_path = args
        .config
        .clone()
        .or_else(|| std::env::var(CONFIG_ENV).ok());
    let mut config = match &config_path {
        Some(path) => {
            debug!(path = %path, "reading configuration");
            ScreenConfig::from_json_file(path).map_err(|e| e.to_string())?
        }
        None => ScreenConfig::default(),
    };

    if let Some(dict) = &args.dict {
        let path = PathBuf::from(dict);
        if !path.is_file() {
            return Err(format!("dictionary {} does not exist", path.display()));
        }
        config.word_path = Some(path);
    }

    let screen = Screen::new(config);
    if !screen.warmup() {
        return Err("word library is empty: pass -d PATH or set word_path in the config".into());
    }
    debug!(words = screen.word_count(), "word library ready");
    Ok(screen)
}

/// Split `-c/--config PATH` and `-d/--dict PATH` (or their `--flag=PATH`
/// forms) from the rest of the arguments.
///
/// Returns `(common, remaining_args)`.
pub fn parse_common_args(args: &[String]) -> (CommonArgs, Vec<String>) {
    let mut common = CommonArgs::default();
    let mut remaining = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix("--config=") {
            common.config = Some(val.to_string());
        } else if let Some(val) = arg.strip_prefix("--dict=") {
            common.dict = Some(val.to_string());
        } else if arg == "-c" || arg == "--config" {
            common.config = Some(required_value(arg, iter.next()));
        } else if arg == "-d" || arg == "--dict" {
            common.dict = Some(required_value(arg, iter.next()));
        } else {
            remaining.push(arg.clone());
        }
    }

    (common, remaining)
}

/// The value following `flag`, or exit with an error.
pub fn required_value(flag: &str, value: Option<&String>) -> String {
    match value {
        Some(v) => v.clone(),
        None => fatal(&format!("{flag} requires a value")),
    }
}

/// Run `f` over each non-empty stdin line, with a buffered stdout writer.
pub fn for_each_line<F>(mut f: F)
where
    F: FnMut(&str, &mut BufWriter<StdoutLock<'_>>),
{
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        f(&line, &mut out);
    }
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

/// Check if `--max` is in the args.
pub fn wants_max(args: &[String]) -> bool {
    args.iter().any(|a| a == "--max")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn common_args_are_split_out() {
        let (common, rest) = parse_common_args(&args(&["-d", "words.txt", "--max", "--config=c.json"]));
        assert_eq!(common.dict.as_deref(), Some("words.txt"));
        assert_eq!(common.config.as_deref(), Some("c.json"));
        assert_eq!(rest, args(&["--max"]));
    }

    #[test]
    fn long_flags_take_next_value() {
        let (common, rest) = parse_common_args(&args(&["--dict", "a.txt", "--config", "b.json"]));
        assert_eq!(common.dict.as_deref(), Some("a.txt"));
        assert_eq!(common.config.as_deref(), Some("b.json"));
        assert!(rest.is_empty());
    }

    #[test]
    fn help_and_max_flags() {
        assert!(wants_help(&args(&["-h"])));
        assert!(!wants_help(&args(&["--max"])));
        assert!(wants_max(&args(&["--max"])));
    }

    #[test]
    fn load_screen_from_dict() {
        let dir = tempfile::tempdir().unwrap();
        let dict = dir.path().join("words.txt");
        std::fs::write(&dict, "坏蛋\n").unwrap();
        let common = CommonArgs {
            config: None,
            dict: Some(dict.display().to_string()),
        };
        let screen = load_screen(&common).unwrap();
        assert!(screen.check("你是坏蛋"));
    }

    #[test]
    fn load_screen_rejects_missing_dict() {
        let common = CommonArgs {
            config: None,
            dict: Some("/nonexistent/words.txt".into()),
        };
        assert!(load_screen(&common).is_err());
    }
}
