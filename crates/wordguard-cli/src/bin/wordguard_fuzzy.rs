// wordguard-fuzzy: Find obfuscated sensitive words in lines from stdin.
//
// Reports dictionary words that occur in a line as a subsequence with
// filler between their characters ("坏x蛋"), after false-positive filters:
//   F: word
//
// Usage:
//   wordguard-fuzzy [-c CONFIG] [-d DICT] [OPTIONS]
//
// Options:
//   -c, --config PATH   JSON config file
//   -d, --dict PATH     Word list, one word per line
//   --limit N           Report at most N words per line
//   --no-filters        Skip the boundary, length and context filters
//   -h, --help          Print help

use std::io::Write;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (common, args) = wordguard_cli::parse_common_args(&args);

    if wordguard_cli::wants_help(&args) {
        println!("wordguard-fuzzy: Find obfuscated sensitive words in lines from stdin.");
        println!();
        println!("Usage: wordguard-fuzzy [-c CONFIG] [-d DICT] [OPTIONS]");
        println!();
        println!("Prints one line per finding:");
        println!("  F: word");
        println!();
        println!("Options:");
        println!("  -c, --config PATH   JSON config file");
        println!("  -d, --dict PATH     Word list, one word per line");
        println!("  --limit N           Report at most N words per line");
        println!("  --no-filters        Skip the boundary, length and context filters");
        println!("  -h, --help          Print this help");
        return;
    }

    let mut limit: Option<usize> = None;
    let mut no_filters = false;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--limit" => {
                let value = wordguard_cli::required_value(arg, iter.next());
                limit = Some(
                    value
                        .parse()
                        .unwrap_or_else(|_| wordguard_cli::fatal("invalid number for --limit")),
                );
            }
            "--no-filters" => no_filters = true,
            _ => {}
        }
    }

    wordguard_cli::init_logging();
    let mut screen =
        wordguard_cli::load_screen(&common).unwrap_or_else(|e| wordguard_cli::fatal(&e));
    if no_filters {
        screen.filter_chain_mut().clear();
    }

    wordguard_cli::for_each_line(|line, out| {
        for word in screen.fuzzy_bad_words(line, limit) {
            let _ = writeln!(out, "F: {word}");
        }
    });
}
