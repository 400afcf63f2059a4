// wordguard-check: Screen lines from stdin for sensitive words.
//
// Reads text from stdin (one message per line) and reports whether each
// line is clean:
//   C: line    (clean)
//   W: line    (contains sensitive words)
//   S: word    (each distinct word found, after a W line)
//
// Usage:
//   wordguard-check [-c CONFIG] [-d DICT] [OPTIONS]
//
// Options:
//   -c, --config PATH   JSON config file
//   -d, --dict PATH     Word list, one word per line
//   --max               Report the longest word at each position
//   -q, --quiet         Print only W lines, without the words found
//   -h, --help          Print help

use std::io::Write;

use wordguard_core::MatchType;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (common, args) = wordguard_cli::parse_common_args(&args);

    if wordguard_cli::wants_help(&args) {
        println!("wordguard-check: Screen lines from stdin for sensitive words.");
        println!();
        println!("Usage: wordguard-check [-c CONFIG] [-d DICT] [OPTIONS]");
        println!();
        println!("Reads text from stdin (one message per line). Prints:");
        println!("  C: line    (clean)");
        println!("  W: line    (contains sensitive words)");
        println!("  S: word    (each word found)");
        println!();
        println!("Options:");
        println!("  -c, --config PATH   JSON config file");
        println!("  -d, --dict PATH     Word list, one word per line");
        println!("  --max               Report the longest word at each position");
        println!("  -q, --quiet         Print only W lines, without the words found");
        println!("  -h, --help          Print this help");
        return;
    }

    let match_type = if wordguard_cli::wants_max(&args) {
        MatchType::Max
    } else {
        MatchType::Min
    };
    let quiet = args.iter().any(|a| a == "-q" || a == "--quiet");

    wordguard_cli::init_logging();
    let screen = wordguard_cli::load_screen(&common).unwrap_or_else(|e| wordguard_cli::fatal(&e));

    wordguard_cli::for_each_line(|line, out| {
        let found = screen.list_bad_words_detailed(line, match_type, None);
        if found.is_empty() {
            if !quiet {
                let _ = writeln!(out, "C: {line}");
            }
            return;
        }
        let _ = writeln!(out, "W: {line}");
        if quiet {
            return;
        }
        let mut seen: Vec<&str> = Vec::new();
        for m in &found {
            if !seen.contains(&m.word.as_str()) {
                seen.push(&m.word);
                let _ = writeln!(out, "S: {}", m.word);
            }
        }
    });
}
