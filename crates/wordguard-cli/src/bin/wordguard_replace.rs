// wordguard-replace: Mask sensitive words in lines from stdin.
//
// Reads text from stdin (one message per line) and prints each line with
// every detected word replaced. By default each matched character becomes
// the replacement character; --no-repeat collapses a word to a single one.
//
// Usage:
//   wordguard-replace [-c CONFIG] [-d DICT] [OPTIONS]
//
// Options:
//   -c, --config PATH   JSON config file
//   -d, --dict PATH     Word list, one word per line
//   --char C            Replacement text (default: config replace_char, "*")
//   --no-repeat         Replace each word once instead of per character
//   --max               Replace the longest word at each position
//   -h, --help          Print help

use std::io::Write;

use wordguard_core::MatchType;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (common, args) = wordguard_cli::parse_common_args(&args);

    if wordguard_cli::wants_help(&args) {
        println!("wordguard-replace: Mask sensitive words in lines from stdin.");
        println!();
        println!("Usage: wordguard-replace [-c CONFIG] [-d DICT] [OPTIONS]");
        println!();
        println!("Options:");
        println!("  -c, --config PATH   JSON config file");
        println!("  -d, --dict PATH     Word list, one word per line");
        println!("  --char C            Replacement text (default: *)");
        println!("  --no-repeat         Replace each word once instead of per character");
        println!("  --max               Replace the longest word at each position");
        println!("  -h, --help          Print this help");
        return;
    }

    let mut replacement: Option<String> = None;
    let mut no_repeat = false;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--char" => replacement = Some(wordguard_cli::required_value(arg, iter.next())),
            "--no-repeat" => no_repeat = true,
            _ => {}
        }
    }
    let match_type = if wordguard_cli::wants_max(&args) {
        MatchType::Max
    } else {
        MatchType::Min
    };

    wordguard_cli::init_logging();
    let screen = wordguard_cli::load_screen(&common).unwrap_or_else(|e| wordguard_cli::fatal(&e));

    let replacement = replacement.unwrap_or_else(|| screen.config().replace_char.clone());
    let repeat = !no_repeat && screen.config().repeat_char;

    wordguard_cli::for_each_line(|line, out| {
        let replaced = screen.replace(line, &replacement, repeat, match_type);
        let _ = writeln!(out, "{replaced}");
    });
}
