// wordguard-mark: Highlight sensitive words in lines from stdin.
//
// Usage:
//   wordguard-mark [-c CONFIG] [-d DICT] [--start TAG] [--end TAG] [--max]

use std::io::Write;

use wordguard_core::MatchType;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (common, args) = wordguard_cli::parse_common_args(&args);

    if wordguard_cli::wants_help(&args) {
        println!("wordguard-mark: Highlight sensitive words in lines from stdin.");
        println!();
        println!("Usage: wordguard-mark [-c CONFIG] [-d DICT] [OPTIONS]");
        println!();
        println!("Options:");
        println!("  -c, --config PATH   JSON config file");
        println!("  -d, --dict PATH     Word list, one word per line");
        println!("  --start TAG         Opening tag (default: <mark>)");
        println!("  --end TAG           Closing tag (default: </mark>)");
        println!("  --max               Mark the longest word at each position");
        println!("  -h, --help          Print this help");
        return;
    }

    let mut start_tag = "<mark>".to_string();
    let mut end_tag = "</mark>".to_string();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--start" => start_tag = wordguard_cli::required_value(arg, iter.next()),
            "--end" => end_tag = wordguard_cli::required_value(arg, iter.next()),
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

    wordguard_cli::for_each_line(|line, out| {
        let marked = screen.mark(line, &start_tag, &end_tag, match_type);
        let _ = writeln!(out, "{marked}");
    });
}
