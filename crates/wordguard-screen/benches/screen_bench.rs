// Criterion benchmarks for wordguard-screen.
//
// The dictionary and corpus are generated, so no data files are needed.
//
// Run:
//   cargo bench -p wordguard-screen --features handle

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use wordguard_automaton::{Dictionary, Scanner};
use wordguard_core::MatchType;
use wordguard_screen::Screen;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Pseudo-random CJK words of two to four characters.
fn generate_words(count: usize) -> Vec<String> {
    let mut state: u32 = 0x2545_F491;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state
    };
    (0..count)
        .map(|_| {
            let len = 2 + (next() % 3) as usize;
            (0..len)
                .filter_map(|_| char::from_u32(0x4E00 + next() % 2000))
                .collect()
        })
        .collect()
}

/// Prose of `len` characters with a dictionary word every forty characters.
fn generate_text(words: &[String], len: usize) -> Vec<char> {
    let filler: Vec<char> = "今天天气很好我们一起去公园散步然后回家吃饭".chars().collect();
    let mut text = Vec::with_capacity(len);
    let mut i = 0;
    while text.len() < len {
        if i % 40 == 0 {
            text.extend(words[(i / 40) % words.len()].chars());
        }
        text.push(filler[i % filler.len()]);
        i += 1;
    }
    text.truncate(len);
    text
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Prefix-index search against the plain trie walk on the same text.
fn bench_scan(c: &mut Criterion) {
    let words = generate_words(5_000);
    let text = generate_text(&words, 2_000);

    let mut indexed = Dictionary::new(true);
    indexed.set_words(&words);
    let mut plain = Dictionary::new(false);
    plain.set_words(&words);

    let mut group = c.benchmark_group("scan_2000_chars");
    for match_type in [MatchType::Min, MatchType::Max] {
        group.bench_function(format!("prefix_index_{match_type:?}"), |b| {
            b.iter(|| black_box(indexed.scan(black_box(&text), match_type)));
        });
        group.bench_function(format!("trie_walk_{match_type:?}"), |b| {
            b.iter(|| black_box(plain.scan(black_box(&text), match_type)));
        });
    }
    group.finish();
}

/// Full `Screen` path: normalization, scan and whitelist.
fn bench_screen(c: &mut Criterion) {
    let words = generate_words(5_000);
    let text: String = generate_text(&words, 2_000).into_iter().collect();
    let screen = Screen::from_words(&words);
    screen.warmup();

    c.bench_function("check_2000_chars", |b| {
        b.iter(|| black_box(screen.check(black_box(&text))));
    });
    c.bench_function("replace_2000_chars", |b| {
        b.iter(|| black_box(screen.replace(black_box(&text), "*", true, MatchType::Max)));
    });
}

/// Fuzzy detection over a short message, memo cleared each round.
fn bench_fuzzy(c: &mut Criterion) {
    let words = generate_words(500);
    let screen = Screen::from_words(&words);
    let text: String = words[7].chars().flat_map(|ch| [ch, '*', 'x']).collect();

    c.bench_function("fuzzy_500_words", |b| {
        b.iter(|| {
            screen.clear_fuzzy_cache();
            black_box(screen.fuzzy_bad_words(black_box(&text), None))
        });
    });
}

criterion_group!(benches, bench_scan, bench_screen, bench_fuzzy);
criterion_main!(benches);
