//! Both-backend parity tests: the same source data must yield the same
//! definitions from the memory and table backends, with ordering guarantees
//! differing only where documented.

use std::fs;
use tempfile::TempDir;

use endict::prelude::*;

const SOURCE: &str = "hello\t你好\n\
                      help\t帮助\n\
                      her\t她的\n\
                      here\t这里\n\
                      hexagon\t六边形\n\
                      heavy\t重的\n\
                      Beijing\t北京\n\
                      world\t世界\n";

struct Fixture {
    _dir: TempDir,
    memory: MemoryStore,
    table: TableStore,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let data_path = dir.path().join("endict.txt");
    fs::write(&data_path, SOURCE).unwrap();

    let memory = MemoryStore::load(&data_path).unwrap();
    let table = TableStore::import_file(dir.path().join("db"), &data_path).unwrap();
    Fixture {
        _dir: dir,
        memory,
        table,
    }
}

#[test]
fn test_every_source_word_resolves_in_both_backends() {
    let f = fixture();
    let words = [
        "hello", "help", "her", "here", "hexagon", "heavy", "Beijing", "world",
    ];
    for word in words {
        let from_memory = f.memory.get_definition(word).unwrap();
        let from_table = f.table.get_definition(word).unwrap();
        assert!(from_memory.is_some(), "{word} missing from memory backend");
        assert_eq!(from_memory, from_table, "definition mismatch for {word}");

        // The lowercase form resolves too, via the alias entry when the
        // source spelling had uppercase characters.
        let lower = word.to_lowercase();
        assert_eq!(
            f.memory.get_definition(&lower).unwrap(),
            f.table.get_definition(&lower).unwrap(),
            "alias mismatch for {lower}"
        );
        assert!(f.memory.get_definition(&lower).unwrap().is_some());
    }
}

#[test]
fn test_no_alias_generated_for_all_lowercase_words() {
    // "hello" is already lowercase, so no uppercase variant was stored:
    // only the exact spelling resolves.
    let f = fixture();
    for store in [&f.memory as &dyn WordStore, &f.table as &dyn WordStore] {
        assert_eq!(store.get_definition("hello").unwrap().as_deref(), Some("你好"));
        assert_eq!(store.get_definition("HELLO").unwrap(), None);
        assert_eq!(store.get_definition("Hello").unwrap(), None);
    }
}

#[test]
fn test_prefix_lookup_respects_limit_in_both_backends() {
    let f = fixture();
    for store in [&f.memory as &dyn WordStore, &f.table as &dyn WordStore] {
        let matches = store.prefix_lookup("he", 5).unwrap();
        assert_eq!(matches.len(), 5);
        assert!(matches.iter().all(|w| w.starts_with("he")));

        let all = store.prefix_lookup("he", 30).unwrap();
        assert_eq!(all.len(), 6);
    }
}

#[test]
fn test_table_prefix_results_are_sorted() {
    let f = fixture();
    let matches = f.table.prefix_lookup("he", 30).unwrap();
    let mut sorted = matches.clone();
    sorted.sort();
    assert_eq!(matches, sorted, "table backend scans must be lexicographic");
}

#[test]
fn test_memory_prefix_results_follow_insertion_order() {
    let f = fixture();
    let matches = f.memory.prefix_lookup("he", 30).unwrap();
    assert_eq!(
        matches,
        vec!["hello", "help", "her", "here", "hexagon", "heavy"]
    );
}

#[test]
fn test_stats_footprint_smaller_on_table_backend() {
    let dir = TempDir::new().unwrap();
    let entries: Vec<Entry> = (0..2_000)
        .map(|i| Entry {
            key: format!("entry{i:05}"),
            definition: format!("定义{i}"),
            display: None,
        })
        .collect();

    let memory = MemoryStore::from_entries(entries.clone());
    let table = TableStore::import(dir.path(), entries).unwrap();

    assert_eq!(memory.stats().entries, table.stats().entries);
    assert!(
        table.stats().resident_bytes < memory.stats().resident_bytes / 4,
        "sparse index should be far smaller than the full map ({} vs {})",
        table.stats().resident_bytes,
        memory.stats().resident_bytes
    );
}

#[test]
fn test_round_trip_same_queries_same_answers() {
    // Construction order must not matter for correctness: both backends
    // agree on key sets and definitions, differing only in scan order.
    let f = fixture();
    for prefix in ["h", "he", "w", "bei", "Bei", "zzz"] {
        let mut from_memory = f.memory.prefix_lookup(prefix, 30).unwrap();
        let mut from_table = f.table.prefix_lookup(prefix, 30).unwrap();
        from_memory.sort();
        from_table.sort();
        assert_eq!(from_memory, from_table, "prefix {prefix}");

        for key in &from_memory {
            assert!(key.starts_with(prefix));
            assert_eq!(
                f.memory.get_definition(key).unwrap(),
                f.table.get_definition(key).unwrap(),
                "definition mismatch for {key}"
            );
        }
    }
}
