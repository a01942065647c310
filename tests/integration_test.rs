use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::thread;

use flate2::read::GzDecoder;
use splitcsv::{CsvReader, LineEnding, ReaderOptions, Record, SplitReader};

const TEST_DATA_DIR: &str = "tests/test_data";

fn data_path(name: &str) -> PathBuf {
    Path::new(TEST_DATA_DIR).join(name)
}

fn options(line_ending: LineEnding) -> ReaderOptions {
    ReaderOptions::new().with_line_ending(line_ending)
}

#[derive(Debug, PartialEq, Eq)]
struct TradeStats {
    record_count: usize,
    id_sum: u64,
    null_notes: usize,
    quoted_notes: usize,
    null_prices: usize,
    first_note: String,
}

fn trade_stats<I: Iterator<Item = Result<Record, splitcsv::ReaderError>>>(records: I) -> TradeStats {
    let mut stats = TradeStats {
        record_count: 0,
        id_sum: 0,
        null_notes: 0,
        quoted_notes: 0,
        null_prices: 0,
        first_note: String::new(),
    };

    for (i, record) in records.enumerate() {
        let record = record.expect("Failed to parse CSV");
        assert_eq!(record.len(), 4, "record {i} has wrong width");
        stats.record_count += 1;
        if i == 0 {
            continue;
        }

        let id = std::str::from_utf8(record.get(0).unwrap()).unwrap();
        stats.id_sum += id.parse::<u64>().unwrap();

        match record.get(2) {
            None => stats.null_notes += 1,
            Some(note) => {
                if note.contains(&b'"') {
                    stats.quoted_notes += 1;
                }
                if i == 1 {
                    stats.first_note = String::from_utf8_lossy(note).to_string();
                }
            }
        }
        if record.is_null(3) {
            stats.null_prices += 1;
        }
    }

    stats
}

fn expected_stats() -> TradeStats {
    TradeStats {
        record_count: 51,
        id_sum: 1275,
        null_notes: 13,
        quoted_notes: 10,
        null_prices: 7,
        first_note: "note 1, ok".to_string(),
    }
}

/// Splits a file into `parts` ranges whose boundaries land one byte into a line, where
/// the id column is never quoted.
fn mid_record_boundaries(data: &[u8], parts: usize) -> Vec<u64> {
    let mut bounds = vec![0u64];
    for i in 1..parts {
        let approx = data.len() * i / parts;
        let Some(nl) = data[approx..].iter().position(|&b| b == b'\n') else {
            break;
        };
        let boundary = (approx + nl + 2).min(data.len()) as u64;
        if boundary > *bounds.last().unwrap() {
            bounds.push(boundary);
        }
    }
    bounds.push(data.len() as u64);
    bounds
}

fn read_splits_in_parallel(path: &Path, bounds: &[u64], options: ReaderOptions) -> Vec<Record> {
    thread::scope(|scope| {
        let handles: Vec<_> = bounds
            .windows(2)
            .map(|range| {
                let (offset, end) = (range[0], range[1]);
                scope.spawn(move || {
                    let file = File::open(path).unwrap();
                    let split =
                        SplitReader::open(path.display().to_string(), file, offset, end, options)
                            .unwrap();
                    split.map(Result::unwrap).collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect()
    })
}

#[test]
fn test_trades_lf() {
    let path = data_path("trades.csv");
    if !path.exists() {
        panic!("File not found: {}", path.display());
    }

    let file = File::open(&path).unwrap();
    let stats = trade_stats(CsvReader::with_options(file, options(LineEnding::Lf)));

    assert_eq!(stats, expected_stats());
}

#[test]
fn test_trades_crlf() {
    let path = data_path("trades_crlf.csv");
    if !path.exists() {
        panic!("File not found: {}", path.display());
    }

    let file = File::open(&path).unwrap();
    let stats = trade_stats(CsvReader::with_options(file, options(LineEnding::CrLf)));

    assert_eq!(stats, expected_stats());
}

#[test]
fn test_trades_gzip() {
    let path = data_path("trades.csv.gz");
    if !path.exists() {
        panic!("File not found: {}", path.display());
    }

    let file = File::open(&path).unwrap();
    let decoder = GzDecoder::new(file);
    let stats = trade_stats(CsvReader::with_options(decoder, options(LineEnding::Lf)));

    assert_eq!(stats, expected_stats());
}

#[test]
fn test_lf_vs_crlf_consistency() {
    let lf_path = data_path("trades.csv");
    let crlf_path = data_path("trades_crlf.csv");

    let lf: Vec<Record> = CsvReader::with_options(File::open(&lf_path).unwrap(), options(LineEnding::Lf))
        .map(Result::unwrap)
        .collect();
    let crlf: Vec<Record> =
        CsvReader::with_options(File::open(&crlf_path).unwrap(), options(LineEnding::CrLf))
            .map(Result::unwrap)
            .collect();

    assert_eq!(lf, crlf);
}

#[test]
fn test_crlf_without_stripping_keeps_carriage_returns() {
    let path = data_path("trades_crlf.csv");
    let mut reader = CsvReader::with_options(File::open(&path).unwrap(), options(LineEnding::Lf));

    let header = reader.next_record().unwrap().unwrap();
    assert_eq!(header.get(3), Some(&b"price\r"[..]));
}

#[test]
fn test_trades_parallel_splits() {
    let path = data_path("trades.csv");
    let data = fs::read(&path).unwrap();
    let whole: Vec<Record> = CsvReader::with_options(&data[..], options(LineEnding::Lf))
        .map(Result::unwrap)
        .collect();

    for parts in 2..=8 {
        let bounds = mid_record_boundaries(&data, parts);
        let records = read_splits_in_parallel(&path, &bounds, options(LineEnding::Lf));
        assert_eq!(records, whole, "{parts} splits at {bounds:?}");
    }
}

#[test]
fn test_large_generated_file_in_parallel_splits() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for i in 0..10_000 {
        writeln!(file, "{i},\"row {i}, \"\"quoted\"\"\",{}", i * 3).unwrap();
    }
    file.flush().unwrap();

    let mut data = Vec::new();
    File::open(file.path()).unwrap().read_to_end(&mut data).unwrap();

    let bounds = mid_record_boundaries(&data, 16);
    let records = read_splits_in_parallel(file.path(), &bounds, options(LineEnding::Lf));

    assert_eq!(records.len(), 10_000);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.get(0), Some(i.to_string().as_bytes()));
        assert_eq!(record.get(1), Some(format!("row {i}, \"quoted\"").as_bytes()));
    }
}
