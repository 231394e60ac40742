//! End-to-end tests: exported pages on disk through merge, write, sort and tally.

use bibsort::bench::{Benchmark, RunStatus};
use bibsort::bibtex::read_records;
use bibsort::dedupe::{MergeConfig, merge_sources};
use bibsort::tally::AuthorTally;
use bibsort::{Algorithm, BibtexParser, BibtexWriter, sort_records};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const IEEE_PAGE_1: &str = r#"@article{ieee1,
  title = {A Study},
  author = {Smith, John and Doe, Jane},
  year = {2021},
  journal = {IEEE Access}
}

@inproceedings{ieee2,
  title = {Generative {AI} in {Caf\'e}s},
  author = {Doe, Jane},
  year = {2019}
}
"#;

const IEEE_PAGE_2: &str = r#"@article{ieee3,
  title = {B Study},
  author = {M{\"u}ller, Hans and Doe, Jane},
  year = 2020,
}
"#;

const SCIENCE_DIRECT_PAGE_1: &str = r#"@article{sd1,
  title = "A study",
  author = "Smith, John",
  year = "2021"
}

@article{sd2,
  title = {Undated Survey},
  author = {Müller, Hans},
  year = {n.d.}
}
"#;

fn write_exports(base: &Path) {
    let ieee = base.join("ieee");
    let science_direct = base.join("science_direct");
    fs::create_dir_all(&ieee).unwrap();
    fs::create_dir_all(&science_direct).unwrap();
    fs::write(ieee.join("page2.bib"), IEEE_PAGE_2).unwrap();
    fs::write(ieee.join("page1.bib"), IEEE_PAGE_1).unwrap();
    fs::write(science_direct.join("page1.bib"), SCIENCE_DIRECT_PAGE_1).unwrap();
}

#[test]
fn merge_write_and_sort() {
    let base = TempDir::new().unwrap();
    write_exports(base.path());

    let outcome = merge_sources(
        base.path(),
        &MergeConfig::default().sources,
        &BibtexParser::new(),
    )
    .unwrap();

    let unique: Vec<_> = outcome.unique.iter().map(|r| r.cite_key.as_str()).collect();
    assert_eq!(unique, vec!["ieee1", "ieee2", "ieee3", "sd2"]);
    let duplicates: Vec<_> = outcome.duplicates.iter().map(|r| r.cite_key.as_str()).collect();
    assert_eq!(duplicates, vec!["sd1"]);

    let unified = base.path().join("unified.bib");
    let repeated = base.path().join("repeated.bib");
    outcome
        .write(&unified, &repeated, &BibtexWriter::new())
        .unwrap();

    let reread = read_records(&unified, &BibtexParser::new()).unwrap();
    assert_eq!(reread.len(), 4);
    assert_eq!(read_records(&repeated, &BibtexParser::new()).unwrap().len(), 1);

    let undated = reread.iter().find(|r| r.cite_key == "sd2").unwrap();
    assert_eq!(undated.year, None);
    assert_eq!(undated.extra_fields["year"], "n.d.");

    for algorithm in Algorithm::ALL {
        let sorted = sort_records(algorithm, &reread).unwrap();
        let keys: Vec<_> = sorted.iter().map(|r| r.cite_key.as_str()).collect();
        assert_eq!(keys, vec!["sd2", "ieee2", "ieee3", "ieee1"], "{algorithm}");
    }
}

#[test]
fn author_tally_over_merged_sources() {
    let base = TempDir::new().unwrap();
    write_exports(base.path());

    let outcome = merge_sources(base.path(), &["ieee", "science_direct"], &BibtexParser::new())
        .unwrap();
    let tally = AuthorTally::from_records(&outcome.unique);

    assert_eq!(
        tally.top(3),
        vec![("Doe, Jane", 3), ("Muller, Hans", 2), ("Smith, John", 1)]
    );
}

#[test]
fn benchmark_over_parsed_file() {
    let base = TempDir::new().unwrap();
    write_exports(base.path());
    let records = read_records(base.path().join("ieee/page1.bib"), &BibtexParser::new()).unwrap();

    let report = Benchmark::new().with_verify(true).run(&records);
    assert!(report.timings.iter().all(|t| t.status == RunStatus::Ok));

    let csv = report.to_csv().unwrap();
    assert_eq!(csv.lines().count(), Algorithm::ALL.len() + 1);
}

#[test]
fn missing_sources_produce_empty_output() {
    let base = TempDir::new().unwrap();
    let outcome = merge_sources(base.path(), &["ieee", "acm"], &BibtexParser::new()).unwrap();
    assert!(outcome.unique.is_empty());

    let unified = base.path().join("unified.bib");
    let repeated = base.path().join("repeated.bib");
    outcome.write(&unified, &repeated, &BibtexWriter::new()).unwrap();
    assert_eq!(fs::read_to_string(&unified).unwrap(), "");
    assert!(!repeated.exists());
}
