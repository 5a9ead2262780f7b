use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_imdb-lists")))
}

const MOVIES_END: &str =
    "--------------------------------------------------------------------------------";
const CREDITS_END: &str =
    "-----------------------------------------------------------------------------";

/// Write a dump with `header` filler lines, the data lines and an optional
/// end-of-dump marker followed by trailing junk.
fn write_dump(dir: &TempDir, file: &str, header: usize, data: &[&str], end: Option<&str>) {
    let mut body = String::new();
    for i in 0..header {
        body.push_str(&format!("header line {}\n", i));
    }
    for line in data {
        body.push_str(line);
        body.push('\n');
    }
    if let Some(marker) = end {
        body.push_str(marker);
        body.push_str("\nSUBMITTING UPDATES\n");
    }
    fs::write(dir.path().join(file), body).unwrap();
}

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_dump(
        &dir,
        "movies.list",
        15,
        &[
            "Bar (1999)\t\t\t\t1999",
            "\"Show\" (2006)\t\t\t\t2006-2008",
            "\"Show\" (2006) {Pilot (#1.1)}\t\t2006",
            "",
            "Foo (2001) (TV)\t\t\t2001",
        ],
        Some(MOVIES_END),
    );
    write_dump(
        &dir,
        "genres.list",
        2,
        &["Bar (1999)\t\tDrama", "Bar (1999)\t\tCrime", "\"Show\" (2006)\tComedy"],
        None,
    );
    write_dump(
        &dir,
        "actors.list",
        239,
        &[
            "Smith, John\t\tBar (1999)  [Cop]  <3>",
            "\t\t\tFoo (2001) (TV)  (voice)",
            "",
            "Cher\t\t\"Show\" (2006) {Pilot (#1.1)}  [Herself]",
        ],
        Some(CREDITS_END),
    );
    dir
}

fn read(dir: &TempDir, name: &str) -> String {
    fs::read_to_string(dir.path().join(name)).unwrap()
}

// -- tsv --

#[test]
fn tsv_all_categories() {
    let input = fixture();
    let output = TempDir::new().unwrap();

    cmd()
        .args(["-i", input.path().to_str().unwrap()])
        .args(["-o", output.path().to_str().unwrap()])
        .args(["--header-lines", "genres=2"])
        .args(["movies", "genres", "actors"])
        .assert()
        .success();

    let movies = read(&output, "movies.tsv");
    assert_eq!(movies.lines().count(), 4);
    assert_eq!(
        movies.lines().next().unwrap(),
        "Bar (1999)\tbar\tMOVIE\t\t\t0\t1999\t1999"
    );
    assert!(movies.contains("\"Show\" (2006)\tshow\tTV_SERIES\t\t\t0\t2006\t2006-2008\n"));
    assert!(movies.contains("Foo (2001) (TV)\tfoo\tTV\t"));

    assert_eq!(
        read(&output, "genres.tsv"),
        "Bar (1999)\tDrama\nBar (1999)\tCrime\n\"Show\" (2006)\tComedy\n"
    );

    assert_eq!(
        read(&output, "actors.tsv"),
        "John\tSmith\tBar (1999)\t\t\t[Cop]\n\
         John\tSmith\tFoo (2001) (TV)\t(voice)\t\t\n\
         Cher\t\t\"Show\" (2006) {Pilot (#1.1)}\t\t\t[Herself]\n"
    );
}

#[test]
fn custom_separator() {
    let input = fixture();
    let output = TempDir::new().unwrap();

    cmd()
        .args(["-i", input.path().to_str().unwrap()])
        .args(["-o", output.path().to_str().unwrap()])
        .args(["-s", "|", "--header-lines", "genres=2", "genres"])
        .assert()
        .success();

    assert!(read(&output, "genres.tsv").starts_with("Bar (1999)|Drama\n"));
}

// -- json --

#[test]
fn json_lines_one_object_per_record() {
    let input = fixture();
    let output = TempDir::new().unwrap();

    cmd()
        .args(["-i", input.path().to_str().unwrap()])
        .args(["-o", output.path().to_str().unwrap()])
        .args(["-m", "json", "movies"])
        .assert()
        .success();

    let body = read(&output, "movies.json");
    let docs: Vec<serde_json::Value> = body
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(docs.len(), 4);
    assert!(docs.iter().all(|d| d["doc_type"] == "movie"));
    assert_eq!(docs[1]["type"], "TV_SERIES");
    assert_eq!(docs[1]["tv_series_years_active"], "2006-2008");
    assert!(docs[0].get("tv_series_years_active").is_none());
    assert_eq!(docs[2]["ep_name"], "Pilot");
    assert_eq!(docs[2]["ep_num"], "(#1.1)");
}

// -- sql --

#[test]
fn sql_script_per_category() {
    let input = fixture();
    let output = TempDir::new().unwrap();

    cmd()
        .args(["-i", input.path().to_str().unwrap()])
        .args(["-o", output.path().to_str().unwrap()])
        .args(["-m", "sql", "actors"])
        .assert()
        .success();

    let sql = read(&output, "actors.sql");
    assert!(sql.starts_with("DROP TABLE IF EXISTS actors;\nCREATE TABLE actors (\n"));
    assert!(sql.contains(
        "INSERT INTO actors (name, surname, title, info_1, info_2, role, billing) VALUES\n\
         ('John', 'Smith', 'Bar (1999)', NULL, NULL, '[Cop]', 3),\n\
         ('John', 'Smith', 'Foo (2001) (TV)', '(voice)', NULL, NULL, NULL),\n"
    ));
    assert!(sql.ends_with("'[Herself]', NULL);\nCOMMIT;\n"));
}

// -- errors --

#[test]
fn unknown_mode_is_fatal() {
    let output = TempDir::new().unwrap();
    cmd()
        .args(["-o", output.path().to_str().unwrap()])
        .args(["-m", "xml", "movies"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown mode: xml"));
    assert!(fs::read_dir(output.path()).unwrap().next().is_none());
}

#[test]
fn unknown_category_does_not_stop_the_batch() {
    let input = fixture();
    let output = TempDir::new().unwrap();

    cmd()
        .args(["-i", input.path().to_str().unwrap()])
        .args(["-o", output.path().to_str().unwrap()])
        .args(["plots", "movies"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category: plots"))
        .stderr(predicate::str::contains("1 of 2 categories failed"));

    assert_eq!(read(&output, "movies.tsv").lines().count(), 4);
}

#[test]
fn malformed_lines_are_reported() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_dump(
        &input,
        "genres.list",
        0,
        &["Bar (1999)\tDrama", "not a genre line", "Foo (2001)\tWar"],
        None,
    );

    cmd()
        .args(["-i", input.path().to_str().unwrap()])
        .args(["-o", output.path().to_str().unwrap()])
        .args(["--header-lines", "genres=0", "genres"])
        .assert()
        .success()
        .stderr(predicate::str::contains("malformed line"))
        .stderr(predicate::str::contains("finished with 1 malformed lines"));

    assert_eq!(
        read(&output, "genres.tsv"),
        "Bar (1999)\tDrama\nFoo (2001)\tWar\n"
    );
}

#[test]
fn bad_header_override_is_rejected() {
    cmd()
        .args(["--header-lines", "genres", "genres"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --header-lines"));
}

#[test]
fn latin1_input_is_decoded() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("genres.list"), b"\xC4rger (1970)\tDrama\n").unwrap();

    cmd()
        .args(["-i", input.path().to_str().unwrap()])
        .args(["-o", output.path().to_str().unwrap()])
        .args(["--header-lines", "genres=0", "-m", "json", "genres"])
        .assert()
        .success();

    let body = read(&output, "genres.json");
    let doc: serde_json::Value = serde_json::from_str(body.trim_end()).unwrap();
    assert_eq!(doc["movie_name"], "ärger");
}
