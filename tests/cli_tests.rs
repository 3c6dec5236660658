use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FEED_BODY: &str = r#"{
  "title": "Recent Uploads tagged cats",
  "items": [
    {
      "title": "A",
      "link": "x",
      "media": {"m": "https://live.staticflickr.com/1_m.jpg"},
      "description": "<p>Mac Spud posted a photo:</p><p><img src=\"https://live.staticflickr.com/1_m.jpg\" /></p>",
      "author": "a",
      "published": "2025-01-14T10:00:00Z"
    },
    {
      "title": "missing author",
      "media": {"m": "https://live.staticflickr.com/2_m.jpg"},
      "description": "d",
      "published": "2025-01-14T10:00:00Z"
    }
  ]
}"#;

/// Serve `body` to the next `connections` requests, returning the base URL
fn serve(body: &'static str, connections: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        for stream in listener.incoming().take(connections) {
            let mut stream = stream.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap_or(0);
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{}/services/feeds/photos_public.gne?format=json&tags=", addr)
}

fn search_cmd(workdir: &TempDir, feed_url: &str) -> Command {
    let mut cmd = Command::cargo_bin("flickr-search").unwrap();
    cmd.current_dir(workdir.path())
        .env("FLICKR_FEED_URL", feed_url)
        .env("SEARCH_DEBOUNCE_MS", "20")
        .env_remove("HTTP_TIMEOUT_SECS")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("flickr-search")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("interactive"));
}

#[test]
fn test_search_help_shows_flags() {
    Command::cargo_bin("flickr-search")
        .unwrap()
        .args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--detail"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn test_search_prints_only_complete_items() {
    let workdir = TempDir::new().unwrap();
    let url = serve(FEED_BODY, 1);

    search_cmd(&workdir, &url)
        .args(["search", "cats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Searching for \"cats\"..."))
        .stdout(predicate::str::contains("1. A by a"))
        .stdout(predicate::str::contains("missing author").not());
}

#[test]
fn test_search_json_overwrites_link() {
    let workdir = TempDir::new().unwrap();
    let url = serve(FEED_BODY, 1);

    search_cmd(&workdir, &url)
        .args(["search", "cats", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#""link": "https://live.staticflickr.com/1_m.jpg""#,
        ))
        .stdout(predicate::str::contains("Searching").not());
}

#[test]
fn test_search_detail_view() {
    let workdir = TempDir::new().unwrap();
    let url = serve(FEED_BODY, 1);

    search_cmd(&workdir, &url)
        .args(["search", "cats", "--detail", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Author: a"))
        .stdout(predicate::str::contains("Mac Spud posted a photo:"))
        .stdout(predicate::str::contains(
            "Embedded image: https://live.staticflickr.com/1_m.jpg",
        ))
        .stdout(predicate::str::contains("Published: Jan 14, 2025"));
}

#[test]
fn test_search_detail_out_of_range() {
    let workdir = TempDir::new().unwrap();
    let url = serve(FEED_BODY, 1);

    search_cmd(&workdir, &url)
        .args(["search", "cats", "--detail", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_search_empty_results() {
    let workdir = TempDir::new().unwrap();
    let url = serve(r#"{"items": []}"#, 1);

    search_cmd(&workdir, &url)
        .args(["search", "nothing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found"));
}

#[test]
fn test_search_connection_refused_fails() {
    let workdir = TempDir::new().unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/feed?tags=", listener.local_addr().unwrap());
    drop(listener);

    search_cmd(&workdir, &url)
        .args(["search", "cats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_malformed_debounce_is_reported() {
    let workdir = TempDir::new().unwrap();

    search_cmd(&workdir, "http://127.0.0.1:9/feed?tags=")
        .env("SEARCH_DEBOUNCE_MS", "soon")
        .args(["search", "cats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

mod interactive {
    use super::*;

    #[test]
    fn test_piped_query_runs_to_completion() {
        let workdir = TempDir::new().unwrap();
        let url = serve(FEED_BODY, 1);

        search_cmd(&workdir, &url)
            .arg("interactive")
            .write_stdin("cats\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Start typing to search..."))
            .stdout(predicate::str::contains("1. A by a"));
    }

    #[test]
    fn test_quit_exits_immediately() {
        let workdir = TempDir::new().unwrap();

        search_cmd(&workdir, "http://127.0.0.1:9/feed?tags=")
            .arg("interactive")
            .write_stdin(":quit\ncats\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Loading...").not());
    }

    #[test]
    fn test_empty_input_stays_idle() {
        let workdir = TempDir::new().unwrap();

        search_cmd(&workdir, "http://127.0.0.1:9/feed?tags=")
            .arg("interactive")
            .write_stdin(":retry\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Start typing to search..."))
            .stdout(predicate::str::contains("Loading...").not());
    }
}
