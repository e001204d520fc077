use serde_json::{json, Value};
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

const HOLDERS: &str = "\
account,balance
treasury,9000
alice,600
bob,300
carol,100
dave,0
";

const TRANSACTIONS: &str = "\
timestamp,signature,sender,amount,receiver
2024-01-01T00:00:00Z,sig1,treasury,100,alice
2024-01-02T00:00:00Z,sig2,alice,25,bob
2024-01-03T00:00:00Z,sig3,bob,10,dave
2024-01-04T00:00:00Z,sig4,carol,5,mallory
";

fn temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn text(value: &Value) -> &str {
    value.as_str().unwrap()
}

#[test]
fn test_ledger_graph_binary() {
    let bin_path = env!("CARGO_BIN_EXE_ledger_graph");
    let holders = temp_csv(HOLDERS);
    let transactions = temp_csv(TRANSACTIONS);

    let output = Command::new(bin_path)
        .arg(holders.path())
        .arg(transactions.path())
        .output()
        .expect("Failed to execute binary");
    assert!(
        output.status.success(),
        "Binary failed with stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let graph: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(graph["treasuryId"], json!("treasury"));
    assert_eq!(graph["totalSupply"], json!(10000.0));
    assert_eq!(graph["maxBalance"], json!(9000.0));

    let nodes: Vec<(&str, &str)> = graph["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| (text(&n["id"]), text(&n["color"])))
        .collect();
    let expected_nodes = [
        ("treasury", "#FFD700"),
        ("alice", "#FF3B9A"),
        ("bob", "#7A73FF"),
        ("carol", "#7A73FF"),
    ];
    assert_eq!(nodes, expected_nodes);
    assert_eq!(graph["nodes"][0]["radius"], json!(60.0));

    let links: Vec<(&str, &str, &str)> = graph["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| (text(&l["source"]), text(&l["target"]), text(&l["color"])))
        .collect();
    let expected_links = [
        ("treasury", "alice", "#FFD700"),
        ("alice", "bob", "#42C7FF"),
    ];
    assert_eq!(links, expected_links);
    assert_eq!(graph["transactions"].as_array().unwrap().len(), 4);
}

#[test]
fn test_empty_holders_fail() {
    let bin_path = env!("CARGO_BIN_EXE_ledger_graph");
    let holders = temp_csv("account,balance\n");
    let transactions = temp_csv(TRANSACTIONS);

    let output = Command::new(bin_path)
        .arg(holders.path())
        .arg(transactions.path())
        .output()
        .expect("Failed to execute binary");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No holder records"));
}

#[test]
fn test_usage() {
    let output = Command::new(env!("CARGO_BIN_EXE_ledger_graph"))
        .output()
        .expect("Failed to execute binary");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage"));
}
