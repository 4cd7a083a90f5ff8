use serde_json::{json, Value};
use solgraph::dataset::{DatasetBuilder, DatasetWriter, HashingEncoder};
use std::fs;

const DEPOSIT_CONTRACT: &str = "mapping(address => uint) balances;\n\nfunction deposit() public {\nbalances[msg.sender] = 1;\n}\n";

#[test]
fn builds_one_record_per_contract_in_scan_order() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join("Beta.sol"), DEPOSIT_CONTRACT).unwrap();
    fs::write(dir.path().join("Alpha.sol"), "uint totalSupply;\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "not a contract").unwrap();

    let encoder = HashingEncoder::new(64);
    let builder = DatasetBuilder::new(&encoder);
    let records = builder.build(dir.path()).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].file_name, "Alpha.sol");
    assert_eq!(records[1].file_name, "Beta.sol");

    // No detector configured, so the label slot stays empty
    assert!(records.iter().all(|r| r.analysis.is_none()));
    assert!(records.iter().all(|r| r.tokens.input_ids.len() == 64));

    assert!(records[1].graph.contains_symbol("deposit"));
    assert!(records[1].graph.contains_dependency("deposit", "balances"));
}

#[test]
fn accepts_a_single_contract_file_as_input() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("Deposit.sol");
    fs::write(&path, DEPOSIT_CONTRACT).unwrap();
    fs::write(dir.path().join("Sibling.sol"), "uint cap;\n").unwrap();

    let encoder = HashingEncoder::new(32);
    let builder = DatasetBuilder::new(&encoder);
    let records = builder.build(&path).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].file_name, "Deposit.sol");
}

#[test]
fn unreadable_contracts_are_skipped_not_fatal() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join("Good.sol"), DEPOSIT_CONTRACT).unwrap();
    // Invalid UTF-8 cannot be read as source text
    fs::write(dir.path().join("Broken.sol"), [0xffu8, 0xfe, 0x80]).unwrap();

    let encoder = HashingEncoder::new(32);
    let builder = DatasetBuilder::new(&encoder);
    let records = builder.build(dir.path()).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].file_name, "Good.sol");
}

#[test]
fn empty_input_directory_builds_an_empty_dataset() {
    let dir = tempfile::TempDir::new().unwrap();

    let encoder = HashingEncoder::new(32);
    let builder = DatasetBuilder::new(&encoder);
    let records = builder.build(dir.path()).unwrap();

    assert!(records.is_empty());
    assert_eq!(DatasetWriter::new().format(&records).unwrap(), "[]");
}

#[test]
fn written_records_carry_the_full_graph_document() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("Deposit.sol");
    fs::write(&path, DEPOSIT_CONTRACT).unwrap();

    let encoder = HashingEncoder::new(16);
    let builder = DatasetBuilder::new(&encoder);
    let records = builder.build(&path).unwrap();

    let output = DatasetWriter::new().format(&records).unwrap();
    let parsed: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(parsed.as_array().unwrap().len(), 1);
    let record = &parsed[0];
    assert_eq!(record["file_name"], "Deposit.sol");
    assert!(record["analysis"].is_null());
    assert_eq!(record["tokens"]["input_ids"][0], 0);
    assert_eq!(record["tokens"]["input_ids"].as_array().unwrap().len(), 16);
    assert_eq!(
        record["tokens"]["attention_mask"].as_array().unwrap().len(),
        16
    );

    // Token ids depend on the hasher, the graph document does not; pin it
    // exactly
    let expected_graph = json!({
        "nodes": [
            {"name": "balances", "kind": "mapping", "line": 1},
            {"name": "deposit", "kind": "function", "line": 3},
        ],
        "edges": [
            {"source": "deposit", "target": "balances"},
        ],
    });
    assert_eq!(record["graph"], expected_graph);
}

#[test]
fn pretty_and_compact_output_parse_to_the_same_value() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("Deposit.sol");
    fs::write(&path, DEPOSIT_CONTRACT).unwrap();

    let encoder = HashingEncoder::new(16);
    let builder = DatasetBuilder::new(&encoder);
    let records = builder.build(&path).unwrap();

    let compact = DatasetWriter::new().format(&records).unwrap();
    let pretty = DatasetWriter::new().with_pretty(true).format(&records).unwrap();

    assert_ne!(compact, pretty);
    let compact_value: Value = serde_json::from_str(&compact).unwrap();
    let pretty_value: Value = serde_json::from_str(&pretty).unwrap();
    assert_eq!(compact_value, pretty_value);
}

#[test]
fn dataset_file_round_trips_through_serde() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("Deposit.sol");
    fs::write(&path, DEPOSIT_CONTRACT).unwrap();

    let encoder = HashingEncoder::new(16);
    let builder = DatasetBuilder::new(&encoder);
    let records = builder.build(&path).unwrap();

    let output = dir.path().join("dataset.json");
    DatasetWriter::new().format_to_file(&records, &output).unwrap();

    let reloaded: Vec<solgraph::dataset::ContractRecord> =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();

    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].file_name, records[0].file_name);
    assert_eq!(reloaded[0].tokens, records[0].tokens);
    assert_eq!(reloaded[0].graph.to_doc(), records[0].graph.to_doc());
}

#[cfg(unix)]
#[test]
fn records_carry_detector_reports_when_configured() {
    use solgraph::dataset::DetectorRunner;
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("Deposit.sol");
    fs::write(&path, DEPOSIT_CONTRACT).unwrap();

    let stub = dir.path().join("detector-stub");
    fs::write(
        &stub,
        "#!/bin/sh\nprintf '%s' '{\"success\":true,\"results\":{\"detectors\":[{\"check\":\"pragma\"}]}}' > \"$3\"\n",
    )
    .unwrap();
    let mut perms = fs::metadata(&stub).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&stub, perms).unwrap();

    let encoder = HashingEncoder::new(16);
    let runner = DetectorRunner::new(stub.to_string_lossy().into_owned());
    let builder = DatasetBuilder::new(&encoder).with_detector(&runner);
    let records = builder.build(&path).unwrap();

    let report = records[0].analysis.as_ref().unwrap();
    assert!(report.success);
    assert_eq!(report.finding_count(), 1);
}
