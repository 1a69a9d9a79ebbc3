//! Tests for BOM loading and validation.

use super::load_table;
use crate::error::BomError;
use crate::models::Distributor;

#[test]
fn loads_parts_in_input_order() {
    let input = "Key\tDigiKey\tAvnet\nR1\t311-10KGRCT-ND\tRC0603FR-0710KL\nC1\t\t\nU1\t296-1395-5-ND\t\n";
    let table = load_table(input.as_bytes()).unwrap();

    let keys: Vec<&str> = table.parts.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["R1", "C1", "U1"]);
    assert_eq!(table.columns.len(), 2);
    assert_eq!(table.columns[0].distributor, Distributor::DigiKey);
    assert_eq!(table.columns[1].distributor, Distributor::Avnet);
    assert_eq!(table.parts[0].order_code(1), Some("RC0603FR-0710KL"));
    assert_eq!(table.parts[1].order_code(0), None);
    assert_eq!(table.parts[2].order_code(1), None);
}

#[test]
fn unrecognized_columns_are_dropped() {
    let input = "Key\tValue\tAvnet\tDigiKey_Avail\tdigikey\nR1\t10k\tABC\t5\tXYZ\n";
    let table = load_table(input.as_bytes()).unwrap();

    assert_eq!(table.columns.len(), 1);
    assert_eq!(table.columns[0].distributor, Distributor::Avnet);
    assert_eq!(table.columns[0].source_index, 2);
    assert_eq!(table.parts[0].order_codes, vec!["ABC".to_string()]);
}

#[test]
fn short_rows_read_as_empty_codes() {
    let input = "Key\tDigiKey\tAvnet\nR1\n";
    let table = load_table(input.as_bytes()).unwrap();
    assert_eq!(table.parts[0].order_codes, vec![String::new(), String::new()]);
}

#[test]
fn quotes_are_kept_literally() {
    let input = "Key\tDigiKey\n\"R1\"\tA\"B\n";
    let table = load_table(input.as_bytes()).unwrap();
    assert_eq!(table.parts[0].key, "\"R1\"");
    assert_eq!(table.parts[0].order_codes[0], "A\"B");
}

#[test]
fn missing_key_column_fails() {
    let result = load_table("Ref\tDigiKey\nR1\tA\n".as_bytes());
    match result {
        Err(BomError::MissingKeyColumn { found }) => assert_eq!(found, "Ref"),
        other => panic!("Expected BomError::MissingKeyColumn, got: {other:?}"),
    }
}

#[test]
fn key_match_is_case_sensitive() {
    assert!(matches!(
        load_table("key\tDigiKey\n".as_bytes()),
        Err(BomError::MissingKeyColumn { .. })
    ));
}

#[test]
fn empty_input_fails() {
    assert!(matches!(
        load_table("".as_bytes()),
        Err(BomError::MissingKeyColumn { .. })
    ));
}

#[test]
fn duplicate_distributor_column_fails() {
    let result = load_table("Key\tDigiKey\tAvnet\tDigiKey\nR1\ta\tb\tc\n".as_bytes());
    match result {
        Err(BomError::DuplicateDistributorColumn(name)) => assert_eq!(name, "DigiKey"),
        other => panic!("Expected BomError::DuplicateDistributorColumn, got: {other:?}"),
    }
}

#[test]
fn header_only_table_has_no_parts() {
    let table = load_table("Key\tAvnet\n".as_bytes()).unwrap();
    assert!(table.parts.is_empty());
    assert_eq!(table.columns.len(), 1);
}

#[test]
fn blank_lines_become_empty_parts() {
    let table = load_table("Key\tDigiKey\nR1\tA\n\nR3\tB\n".as_bytes()).unwrap();

    let keys: Vec<&str> = table.parts.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["R1", "", "R3"]);
    assert_eq!(table.parts[1].order_code(0), None);
    assert_eq!(table.parts[2].order_code(0), Some("B"));
}

#[test]
fn blank_line_in_key_only_table_is_kept() {
    let table = load_table("Key\n\nR2\n".as_bytes()).unwrap();
    assert_eq!(table.parts.len(), 2);
    assert_eq!(table.parts[0].key, "");
    assert_eq!(table.parts[1].key, "R2");
}

#[test]
fn crlf_line_endings_are_stripped() {
    let table = load_table("Key\tAvnet\r\nR1\tLM358DR\r\n".as_bytes()).unwrap();
    assert_eq!(table.columns.len(), 1);
    assert_eq!(table.parts[0].order_code(0), Some("LM358DR"));
}
