use bom_prices::io::{open_input, with_output};
use bom_prices::BomError;
use std::fs;
use std::io::{Read, Write};
use tempfile::TempDir;

fn dir_entries(dir: &TempDir) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn test_with_output_replaces_file_on_success() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("bom.tsv");
    fs::write(&target, "old contents\n").unwrap();

    with_output(Some(target.to_str().unwrap()), |out| {
        out.write_all(b"Keys\nR1\n")?;
        Ok(())
    })
    .unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "Keys\nR1\n");
    assert_eq!(dir_entries(&dir), vec!["bom.tsv"]);
}

#[test]
fn test_with_output_keeps_original_on_failure() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("bom.tsv");
    fs::write(&target, "Key\tDigiKey\nR1\tA\n").unwrap();

    let result = with_output(Some(target.to_str().unwrap()), |out| {
        out.write_all(b"partial")?;
        Err(BomError::DuplicateDistributorColumn("DigiKey".to_string()))
    });

    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&target).unwrap(), "Key\tDigiKey\nR1\tA\n");
    assert_eq!(dir_entries(&dir), vec!["bom.tsv"]);
}

#[test]
fn test_with_output_creates_missing_target() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("new.tsv");

    with_output(Some(target.to_str().unwrap()), |out| {
        out.write_all(b"Keys\n")?;
        Ok(())
    })
    .unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "Keys\n");
}

#[test]
fn test_in_place_edit_reads_before_replacing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bom.tsv");
    fs::write(&path, "Key\nR1\nR2\n").unwrap();
    let path = path.to_str().unwrap();

    let mut input = open_input(Some(path)).unwrap();
    with_output(Some(path), |out| {
        let mut contents = String::new();
        input.read_to_string(&mut contents)?;
        out.write_all(contents.replacen("Key", "Keys", 1).as_bytes())?;
        Ok(())
    })
    .unwrap();

    assert_eq!(fs::read_to_string(path).unwrap(), "Keys\nR1\nR2\n");
}

#[test]
fn test_open_input_missing_file() {
    match open_input(Some("/this/path/does/not/exist/bom.tsv")) {
        Err(BomError::Io(_)) => {}
        Err(other) => panic!("Expected BomError::Io, got: {other:?}"),
        Ok(_) => panic!("Expected an error for a missing file"),
    }
}

#[cfg(unix)]
#[test]
fn test_with_output_keeps_target_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let target = dir.path().join("bom.tsv");
    fs::write(&target, "Key\n").unwrap();
    fs::set_permissions(&target, fs::Permissions::from_mode(0o644)).unwrap();

    with_output(Some(target.to_str().unwrap()), |out| {
        out.write_all(b"Keys\n")?;
        Ok(())
    })
    .unwrap();

    let mode = fs::metadata(&target).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
    assert_eq!(fs::read_to_string(&target).unwrap(), "Keys\n");
}
