use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The binary with its config directory pointed at `home`.
fn enerbill(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("enerbill").unwrap();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

#[test]
fn process_writes_json_to_stdout() {
    let home = TempDir::new().unwrap();

    enerbill(home.path())
        .arg("process")
        .arg(fixture("bill.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""nombre":"María Fernanda Gómez""#))
        .stdout(predicate::str::contains(r#""contrato":"20458871""#))
        .stdout(predicate::str::contains(r#""municipio_servicio":"ENVIGADO""#));
}

#[test]
fn process_writes_pretty_json_file() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("out.json");

    enerbill(home.path())
        .arg("process")
        .arg(fixture("bill.json"))
        .args(["--pretty", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains('\n'));

    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    let consumos = json["consumos_hist"]["consumos"].as_array().unwrap();
    assert_eq!(consumos.len(), 9);
    assert_eq!(consumos[0]["fecha"], "02/2023");
    assert_eq!(consumos[0]["valor"], "118");
    assert_eq!(consumos[8]["descripcion"], "promedio");
    assert_eq!(consumos[8]["fecha"], "08/2023");
    assert_eq!(json["info"]["fecha"], "AGO-23");
    assert_eq!(json["info"]["valor_subsidio"], "-18.524");
    assert_eq!(json["consumos_hist"]["producto"], "Energía residencial");
    assert_eq!(json["general"]["porcentaje_rec_usuario"], "100");
    assert_eq!(json["general"]["deteccion_escritura_manual"], false);
}

#[test]
fn process_csv_lists_history_rows() {
    let home = TempDir::new().unwrap();

    enerbill(home.path())
        .arg("process")
        .arg(fixture("bill.json"))
        .args(["-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("usr_contrato,producto,fecha,descripcion,valor"))
        .stdout(predicate::str::contains("20458871,Energía residencial,02/2023,consumo,118"))
        .stdout(predicate::str::contains("20458871,Energía residencial,08/2023,promedio,131"));
}

#[test]
fn process_text_with_confidence() {
    let home = TempDir::new().unwrap();

    enerbill(home.path())
        .arg("process")
        .arg(fixture("bill.json"))
        .args(["-f", "text", "--show-confidence"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name:     María Fernanda Gómez"))
        .stdout(predicate::str::contains("Unit cost: 812,45"))
        .stdout(predicate::str::contains("History:        100%"));
}

#[test]
fn process_reports_service_failure() {
    let home = TempDir::new().unwrap();

    enerbill(home.path())
        .arg("process")
        .arg(fixture("failed.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupted"));
}

#[test]
fn process_missing_input_fails() {
    let home = TempDir::new().unwrap();

    enerbill(home.path())
        .args(["process", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn process_uses_custom_config() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("rules.json");
    fs::write(&config, r#"{"extraction": {"sub_table": {"anchor": "(MWh)"}}}"#).unwrap();

    enerbill(home.path())
        .arg("--config")
        .arg(&config)
        .arg("process")
        .arg(fixture("bill.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""consumos":[]"#))
        .stdout(predicate::str::contains(r#""nombre":"María Fernanda Gómez""#));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("in");
    let output = home.path().join("out");
    fs::create_dir_all(&input).unwrap();
    fs::copy(fixture("bill.json"), input.join("a.json")).unwrap();
    fs::copy(fixture("bill.json"), input.join("b.json")).unwrap();
    fs::copy(fixture("failed.json"), input.join("c.json")).unwrap();

    enerbill(home.path())
        .arg("batch")
        .arg(format!("{}/*.json", input.display()))
        .arg("-o")
        .arg(&output)
        .args(["-j", "2", "--summary", "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 files"))
        .stdout(predicate::str::contains("Failed files:"));

    assert!(output.join("a.json").exists());
    assert!(output.join("b.json").exists());
    assert!(!output.join("c.json").exists());

    let summary = fs::read_to_string(output.join("summary.csv")).unwrap();
    let rows: Vec<&str> = summary.lines().collect();
    assert_eq!(rows.len(), 4);
    assert!(rows[1].starts_with("a.json,success,20458871,100,100,100,false,"));
    assert!(rows[2].starts_with("b.json,success,"));
    assert!(rows[3].starts_with("c.json,error,"));
}

#[test]
fn batch_stops_on_first_error_by_default() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("in");
    fs::create_dir_all(&input).unwrap();
    fs::copy(fixture("failed.json"), input.join("c.json")).unwrap();

    enerbill(home.path())
        .arg("batch")
        .arg(format!("{}/*.json", input.display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn reply_prints_confirmation() {
    let home = TempDir::new().unwrap();

    enerbill(home.path())
        .arg("reply")
        .arg(fixture("bill.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Factura procesada para María Fernanda Gómez, contrato 20458871",
        ))
        .stdout(predicate::str::contains("Se recuperaron 8 meses"));
}

#[test]
fn reply_json_echoes_context() {
    let home = TempDir::new().unwrap();

    enerbill(home.path())
        .arg("reply")
        .arg(fixture("bill.json"))
        .args(["--json", "--context", "quiero paneles solares"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""context": "quiero paneles solares""#))
        .stdout(predicate::str::contains(r#""follow_up": []"#));
}

#[test]
fn config_init_get_set() {
    let home = TempDir::new().unwrap();

    enerbill(home.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    enerbill(home.path())
        .args(["config", "get", "extraction.sub_table.window"])
        .assert()
        .success()
        .stdout(predicate::str::diff("30\n"));

    enerbill(home.path())
        .args(["config", "set", "extraction.sub_table.window", "20"])
        .assert()
        .success();

    enerbill(home.path())
        .args(["config", "get", "extraction.sub_table.window"])
        .assert()
        .success()
        .stdout(predicate::str::diff("20\n"));

    enerbill(home.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn config_set_rejects_invalid_pattern() {
    let home = TempDir::new().unwrap();

    enerbill(home.path())
        .args(["config", "set", "extraction.labels.date_patterns.0", "["])
        .assert()
        .failure();

    enerbill(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not created"));
}
