//! Drives the shell binary in script mode against a temporary data
//! directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("caisse_cli").expect("binary exists");
    cmd.env("CAISSE_CORE_HOME", home.path())
        .env("CAISSE_CLI_SCRIPT", "1");
    cmd
}

#[test]
fn records_and_reports_a_period() {
    let home = TempDir::new().expect("temp dir");
    cli(&home)
        .write_stdin(
            "rubrique ajouter R01 Carburant\n\
             recette 2025-01-05 Tresor Taxe 1000\n\
             depense 2025-01-10 Fournisseur Achat 400 R01\n\
             feuille 2025-01-01 2025-01-31\n\
             sommaire 2025-01-01 2025-01-31 100\n\
             quitter\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("REC-0001"))
        .stdout(predicate::str::contains("DEP-0001"))
        .stdout(predicate::str::contains("Solde final: 600"))
        .stdout(predicate::str::contains("Total des recettes"));
}

#[test]
fn converts_amounts_to_words() {
    let home = TempDir::new().expect("temp dir");
    cli(&home)
        .write_stdin("lettres 1234\nquitter\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("mille deux cent trente-quatre"));
}

#[test]
fn observer_role_cannot_write() {
    let home = TempDir::new().expect("temp dir");
    cli(&home)
        .write_stdin(
            "role observateur\n\
             recette 2025-01-05 Tresor Taxe 1000\n\
             quitter\n",
        )
        .assert()
        .success()
        .stderr(predicate::str::contains("permission denied"));
}

#[test]
fn export_honors_the_opening_balance() {
    let home = TempDir::new().expect("temp dir");
    let out = home.path().join("sommaire.csv");
    cli(&home)
        .write_stdin(format!(
            "recette 2025-01-05 Tresor Taxe 1000\n\
             export sommaire 2025-01-01 2025-01-31 100 {}\n\
             quitter\n",
            out.display()
        ))
        .assert()
        .success();

    let text = std::fs::read_to_string(&out).expect("export file");
    // A positive opening balance adds the carry-forward row.
    assert!(text.contains("REPORT"));
    assert!(text.contains("Solde reporté"));
}

#[test]
fn saves_and_reloads_the_registre() {
    let home = TempDir::new().expect("temp dir");
    cli(&home)
        .write_stdin(
            "recette 2025-01-05 Tresor Taxe 1000\n\
             sauver\n\
             quitter\n",
        )
        .assert()
        .success();

    cli(&home)
        .write_stdin("liste recettes\nquitter\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("REC-0001"))
        .stdout(predicate::str::contains("1 000"));
}
