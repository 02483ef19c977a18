//! JSON persistence for registres: atomic writes under the application data
//! directory, plus a state file remembering the last opened registre.

use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::CaisseError;
use crate::registre::Registre;

const DEFAULT_DIR_NAME: &str = ".caisse_core";
const REGISTRES_DIR: &str = "registres";
const STATE_FILE: &str = "state.json";
const TMP_SUFFIX: &str = "tmp";

/// Returns the application data directory, defaulting to `~/.caisse_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("CAISSE_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn ensure_dir(path: &Path) -> Result<(), CaisseError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Trait that abstracts interaction with the persistence layer.
pub trait StorageBackend {
    fn save(&self, registre: &Registre, nom: &str) -> Result<(), CaisseError>;
    fn load(&self, nom: &str) -> Result<Registre, CaisseError>;
    fn list(&self) -> Result<Vec<String>, CaisseError>;
}

#[derive(Clone)]
pub struct JsonStore {
    root: PathBuf,
    registres_dir: PathBuf,
    state_file: PathBuf,
}

impl JsonStore {
    pub fn new(root: Option<PathBuf>) -> Result<Self, CaisseError> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        let registres_dir = root.join(REGISTRES_DIR);
        ensure_dir(&registres_dir)?;
        let state_file = root.join(STATE_FILE);
        Ok(Self {
            root,
            registres_dir,
            state_file,
        })
    }

    pub fn new_default() -> Result<Self, CaisseError> {
        Self::new(None)
    }

    pub fn registre_path(&self, nom: &str) -> PathBuf {
        self.registres_dir
            .join(format!("{}.json", canonical_name(nom)))
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn dernier_registre(&self) -> Result<Option<String>, CaisseError> {
        let state = self.read_state()?;
        Ok(state.dernier_registre)
    }

    pub fn record_dernier_registre(&self, nom: Option<&str>) -> Result<(), CaisseError> {
        let mut state = self.read_state()?;
        state.dernier_registre = nom.map(canonical_name);
        let data = serde_json::to_string_pretty(&state)?;
        write_atomic(&self.state_file, &data)?;
        Ok(())
    }

    fn read_state(&self) -> Result<StoreState, CaisseError> {
        if self.state_file.exists() {
            let data = fs::read_to_string(&self.state_file)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(StoreState::default())
        }
    }
}

impl StorageBackend for JsonStore {
    fn save(&self, registre: &Registre, nom: &str) -> Result<(), CaisseError> {
        let path = self.registre_path(nom);
        let json = serde_json::to_string_pretty(registre)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(nom, path = %path.display(), "registre saved");
        Ok(())
    }

    fn load(&self, nom: &str) -> Result<Registre, CaisseError> {
        let path = self.registre_path(nom);
        if !path.exists() {
            return Err(CaisseError::Storage(format!(
                "registre `{}` not found",
                nom
            )));
        }
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn list(&self) -> Result<Vec<String>, CaisseError> {
        if !self.registres_dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.registres_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    dernier_registre: Option<String>,
}

fn canonical_name(nom: &str) -> String {
    let sanitized: String = nom
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "registre".into()
    } else {
        sanitized
    }
}

/// Sibling path used for atomic replace-on-save writes.
pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<(), CaisseError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Transaction, TransactionKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonStore::new(Some(temp.path().to_path_buf())).expect("json store");
        (store, temp)
    }

    fn sample_registre() -> Registre {
        let mut registre = Registre::new("Caisse principale");
        registre.add_transaction(Transaction::nouvelle(
            TransactionKind::Recette,
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            "Tresor",
            "Taxe",
            1000,
        ));
        registre
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (store, _guard) = store_with_temp_dir();
        let registre = sample_registre();
        store.save(&registre, "principale").expect("save registre");
        let loaded = store.load("principale").expect("load registre");
        assert_eq!(loaded.nom, "Caisse principale");
        assert_eq!(loaded.transaction_count(), 1);
        assert_eq!(loaded.transactions[0].montant_lettres, "mille");
    }

    #[test]
    fn missing_registre_is_a_storage_error() {
        let (store, _guard) = store_with_temp_dir();
        let err = store.load("absent").expect_err("must not load");
        assert!(matches!(err, CaisseError::Storage(_)));
    }

    #[test]
    fn names_are_canonicalized() {
        let (store, _guard) = store_with_temp_dir();
        store
            .save(&sample_registre(), "Caisse Principale")
            .expect("save registre");
        assert_eq!(store.list().expect("list"), vec!["caisse_principale"]);
    }

    #[test]
    fn tmp_path_appends_the_suffix() {
        assert_eq!(
            tmp_path(Path::new("/data/config.json")),
            Path::new("/data/config.json.tmp")
        );
        assert_eq!(tmp_path(Path::new("/data/state")), Path::new("/data/state.tmp"));
    }

    #[test]
    fn remembers_the_last_registre() {
        let (store, _guard) = store_with_temp_dir();
        store
            .record_dernier_registre(Some("principale"))
            .expect("record");
        assert_eq!(
            store.dernier_registre().expect("read"),
            Some("principale".to_string())
        );
    }
}
