//! Shell context and command dispatch.

use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;

use crate::cli::output;
use crate::config::{Config, ConfigManager};
use crate::domain::{Programmation, Transaction, TransactionKind};
use crate::errors::CaisseError;
use crate::export::{DocumentRenderer, TableurRenderer, TexteRenderer};
use crate::lettres::nombre_en_lettres;
use crate::query::RegistreQuery;
use crate::registre::Registre;
use crate::reports::{LigneFeuille, LigneSommaire};
use crate::security::Role;
use crate::services::{
    ProgrammationService, ReportService, RubriqueService, ServiceError, TransactionService,
};
use crate::storage::{JsonStore, StorageBackend};
use crate::store::Periode;
use crate::utils::format_montant;

const DEFAULT_REGISTRE: &str = "caisse";
const DEFAULT_PAGE_LIMIT: usize = 20;

/// Fatal shell errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Caisse(#[from] CaisseError),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-command errors, reported and swallowed by the loop.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Caisse(#[from] CaisseError),
}

pub enum LoopControl {
    Continue,
    Exit,
}

pub struct ShellContext {
    pub registre: Registre,
    pub nom: String,
    pub role: Role,
    pub config: Config,
    pub running: bool,
    store: JsonStore,
    query: RegistreQuery,
}

impl ShellContext {
    pub fn new() -> Result<Self, CliError> {
        let store = JsonStore::new_default()?;
        let config = ConfigManager::new()?.load()?;
        let nom = store
            .dernier_registre()?
            .unwrap_or_else(|| DEFAULT_REGISTRE.to_string());
        let registre = match store.load(&nom) {
            Ok(registre) => registre,
            Err(CaisseError::Storage(_)) => Registre::new(nom.clone()),
            Err(err) => return Err(err.into()),
        };
        let query = RegistreQuery::new(Duration::from_secs(config.cache_ttl_secs));
        Ok(Self {
            registre,
            nom,
            role: Role::Admin,
            config,
            running: true,
            store,
            query,
        })
    }

    pub fn prompt(&self) -> String {
        format!("caisse:{} ({})> ", self.nom, self.role)
    }

    pub fn command_names(&self) -> Vec<String> {
        [
            "aide",
            "role",
            "recette",
            "depense",
            "liste",
            "rubrique",
            "programmation",
            "feuille",
            "sommaire",
            "solde",
            "lettres",
            "export",
            "sauver",
            "charger",
            "registres",
            "quitter",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    pub fn report_error(&self, err: CommandError) {
        output::error(err);
    }

    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        match command {
            "aide" | "help" => {
                self.print_help();
                Ok(LoopControl::Continue)
            }
            "quitter" | "exit" | "quit" => Ok(LoopControl::Exit),
            "role" => self.cmd_role(args),
            "recette" => self.cmd_transaction(TransactionKind::Recette, args),
            "depense" => self.cmd_transaction(TransactionKind::Depense, args),
            "liste" => self.cmd_liste(args),
            "rubrique" => self.cmd_rubrique(args),
            "programmation" => self.cmd_programmation(args),
            "feuille" => self.cmd_feuille(args),
            "sommaire" => self.cmd_sommaire(args),
            "solde" => self.cmd_solde(args),
            "lettres" => self.cmd_lettres(args),
            "export" => self.cmd_export(args),
            "sauver" => self.cmd_sauver(),
            "charger" => self.cmd_charger(args),
            "registres" => self.cmd_registres(),
            other => Err(CommandError::Usage(format!(
                "unknown command `{other}` (try `aide`)"
            ))),
        }
    }

    fn print_help(&self) {
        output::info("Commandes disponibles:");
        for ligne in [
            "  recette <date> <tiers> <motif> <montant>",
            "  depense <date> <tiers> <motif> <montant> [rubrique]",
            "  liste <recettes|depenses> [offset] [limit]",
            "  rubrique <ajouter <code> <libelle...> | liste>",
            "  programmation <ajouter <mois> <annee> <rubrique> <montant> <designation...> | liste <mois> <annee>>",
            "  feuille <debut> <fin> [solde]        sommaire <debut> <fin> [solde]",
            "  solde <mois> <annee>                 lettres <montant>",
            "  export <feuille|sommaire> <debut> <fin> [solde] <fichier.txt|.csv>",
            "  sauver | charger <nom> | registres | role <nom> | quitter",
        ] {
            println!("{ligne}");
        }
    }

    fn cmd_role(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        let nom = args
            .first()
            .ok_or_else(|| CommandError::Usage("usage: role <admin|instructeur|observateur>".into()))?;
        self.role = nom.parse::<Role>()?;
        output::success(format!("Rôle courant: {}", self.role));
        Ok(LoopControl::Continue)
    }

    fn cmd_transaction(
        &mut self,
        kind: TransactionKind,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if args.len() < 4 {
            return Err(CommandError::Usage(format!(
                "usage: {} <date> <tiers> <motif> <montant>{}",
                kind.label().to_lowercase(),
                if kind == TransactionKind::Depense {
                    " [rubrique]"
                } else {
                    ""
                }
            )));
        }
        let date = parse_date(args[0])?;
        let montant = parse_montant(args[3])?;
        let mut txn = Transaction::nouvelle(kind, date, args[1], args[2], montant);
        if kind == TransactionKind::Depense {
            if let Some(code) = args.get(4) {
                txn = txn.with_rubrique(*code);
            }
        }
        let id = TransactionService::enregistrer(&mut self.registre, self.role, txn)?;
        self.query.invalidate();
        let reference = self
            .registre
            .transaction(id)
            .map(|t| t.reference())
            .unwrap_or_default();
        output::success(format!("{} {} enregistrée.", kind.label(), reference));
        Ok(LoopControl::Continue)
    }

    fn cmd_liste(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        let kind = match args.first() {
            Some(&"recettes") => TransactionKind::Recette,
            Some(&"depenses") => TransactionKind::Depense,
            _ => {
                return Err(CommandError::Usage(
                    "usage: liste <recettes|depenses> [offset] [limit]".into(),
                ))
            }
        };
        let offset = parse_usize(args.get(1), 0)?;
        let limit = parse_usize(args.get(2), DEFAULT_PAGE_LIMIT)?;
        let page = self.query.page(&self.registre, kind, offset, limit);

        let rows: Vec<Vec<String>> = page
            .lignes
            .iter()
            .map(|ligne| {
                let txn = &ligne.transaction;
                vec![
                    txn.reference(),
                    ligne.date.to_string(),
                    txn.tiers.clone(),
                    txn.motif.clone(),
                    format_montant(txn.montant),
                ]
            })
            .collect();
        output::render_table(&["Référence", "Date", "Tiers", "Motif", "Montant"], &rows);
        output::info(format!(
            "{} sur {} ({}..)",
            page.lignes.len(),
            page.total,
            page.offset
        ));
        Ok(LoopControl::Continue)
    }

    fn cmd_rubrique(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        match args.first() {
            Some(&"ajouter") if args.len() >= 3 => {
                let code = args[1];
                let libelle = args[2..].join(" ");
                RubriqueService::creer(&mut self.registre, self.role, code, &libelle)?;
                output::success(format!("Rubrique {code} créée."));
                Ok(LoopControl::Continue)
            }
            Some(&"liste") => {
                let rows: Vec<Vec<String>> = RubriqueService::actives(&self.registre)
                    .iter()
                    .map(|r| vec![r.code.clone(), r.libelle.clone()])
                    .collect();
                output::render_table(&["Code", "Libellé"], &rows);
                Ok(LoopControl::Continue)
            }
            _ => Err(CommandError::Usage(
                "usage: rubrique <ajouter <code> <libelle...> | liste>".into(),
            )),
        }
    }

    fn cmd_programmation(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        match args.first() {
            Some(&"ajouter") if args.len() >= 5 => {
                let mois = parse_u32(args[1], "mois")?;
                let annee = parse_i32(args[2], "annee")?;
                let rubrique = args[3];
                let montant = parse_montant(args[4])?;
                let designation = if args.len() > 5 {
                    args[5..].join(" ")
                } else {
                    rubrique.to_string()
                };
                let ligne = Programmation::new(mois, annee, rubrique, designation, montant);
                ProgrammationService::ajouter(&mut self.registre, self.role, ligne)?;
                output::success(format!("Programmation {mois:02}/{annee} ajoutée."));
                Ok(LoopControl::Continue)
            }
            Some(&"liste") if args.len() >= 3 => {
                let mois = parse_u32(args[1], "mois")?;
                let annee = parse_i32(args[2], "annee")?;
                let rows: Vec<Vec<String>> =
                    ProgrammationService::du_mois(&self.registre, mois, annee)
                        .iter()
                        .map(|p| {
                            vec![
                                p.numero.to_string(),
                                p.rubrique.clone(),
                                p.designation.clone(),
                                format_montant(p.montant_prevu),
                                if p.valide { "validée" } else { "brouillon" }.to_string(),
                            ]
                        })
                        .collect();
                output::render_table(&["N°", "Rubrique", "Désignation", "Prévu", "État"], &rows);
                Ok(LoopControl::Continue)
            }
            _ => Err(CommandError::Usage(
                "usage: programmation <ajouter <mois> <annee> <rubrique> <montant> [designation...] | liste <mois> <annee>>"
                    .into(),
            )),
        }
    }

    fn cmd_feuille(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        let (periode, solde_initial) = parse_periode(args)?;
        let lignes = ReportService::feuille(&self.registre, &periode, solde_initial)?;
        print_feuille(&lignes);
        Ok(LoopControl::Continue)
    }

    fn cmd_sommaire(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        let (periode, solde_initial) = parse_periode(args)?;
        let lignes = ReportService::sommaire(&self.registre, &periode, solde_initial)?;
        print_sommaire(&lignes);
        Ok(LoopControl::Continue)
    }

    fn cmd_solde(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        if args.len() < 2 {
            return Err(CommandError::Usage("usage: solde <mois> <annee>".into()));
        }
        let mois = parse_u32(args[0], "mois")?;
        let annee = parse_i32(args[1], "annee")?;
        let solde = ReportService::solde_anterieur(&self.registre, &self.config, mois, annee)?;
        output::info(format!(
            "Solde reporté au {mois:02}/{annee}: {} ({})",
            format_montant(solde),
            nombre_en_lettres(solde)
        ));
        Ok(LoopControl::Continue)
    }

    fn cmd_lettres(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        let montant = parse_montant(
            args.first()
                .ok_or_else(|| CommandError::Usage("usage: lettres <montant>".into()))?,
        )?;
        println!("{}", nombre_en_lettres(montant));
        Ok(LoopControl::Continue)
    }

    fn cmd_export(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        if args.len() < 4 {
            return Err(CommandError::Usage(
                "usage: export <feuille|sommaire> <debut> <fin> [solde] <fichier.txt|.csv>".into(),
            ));
        }
        // The trailing argument is always the file; an optional opening
        // balance may sit between the dates and the file.
        let (periode_args, fichier) = if args.len() >= 5 {
            (&args[1..4], args[4])
        } else {
            (&args[1..3], args[3])
        };
        let (periode, solde_initial) = parse_periode(periode_args)?;
        let document = match args[0] {
            "feuille" => {
                let lignes = ReportService::feuille(&self.registre, &periode, solde_initial)?;
                ReportService::document_feuille(&lignes, &periode)
            }
            "sommaire" => {
                let lignes = ReportService::sommaire(&self.registre, &periode, solde_initial)?;
                ReportService::document_sommaire(&lignes, &periode)
            }
            other => {
                return Err(CommandError::Usage(format!(
                    "unknown report `{other}` (feuille|sommaire)"
                )))
            }
        };

        let fichier = Path::new(fichier);
        let bytes = match fichier.extension().and_then(|ext| ext.to_str()) {
            Some("csv") => TableurRenderer::new().render(&document)?,
            _ => TexteRenderer::new().render(&document)?,
        };
        fs::write(fichier, bytes).map_err(CaisseError::from)?;
        output::success(format!("Export écrit dans {}", fichier.display()));
        Ok(LoopControl::Continue)
    }

    fn cmd_sauver(&mut self) -> Result<LoopControl, CommandError> {
        self.store.save(&self.registre, &self.nom)?;
        self.store.record_dernier_registre(Some(&self.nom))?;
        output::success(format!("Registre `{}` sauvegardé.", self.nom));
        Ok(LoopControl::Continue)
    }

    fn cmd_charger(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        let nom = args
            .first()
            .ok_or_else(|| CommandError::Usage("usage: charger <nom>".into()))?;
        self.registre = self.store.load(nom)?;
        self.nom = nom.to_string();
        self.query.invalidate();
        self.store.record_dernier_registre(Some(nom))?;
        output::success(format!("Registre `{nom}` chargé."));
        Ok(LoopControl::Continue)
    }

    fn cmd_registres(&mut self) -> Result<LoopControl, CommandError> {
        for nom in self.store.list()? {
            println!("{nom}");
        }
        Ok(LoopControl::Continue)
    }
}

fn print_feuille(lignes: &[LigneFeuille]) {
    let rows: Vec<Vec<String>> = lignes
        .iter()
        .map(|l| {
            vec![
                l.numero.to_string(),
                l.date.to_string(),
                l.reference.clone(),
                l.libelle.clone(),
                format_montant(l.recette),
                format_montant(l.depense),
                format_montant(l.solde),
            ]
        })
        .collect();
    output::render_table(
        &["N°", "Date", "Référence", "Libellé", "Recette", "Dépense", "Solde"],
        &rows,
    );
    if let Some(derniere) = lignes.last() {
        output::info(format!("Solde final: {}", format_montant(derniere.solde)));
    } else {
        output::info("Aucun mouvement sur la période.");
    }
}

fn print_sommaire(lignes: &[LigneSommaire]) {
    let rows: Vec<Vec<String>> = lignes
        .iter()
        .map(|l| {
            vec![
                l.code.clone(),
                l.libelle.clone(),
                format_montant(l.recette),
                format_montant(l.depense),
                format_montant(l.solde),
            ]
        })
        .collect();
    output::render_table(&["Code", "Libellé", "Recettes", "Dépenses", "Solde"], &rows);
}

fn parse_periode(args: &[&str]) -> Result<(Periode, i64), CommandError> {
    if args.len() < 2 {
        return Err(CommandError::Usage(
            "usage: <debut YYYY-MM-DD> <fin YYYY-MM-DD> [solde]".into(),
        ));
    }
    let debut = parse_date(args[0])?;
    let fin = parse_date(args[1])?;
    let solde = match args.get(2) {
        Some(raw) => parse_montant(raw)?,
        None => 0,
    };
    Ok((Periode::new(debut, fin), solde))
}

fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    raw.parse::<NaiveDate>()
        .map_err(|_| CommandError::Usage(format!("invalid date `{raw}` (expected YYYY-MM-DD)")))
}

fn parse_montant(raw: &str) -> Result<i64, CommandError> {
    raw.parse::<i64>()
        .map_err(|_| CommandError::Usage(format!("invalid amount `{raw}`")))
}

fn parse_u32(raw: &str, field: &str) -> Result<u32, CommandError> {
    raw.parse::<u32>()
        .map_err(|_| CommandError::Usage(format!("invalid {field} `{raw}`")))
}

fn parse_i32(raw: &str, field: &str) -> Result<i32, CommandError> {
    raw.parse::<i32>()
        .map_err(|_| CommandError::Usage(format!("invalid {field} `{raw}`")))
}

fn parse_usize(raw: Option<&&str>, default: usize) -> Result<usize, CommandError> {
    match raw {
        Some(value) => value
            .parse::<usize>()
            .map_err(|_| CommandError::Usage(format!("invalid number `{value}`"))),
        None => Ok(default),
    }
}
