use crate::calendar;
use crate::scheduler::Plan;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Vrai si un plan a déjà été enregistré.
    fn exists(&self) -> bool;
    /// Charge le plan ; le mois qu'il vise doit exister.
    fn load(&self) -> anyhow::Result<Plan>;
    /// Sauvegarde de manière atomique.
    fn save(&self, plan: &Plan) -> anyhow::Result<()>;

    /// `None` si aucun plan n'existe encore ; un plan illisible reste une erreur.
    fn load_optional(&self) -> anyhow::Result<Option<Plan>> {
        if !self.exists() {
            return Ok(None);
        }
        self.load().map(Some)
    }
}

/// Plan persisté dans un fichier JSON.
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }
}

impl Storage for JsonStorage {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn load(&self) -> anyhow::Result<Plan> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let plan: Plan = serde_json::from_slice(&data)
            .with_context(|| format!("parsing plan {}", self.path.display()))?;
        calendar::business_days(plan.year, plan.month)
            .with_context(|| format!("plan {} targets no valid month", self.path.display()))?;
        Ok(plan)
    }

    fn save(&self, plan: &Plan) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(plan)?;
        let mut tmp = NamedTempFile::new_in(self.dir())
            .with_context(|| format!("creating temp file next to {}", self.path.display()))?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}
