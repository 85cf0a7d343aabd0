//! Immutable prompt and status phrase lists, loaded once at start-up.

use std::{fs, path::Path};

use crate::error::CatalogError;

const BUILTIN_PROMPTS: &str = include_str!("../data/prompts.json");
const BUILTIN_STATUSES: &str = include_str!("../data/statuses.json");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseCatalog {
    prompts: Vec<String>,
    statuses: Vec<String>,
}

impl PhraseCatalog {
    pub fn new(prompts: Vec<String>, statuses: Vec<String>) -> Result<Self, CatalogError> {
        validate("prompt", &prompts)?;
        validate("status", &statuses)?;
        Ok(Self { prompts, statuses })
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(
            parse_list("prompt", BUILTIN_PROMPTS)?,
            parse_list("status", BUILTIN_STATUSES)?,
        )
    }

    /// Built-in lists, with either one replaced by a JSON array file when a path is given.
    pub fn load(
        prompts_path: Option<&Path>,
        statuses_path: Option<&Path>,
    ) -> Result<Self, CatalogError> {
        let prompts = match prompts_path {
            Some(path) => read_list("prompt", path)?,
            None => parse_list("prompt", BUILTIN_PROMPTS)?,
        };
        let statuses = match statuses_path {
            Some(path) => read_list("status", path)?,
            None => parse_list("status", BUILTIN_STATUSES)?,
        };
        Self::new(prompts, statuses)
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn statuses(&self) -> &[String] {
        &self.statuses
    }

    pub fn prompt(&self, index: usize) -> Option<&str> {
        self.prompts.get(index).map(String::as_str)
    }

    pub fn status(&self, index: usize) -> Option<&str> {
        self.statuses.get(index).map(String::as_str)
    }
}

fn read_list(list: &'static str, path: &Path) -> Result<Vec<String>, CatalogError> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        list,
        path: path.to_path_buf(),
        source,
    })?;
    parse_list(list, &raw)
}

fn parse_list(list: &'static str, raw: &str) -> Result<Vec<String>, CatalogError> {
    serde_json::from_str(raw).map_err(|source| CatalogError::Parse { list, source })
}

fn validate(list: &'static str, phrases: &[String]) -> Result<(), CatalogError> {
    if phrases.is_empty() {
        return Err(CatalogError::Empty { list });
    }
    if let Some(index) = phrases.iter().position(|p| p.trim().is_empty()) {
        return Err(CatalogError::BlankPhrase { list, index });
    }
    Ok(())
}
