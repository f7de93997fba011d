use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::models::Job;

const EMBEDDED_CATALOG: &str = include_str!("../data/jobs.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Catalog is not a valid job list: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate job id {0} in catalog")]
    DuplicateId(u32),
}

/// The read-only list of postings. Ids are unique.
#[derive(Debug, Clone)]
pub struct Catalog {
    jobs: Vec<Job>,
}

impl Catalog {
    pub fn new(jobs: Vec<Job>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(jobs.len());
        for job in &jobs {
            if !seen.insert(job.id) {
                return Err(CatalogError::DuplicateId(job.id));
            }
        }
        Ok(Self { jobs })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The seed catalog compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Loads from `path` when given, otherwise falls back to the embedded seed.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let catalog = match path {
            Some(p) => {
                info!("Loading job catalog from {}", p.display());
                Self::from_path(p)?
            }
            None => {
                info!("Loading embedded job catalog");
                Self::embedded()?
            }
        };
        info!("Catalog loaded with {} jobs", catalog.len());
        Ok(catalog)
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn get(&self, id: u32) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TWO_JOBS: &str = r#"[
        {"id": 1, "title": "A", "company": "X", "location": "Pune", "mode": "Remote",
         "experience": "Fresher", "source": "Indeed", "postedDaysAgo": 0,
         "salaryRange": "", "description": "", "skills": [], "applyUrl": ""},
        {"id": 2, "title": "B", "company": "Y", "location": "Delhi", "mode": "Onsite",
         "experience": "3-5", "source": "Naukri", "postedDaysAgo": 9,
         "salaryRange": "", "description": "", "skills": [], "applyUrl": ""}
    ]"#;

    #[test]
    fn test_embedded_catalog_loads_with_unique_ids() {
        let catalog = Catalog::embedded().unwrap();
        assert!(catalog.len() > 0);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let dup = TWO_JOBS.replace("\"id\": 2", "\"id\": 1");
        assert!(matches!(
            Catalog::from_json(&dup),
            Err(CatalogError::DuplicateId(1))
        ));
    }

    #[test]
    fn test_get_and_contains() {
        let catalog = Catalog::from_json(TWO_JOBS).unwrap();
        assert_eq!(catalog.get(2).map(|j| j.title.as_str()), Some("B"));
        assert!(catalog.contains(1));
        assert!(!catalog.contains(99));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TWO_JOBS.as_bytes()).unwrap();

        let catalog = Catalog::load(Some(file.path())).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            Catalog::from_path(&missing),
            Err(CatalogError::Io { .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}
