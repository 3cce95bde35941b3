//! File-backed store with one markdown document per knowledge category.
//!
//! | Category | File        | Covers                                     |
//! |----------|-------------|--------------------------------------------|
//! | About    | about.md    | Bio, background, experience                |
//! | Skills   | skills.md   | Technologies and proficiency levels        |
//! | Services | services.md | Offerings, pricing, timelines              |
//! | Projects | projects.md | Case studies and shipped work              |
//! | Contact  | contact.md  | Channels, availability, response time      |
//!
//! Documents are read lazily on first access and cached for the process
//! lifetime; the store is read-only once populated, so it is safe to share
//! across concurrent requests behind an `Arc` without further coordination.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Knowledge category enum for type-safe document references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Bio and professional background.
    About,
    /// Technology stack and proficiency.
    Skills,
    /// Service offerings with pricing and timelines.
    Services,
    /// Portfolio projects and case studies.
    Projects,
    /// Contact channels and availability.
    Contact,
}

impl Category {
    /// Wire/key name for this category.
    #[inline]
    pub fn key(&self) -> &'static str {
        match self {
            Category::About => "about",
            Category::Skills => "skills",
            Category::Services => "services",
            Category::Projects => "projects",
            Category::Contact => "contact",
        }
    }

    /// Backing document file name.
    #[inline]
    pub fn file_name(&self) -> &'static str {
        self.entry().file
    }

    /// Returns all categories in the store's stable order.
    pub fn all() -> [Self; 5] {
        [
            Self::About,
            Self::Skills,
            Self::Services,
            Self::Projects,
            Self::Contact,
        ]
    }

    fn entry(&self) -> &'static CatalogEntry {
        &CATALOG[*self as usize]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-category retrieval configuration: backing file plus the keyword sets
/// that qualify a query for this category, one set per supported locale.
struct CatalogEntry {
    file: &'static str,
    keywords_en: &'static [&'static str],
    keywords_es: &'static [&'static str],
}

/// The keyword catalog, indexed by `Category as usize`. Matching is
/// case-insensitive substring containment against the lowercased query, and
/// always considers both locales' sets regardless of the requested response
/// language (a Spanish visitor may still type "pricing").
static CATALOG: [CatalogEntry; 5] = [
    CatalogEntry {
        file: "about.md",
        keywords_en: &[
            "about",
            "who",
            "experience",
            "background",
            "bio",
            "introduction",
            "henry",
        ],
        keywords_es: &[
            "sobre",
            "quién",
            "quien",
            "experiencia",
            "biografía",
            "biografia",
            "introducción",
            "introduccion",
            "henry",
        ],
    },
    CatalogEntry {
        file: "skills.md",
        keywords_en: &[
            "skill",
            "technology",
            "tech",
            "stack",
            "know",
            "proficient",
            "expert",
            "language",
            "framework",
            "tool",
        ],
        keywords_es: &[
            "habilidad",
            "habilidades",
            "tecnología",
            "tecnologia",
            "stack",
            "sabe",
            "conoce",
            "domina",
            "experto",
            "lenguaje",
            "framework",
            "herramienta",
        ],
    },
    CatalogEntry {
        file: "services.md",
        keywords_en: &[
            "service",
            "offer",
            "price",
            "pricing",
            "cost",
            "hire",
            "work",
            "consulting",
            "development",
            "build",
        ],
        keywords_es: &[
            "servicio",
            "servicios",
            "ofrece",
            "precio",
            "precios",
            "costo",
            "contratar",
            "trabajo",
            "consultoría",
            "consultoria",
            "desarrollo",
            "construir",
        ],
    },
    CatalogEntry {
        file: "projects.md",
        keywords_en: &[
            "project",
            "portfolio",
            "built",
            "developed",
            "work",
            "example",
            "case",
            "study",
            "client",
        ],
        keywords_es: &[
            "proyecto",
            "proyectos",
            "portafolio",
            "portfolio",
            "construido",
            "desarrollado",
            "trabajo",
            "ejemplo",
            "caso",
            "estudio",
            "cliente",
        ],
    },
    CatalogEntry {
        file: "contact.md",
        keywords_en: &[
            "contact",
            "reach",
            "email",
            "message",
            "talk",
            "discuss",
            "availability",
            "available",
            "hire",
            "linkedin",
            "github",
        ],
        keywords_es: &[
            "contacto",
            "contactar",
            "correo",
            "email",
            "mensaje",
            "hablar",
            "discutir",
            "disponibilidad",
            "disponible",
            "contratar",
        ],
    },
];

/// Errors from document retrieval.
#[derive(Debug)]
pub enum KnowledgeError {
    /// The backing file for a category is absent.
    NotFound(Category),
    /// Any other I/O failure while reading a document.
    Io(std::io::Error),
}

impl fmt::Display for KnowledgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnowledgeError::NotFound(category) => {
                write!(f, "no document for category '{}'", category)
            }
            KnowledgeError::Io(e) => write!(f, "knowledge document read failed: {}", e),
        }
    }
}

impl std::error::Error for KnowledgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KnowledgeError::Io(e) => Some(e),
            KnowledgeError::NotFound(_) => None,
        }
    }
}

/// Read-only store over the knowledge directory, with a lazy document cache.
pub struct KnowledgeStore {
    root: PathBuf,
    cache: DashMap<Category, String>,
}

impl KnowledgeStore {
    /// Creates a store rooted at the given directory. No I/O happens here;
    /// documents are loaded on first access.
    pub fn open_path<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            cache: DashMap::new(),
        }
    }

    /// Returns the full document body for a category.
    ///
    /// Fails with [`KnowledgeError::NotFound`] when the backing file is
    /// absent; callers that assemble context treat that as "skip this
    /// category", never as a request-fatal error.
    pub fn get_document(&self, category: Category) -> Result<String, KnowledgeError> {
        if let Some(hit) = self.cache.get(&category) {
            return Ok(hit.clone());
        }

        let path = self.root.join(category.file_name());
        let body = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => KnowledgeError::NotFound(category),
            _ => KnowledgeError::Io(e),
        })?;

        tracing::debug!(
            target: "llamita::knowledge",
            category = %category,
            bytes = body.len(),
            "document loaded"
        );
        self.cache.insert(category, body.clone());
        Ok(body)
    }

    /// Categories in stable order, for deterministic context assembly.
    pub fn list_categories(&self) -> [Category; 5] {
        Category::all()
    }

    /// Both locales' keyword sets for a category. The classifier receives
    /// these through the store rather than reading a global.
    pub fn keywords(&self, category: Category) -> (&'static [&'static str], &'static [&'static str]) {
        let entry = category.entry();
        (entry.keywords_en, entry.keywords_es)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn store_with_docs(docs: &[(Category, &str)]) -> (tempfile::TempDir, KnowledgeStore) {
        let dir = tempfile::tempdir().unwrap();
        for (category, body) in docs {
            let mut f = std::fs::File::create(dir.path().join(category.file_name())).unwrap();
            f.write_all(body.as_bytes()).unwrap();
        }
        let store = KnowledgeStore::open_path(dir.path());
        (dir, store)
    }

    #[test]
    fn get_document_returns_body_and_caches() {
        let (_dir, store) = store_with_docs(&[(Category::About, "Henry's bio")]);
        assert_eq!(store.get_document(Category::About).unwrap(), "Henry's bio");
        // Second read comes from the cache and stays identical.
        assert_eq!(store.get_document(Category::About).unwrap(), "Henry's bio");
    }

    #[test]
    fn missing_file_is_not_found() {
        let (_dir, store) = store_with_docs(&[]);
        match store.get_document(Category::Contact) {
            Err(KnowledgeError::NotFound(Category::Contact)) => {}
            other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn category_order_is_stable() {
        let (_dir, store) = store_with_docs(&[]);
        let keys: Vec<&str> = store.list_categories().iter().map(|c| c.key()).collect();
        assert_eq!(keys, ["about", "skills", "services", "projects", "contact"]);
    }

    #[test]
    fn catalog_files_match_categories() {
        for category in Category::all() {
            assert_eq!(
                category.file_name(),
                format!("{}.md", category.key()),
                "file name should be derived from the category key"
            );
        }
    }

    #[test]
    fn every_category_has_keywords_in_both_locales() {
        let (_dir, store) = store_with_docs(&[]);
        for category in Category::all() {
            let (en, es) = store.keywords(category);
            assert!(!en.is_empty(), "{} has no English keywords", category);
            assert!(!es.is_empty(), "{} has no Spanish keywords", category);
        }
    }
}
