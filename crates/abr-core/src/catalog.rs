#![forbid(unsafe_code)]

//! The shared, read-only product catalog.
//!
//! # Invariants
//!
//! 1. A catalog is never empty.
//! 2. Entry ids are unique; `position(id)` therefore has at most one answer.
//! 3. Every localized field covers the full language set (enforced by
//!    [`Localized`]).
//!
//! The catalog is built once per page load and shared behind an `Arc` by
//! whoever needs it. It owns no display state.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::language::Localized;

/// One product shown by the carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stable identifier, referenced by product cards.
    pub id: String,
    pub title: Localized,
    pub description: Localized,
    pub category: Localized,
    /// Language-independent image asset.
    pub image_path: String,
}

/// Catalog construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No entries were supplied.
    Empty,
    /// Two entries share an id.
    DuplicateId(String),
    /// Malformed catalog JSON.
    Json(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "catalog has no entries"),
            Self::DuplicateId(id) => write!(f, "duplicate catalog id: {id}"),
            Self::Json(msg) => write!(f, "catalog JSON error: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Ordered, non-empty list of products with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Validate and wrap a list of entries.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Load entries from a JSON array.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(json).map_err(|e| CatalogError::Json(e.to_string()))?;
        Self::from_entries(entries)
    }

    /// Number of entries. Always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    /// Index of the entry with the given id.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> + '_ {
        self.entries.iter()
    }

    /// The four products shipped with the site, in display order.
    #[must_use]
    pub fn builtin() -> Self {
        let special_seals = || Localized::new("Vedadores Especiais", "Special Seals", "Sellos Especiales");
        let head_gasket = || {
            Localized::new(
                "Junta do Cabeçote",
                "Cylinder Head Gasket",
                "Empaque de Culata",
            )
        };
        let gasket_description = |engine: &str| {
            Localized::new(
                format!(
                    "Junta de cabeçote para motor {engine}, construída em aço multicamadas, projetada para vedar câmaras de combustão, dutos de óleo e canais de arrefecimento entre bloco e cabeçote, suportando altas temperaturas e pressão de trabalho."
                ),
                format!(
                    "Cylinder head gasket for {engine} engine, constructed of multi-layered steel, designed to seal combustion chambers, oil ducts and cooling channels between block and cylinder head, withstanding high temperatures and working pressure."
                ),
                format!(
                    "Empaque de culata para motor {engine}, construido en acero multicapa, diseñado para sellar cámaras de combustión, conductos de aceite y canales de enfriamiento entre bloque y culata, soportando altas temperaturas y presión de trabajo."
                ),
            )
        };

        let entries = vec![
            CatalogEntry {
                id: "oring".into(),
                title: Localized::new("Anéis O'Ring", "O-Ring Seals", "Anillos O-Ring"),
                description: Localized::new(
                    "Vedação circular em elastômero para aplicações diversas em sistemas hidráulicos e pneumáticos.",
                    "Circular seal made of elastomer for various applications in hydraulic and pneumatic systems.",
                    "Sello circular fabricado en elastómero para diversas aplicaciones en sistemas hidráulicos y neumáticos.",
                ),
                category: special_seals(),
                image_path: "assets/ANEL_ORING.webp".into(),
            },
            CatalogEntry {
                id: "d229".into(),
                title: Localized::new(
                    "Junta do Cabeçote D229",
                    "Cylinder Head Gasket D229",
                    "Empaque de Culata D229",
                ),
                description: gasket_description("D229"),
                category: head_gasket(),
                image_path: "assets/D229.webp".into(),
            },
            CatalogEntry {
                id: "x10".into(),
                title: Localized::new(
                    "Junta do Cabeçote X10",
                    "Cylinder Head Gasket X10",
                    "Empaque de Culata X10",
                ),
                description: gasket_description("X10"),
                category: head_gasket(),
                image_path: "assets/x10.webp".into(),
            },
            CatalogEntry {
                id: "x12".into(),
                title: Localized::new("Vedador X12", "Seal X12", "Sello X12"),
                description: Localized::new(
                    "Vedador do conjunto X12 em elastômero, destinado à vedação de óleo/fluido em eixo ou alojamento, resistente a variações térmicas e à ação de derivados de petróleo, evitando vazamentos e contaminação do sistema.",
                    "X12 assembly seal made of elastomer, designed for sealing oil or fluid in shafts or housings. Resistant to thermal variations and petroleum derivatives, preventing leaks and system contamination.",
                    "Sello del conjunto X12 fabricado en elastómero, destinado a la estanqueidad de aceite o fluido en ejes o alojamientos. Resistente a variaciones térmicas y a derivados del petróleo, evitando fugas y contaminación del sistema.",
                ),
                category: special_seals(),
                image_path: "assets/VEDADOR_X12.webp".into(),
            },
        ];

        Self { entries }
    }
}

/// Language-invariant content shown before rotation starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashContent {
    pub title: String,
    pub description: String,
    pub image_path: String,
    pub image_alt: String,
}

impl Default for SplashContent {
    fn default() -> Self {
        Self {
            title: "ABR Ind. e Com. de Auto Peças".into(),
            description: "A ABR ind. e Comércio é especialista em soluções de vedação automotiva de alta performance.\n\
Desenvolvemos juntas de cabeçote, anéis O'ring e vedadores especiais para motores.\n\
Nossos produtos garantem durabilidade, segurança e eficiência em todas as aplicações.\n\
Atendemos montadoras, reposição e lojas de autopeças."
                .into(),
            image_path: "assets/logo_apresentacao.webp".into(),
            image_alt: "ABR".into(),
        }
    }
}
