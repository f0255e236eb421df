//! Static keyword tables, one per market.
//!
//! Keywords are stored lower case. Both tables list the same seven categories
//! in the same order; only the display labels and synonyms differ.

use crate::market::Market;

/// The seven checklist items shared by every market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    ProductName,
    Origin,
    Alcohol,
    Volume,
    Importer,
    AllergenDeclaration,
    Language,
}

impl CategoryKind {
    pub fn name(self) -> &'static str {
        match self {
            CategoryKind::ProductName => "Product Name",
            CategoryKind::Origin => "Origin",
            CategoryKind::Alcohol => "Alcohol",
            CategoryKind::Volume => "Volume",
            CategoryKind::Importer => "Importer",
            CategoryKind::AllergenDeclaration => "Allergen Declaration",
            CategoryKind::Language => "Language",
        }
    }
}

/// One named check with its keyword synonyms
#[derive(Debug)]
pub struct ComplianceCategory {
    pub kind: CategoryKind,
    /// Label shown in the checklist message
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

impl ComplianceCategory {
    /// Whether any keyword occurs in `lowered`, which must already be lower case.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowered.contains(keyword))
    }
}

static SWISS_TABLE: [ComplianceCategory; 7] = [
    ComplianceCategory {
        kind: CategoryKind::ProductName,
        label: "Product name (Sachbezeichnung / dénomination)",
        keywords: &["cidre", "cider", "getränk", "boisson", "produkt"],
    },
    ComplianceCategory {
        kind: CategoryKind::Origin,
        label: "Country of origin (Produktionsland / pays de production)",
        keywords: &[
            "hergestellt in",
            "herkunft",
            "produktionsland",
            "fabriqué en",
            "produit en",
            "origine",
        ],
    },
    ComplianceCategory {
        kind: CategoryKind::Alcohol,
        label: "Alcohol content (Alkoholgehalt / teneur en alcool)",
        keywords: &["%", "vol", "alkohol", "alcool"],
    },
    ComplianceCategory {
        kind: CategoryKind::Volume,
        label: "Net volume (Nettofüllmenge / quantité nette)",
        keywords: &["ml", "cl", "nettofüllmenge", "inhalt", "contenu"],
    },
    ComplianceCategory {
        kind: CategoryKind::Importer,
        label: "Importer (Importeur / importateur)",
        keywords: &["importeur", "importateur", "importiert", "importé"],
    },
    ComplianceCategory {
        kind: CategoryKind::AllergenDeclaration,
        label: "Allergen declaration (Allergene / allergènes)",
        keywords: &["sulfit", "schwefel", "allergen", "allergène", "enthält", "contient"],
    },
    ComplianceCategory {
        kind: CategoryKind::Language,
        label: "German and French text (Deutsch / français)",
        keywords: &["zutaten", "ingrédients", "deutsch", "français"],
    },
];

static EU_TABLE: [ComplianceCategory; 7] = [
    ComplianceCategory {
        kind: CategoryKind::ProductName,
        label: "Product name",
        keywords: &["cider", "beverage", "product", "drink"],
    },
    ComplianceCategory {
        kind: CategoryKind::Origin,
        label: "Country of origin",
        keywords: &["made in", "manufactured in", "produced in", "origin"],
    },
    ComplianceCategory {
        kind: CategoryKind::Alcohol,
        label: "Alcohol content",
        keywords: &["%", "vol", "alcohol"],
    },
    ComplianceCategory {
        kind: CategoryKind::Volume,
        label: "Net volume",
        keywords: &["ml", "cl", "litre", "liter", "net volume"],
    },
    ComplianceCategory {
        kind: CategoryKind::Importer,
        label: "Importer",
        keywords: &["importer", "imported by", "distributor"],
    },
    ComplianceCategory {
        kind: CategoryKind::AllergenDeclaration,
        label: "Allergen declaration",
        keywords: &["sulfite", "sulphite", "allergen", "contains"],
    },
    ComplianceCategory {
        kind: CategoryKind::Language,
        label: "English text",
        keywords: &["english", "ingredients"],
    },
];

/// Keyword table for `market`, in checklist order.
pub fn table(market: Market) -> &'static [ComplianceCategory] {
    match market {
        Market::Switzerland => &SWISS_TABLE,
        Market::Eu => &EU_TABLE,
    }
}
