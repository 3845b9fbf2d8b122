use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Upper bound on products a single row may hold.
pub const MAX_PRODUCTS_PER_ROW: usize = 3;
/// Lower bound on products a single row may hold.
pub const MIN_PRODUCTS_PER_ROW: usize = 1;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(ProductId);
id_newtype!(RowId);
id_newtype!(GridId);
id_newtype!(TemplateId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub const ALL: [Alignment; 3] = [Alignment::Left, Alignment::Center, Alignment::Right];

    /// Identifier of the seeded template rendering this alignment.
    pub fn template_id(self) -> TemplateId {
        let raw = match self {
            Alignment::Left => "template_001",
            Alignment::Center => "template_002",
            Alignment::Right => "template_003",
        };
        TemplateId::from(raw)
    }

    pub fn from_template_id(template_id: &TemplateId) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|alignment| alignment.template_id() == *template_id)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "LEFT",
            Alignment::Center => "CENTER",
            Alignment::Right => "RIGHT",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown alignment '{0}', expected one of LEFT, CENTER, RIGHT")]
pub struct UnknownAlignment(pub String);

impl FromStr for Alignment {
    type Err = UnknownAlignment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LEFT" => Ok(Alignment::Left),
            "CENTER" => Ok(Alignment::Center),
            "RIGHT" => Ok(Alignment::Right),
            _ => Err(UnknownAlignment(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub price: Price,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub alignment: Alignment,
}

impl Template {
    /// The three read-only templates every store is seeded with.
    pub fn builtin() -> Vec<Template> {
        Alignment::ALL
            .into_iter()
            .map(|alignment| Template {
                id: alignment.template_id(),
                name: match alignment {
                    Alignment::Left => "Aesthetic Left",
                    Alignment::Center => "Centered Style",
                    Alignment::Right => "Right Aligned",
                }
                .to_string(),
                alignment,
            })
            .collect()
    }
}

/// A display row in the builder. Rows produced by the distributor and the
/// drag controllers always hold between one and three products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    pub products: Vec<Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

impl Row {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            id: RowId::generate(),
            products,
            alignment: Some(Alignment::default()),
        }
    }

    pub fn is_full(&self) -> bool {
        self.products.len() >= MAX_PRODUCTS_PER_ROW
    }

    pub fn product_ids(&self) -> Vec<ProductId> {
        self.products.iter().map(|p| p.id.clone()).collect()
    }

    pub fn position_of(&self, product_id: &ProductId) -> Option<usize> {
        self.products.iter().position(|p| p.id == *product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_maps_to_seeded_templates() {
        assert_eq!(Alignment::Left.template_id().as_str(), "template_001");
        assert_eq!(Alignment::Center.template_id().as_str(), "template_002");
        assert_eq!(Alignment::Right.template_id().as_str(), "template_003");
        assert_eq!(
            Alignment::from_template_id(&TemplateId::from("template_003")),
            Some(Alignment::Right)
        );
        assert_eq!(Alignment::from_template_id(&TemplateId::from("t1")), None);
    }

    #[test]
    fn alignment_parses_case_insensitively() {
        assert_eq!("center".parse::<Alignment>(), Ok(Alignment::Center));
        assert!("middle".parse::<Alignment>().is_err());
    }

    #[test]
    fn alignment_serializes_uppercase() {
        let json = serde_json::to_string(&Alignment::Right).expect("json");
        assert_eq!(json, "\"RIGHT\"");
    }

    #[test]
    fn builtin_templates_cover_every_alignment() {
        let templates = Template::builtin();
        assert_eq!(templates.len(), 3);
        assert_eq!(templates[1].name, "Centered Style");
        assert_eq!(templates[1].alignment, Alignment::Center);
    }

    #[test]
    fn generated_row_ids_are_unique() {
        assert_ne!(RowId::generate(), RowId::generate());
    }
}
