//! Entity and operation kinds.
//!
//! These are the discriminators a caller uses to describe a generation job:
//! which record shape to produce and which statement form to render.

use crate::error::GenerationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record shape to generate. Each kind targets its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    #[serde(alias = "users")]
    User,
    #[serde(alias = "products")]
    Product,
    #[serde(alias = "orders")]
    Order,
}

impl EntityKind {
    /// All entity kinds, in declaration order.
    pub const ALL: [EntityKind; 3] = [EntityKind::User, EntityKind::Product, EntityKind::Order];

    /// Default table this kind is written to.
    pub fn table_name(&self) -> &'static str {
        match self {
            EntityKind::User => "users",
            EntityKind::Product => "products",
            EntityKind::Order => "orders",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Product => "product",
            EntityKind::Order => "order",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" | "users" => Ok(EntityKind::User),
            "product" | "products" => Ok(EntityKind::Product),
            "order" | "orders" => Ok(EntityKind::Order),
            _ => Err(GenerationError::UnknownKind(s.to_string())),
        }
    }
}

/// A concrete statement form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Insert,
    Update,
    Delete,
}

impl Operation {
    /// The operations random-mix mode chooses between.
    pub const ALL: [Operation; 3] = [Operation::Insert, Operation::Update, Operation::Delete];

    /// SQL keyword the rendered statement starts with.
    pub fn keyword(&self) -> &'static str {
        match self {
            Operation::Insert => "INSERT",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Insert => write!(f, "insert"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

impl FromStr for Operation {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "insert" => Ok(Operation::Insert),
            "update" => Ok(Operation::Update),
            "delete" => Ok(Operation::Delete),
            _ => Err(GenerationError::UnknownOperation(s.to_string())),
        }
    }
}

/// Operation requested for a whole batch.
///
/// `RandomMix` is a meta-kind: the concrete [`Operation`] is picked
/// independently for every record, while a fixed kind applies to all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationKind {
    Insert,
    Update,
    Delete,
    #[serde(alias = "random", alias = "mix")]
    RandomMix,
}

impl OperationKind {
    /// The fixed operation, or `None` for random-mix.
    pub fn fixed(&self) -> Option<Operation> {
        match self {
            OperationKind::Insert => Some(Operation::Insert),
            OperationKind::Update => Some(Operation::Update),
            OperationKind::Delete => Some(Operation::Delete),
            OperationKind::RandomMix => None,
        }
    }

    pub fn is_random_mix(&self) -> bool {
        matches!(self, OperationKind::RandomMix)
    }
}

impl From<Operation> for OperationKind {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Insert => OperationKind::Insert,
            Operation::Update => OperationKind::Update,
            Operation::Delete => OperationKind::Delete,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fixed() {
            Some(op) => op.fmt(f),
            None => write!(f, "random-mix"),
        }
    }
}

impl FromStr for OperationKind {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random-mix" | "random_mix" | "random" | "mix" => Ok(OperationKind::RandomMix),
            other => other
                .parse::<Operation>()
                .map(OperationKind::from)
                .map_err(|_| GenerationError::UnknownOperation(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_parsing() {
        assert_eq!("user".parse::<EntityKind>().unwrap(), EntityKind::User);
        assert_eq!("Products".parse::<EntityKind>().unwrap(), EntityKind::Product);
        assert_eq!(" order ".parse::<EntityKind>().unwrap(), EntityKind::Order);

        let err = "invalid".parse::<EntityKind>().unwrap_err();
        assert_eq!(err, GenerationError::UnknownKind("invalid".to_string()));
    }

    #[test]
    fn test_entity_kind_tables() {
        assert_eq!(EntityKind::User.table_name(), "users");
        assert_eq!(EntityKind::Product.table_name(), "products");
        assert_eq!(EntityKind::Order.table_name(), "orders");
    }

    #[test]
    fn test_operation_kind_parsing() {
        assert_eq!(
            "insert".parse::<OperationKind>().unwrap(),
            OperationKind::Insert
        );
        assert_eq!(
            "random-mix".parse::<OperationKind>().unwrap(),
            OperationKind::RandomMix
        );
        assert_eq!(
            "random".parse::<OperationKind>().unwrap(),
            OperationKind::RandomMix
        );

        let err = "invalid".parse::<OperationKind>().unwrap_err();
        assert_eq!(err, GenerationError::UnknownOperation("invalid".to_string()));
    }

    #[test]
    fn test_operation_kind_fixed() {
        assert_eq!(OperationKind::Delete.fixed(), Some(Operation::Delete));
        assert_eq!(OperationKind::RandomMix.fixed(), None);
        assert!(OperationKind::RandomMix.is_random_mix());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for kind in [
            OperationKind::Insert,
            OperationKind::Update,
            OperationKind::Delete,
            OperationKind::RandomMix,
        ] {
            assert_eq!(kind.to_string().parse::<OperationKind>().unwrap(), kind);
        }
        for kind in EntityKind::ALL {
            assert_eq!(kind.to_string().parse::<EntityKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_serde_names() {
        let kind: OperationKind = serde_yaml::from_str("random-mix").unwrap();
        assert_eq!(kind, OperationKind::RandomMix);
        let kind: OperationKind = serde_yaml::from_str("random").unwrap();
        assert_eq!(kind, OperationKind::RandomMix);
        let entity: EntityKind = serde_yaml::from_str("product").unwrap();
        assert_eq!(entity, EntityKind::Product);
    }
}
