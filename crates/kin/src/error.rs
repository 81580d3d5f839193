//! Error types for Kin operations.
//!
//! This module provides the main error type [`KinError`] which wraps the
//! error conditions that can occur while mutating a dataset, importing or
//! exporting files, and rendering diagrams.

use std::io;

use thiserror::Error;

use kin_core::identifier::PersonId;

/// The main error type for Kin operations.
///
/// Every variant is recoverable at the boundary of the operation that
/// raised it: a failed store mutation leaves the dataset untouched, and a
/// failed import leaves the caller's current dataset unmodified.
#[derive(Debug, Error)]
pub enum KinError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("person not found: {0}")]
    PersonNotFound(PersonId),

    #[error("relationship not found: {parent} -> {child}")]
    RelationshipNotFound { parent: PersonId, child: PersonId },

    #[error("a person cannot be their own parent: {0}")]
    SelfLoop(PersonId),

    #[error("relationship already exists: {parent} -> {child}")]
    DuplicateRelationship { parent: PersonId, child: PersonId },

    #[error("person name must not be empty")]
    EmptyName,

    #[error("import error: {0}")]
    Import(String),

    #[error("export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for KinError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
