//! Kin Core Types and Definitions
//!
//! This crate provides the foundational types for the Kin family-tree
//! toolkit. It includes:
//!
//! - **Identifiers**: Sequential person identifiers ([`identifier::PersonId`])
//! - **People**: Person and relationship records ([`person`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Styling**: Invitation-status color rules ([`style`] module)

pub mod color;
pub mod identifier;
pub mod person;
pub mod style;
