//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed user repository using Diesel ORM.
//!
//! Adapters translate between domain types and storage representations and
//! report raw store outcomes; classifying them is the domain's job.

pub mod persistence;
