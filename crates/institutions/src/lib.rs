//! `mizan-institutions` — the tenant directory.
//!
//! Institutions own branches, branches own safes and warehouses, and
//! employees belong to an institution. This crate carries the read models
//! for that hierarchy plus the institution service: list/fetch/update and
//! the durable "selected institution" that the settings resolver keys on.

pub mod model;
pub mod service;

pub use model::{
    Branch, Employee, Institution, InstitutionRoleRef, Safe, SystemType, UpdateInstitution,
    Warehouse,
};
pub use service::InstitutionService;
