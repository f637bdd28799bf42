//! Core business logic for the desa portal.
//!
//! No web framework or database dependencies. All domain types, validation
//! rules and calculations live here; the only I/O is the CAPTCHA site-verify
//! client in [`captcha`].
//!
//! # Modules
//!
//! - `apbdes` - Village budget documents, total derivation and the line-item editor
//! - `demography` - Yearly population snapshots
//! - `umkm` - Micro and small enterprise listings
//! - `dusun` - Hamlet profiles
//! - `letters` - Citizen letter requests, admin workflow and PDF letters
//! - `public` - Year selection state for public pages
//! - `charts` - Chart-ready series
//! - `captcha` - CAPTCHA verification port and site-verify client
//! - `auth` - Admin password hashing and roles

pub mod apbdes;
pub mod auth;
pub mod captcha;
pub mod charts;
pub mod demography;
pub mod dusun;
pub mod letters;
pub mod public;
pub mod umkm;
pub mod validation;
