//! Folio application library: domain modules hosted on the Folio
//! module system.

pub mod modules;
