//! Roster management for five-role League of Legends teams: players, rolling
//! match stats, team formation, and CSV import/export.

pub mod analysis;
pub mod config;
pub mod csv_io;
pub mod error;
pub mod roster;
pub mod storage;
