//! # droid-contacts
//!
//! Export contacts from an Android contacts provider database
//! (`contacts2.db`) as JSON and vCard.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  SQLite    │──▶│  Aggregator  │──▶│ JSON (stdout)│
//! │ data rows  │   │ group+render │   │ vCard (file) │
//! └────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`db`] | Read-only database connection |
//! | [`source`] | Contact data query and row decoding |
//! | [`models`] | Raw rows, decoded facts, JSON contact |
//! | [`aggregate`] | Grouping and rendering of contacts |
//! | [`phone`] | Phone number normalization |
//! | [`vcard`] | vCard records and serialization |
//! | [`export`] | The export command |
//! | [`logging`] | Subscriber setup |

pub mod aggregate;
pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod models;
pub mod phone;
pub mod source;
pub mod vcard;
