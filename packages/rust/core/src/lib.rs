//! Domain logic for folio.
//!
//! Turns a sectionized portfolio document into [`PortfolioContent`], serves
//! filtered views of it at runtime, and writes it out as a typed asset at
//! build time.
//!
//! [`PortfolioContent`]: folio_shared::PortfolioContent

pub mod builder;
pub mod classify;
pub mod dates;
pub mod generate;
pub mod store;
pub mod view;
pub mod vocabulary;

pub use builder::{Parsed, build, build_with, parse, parse_with};
pub use generate::{GenerateConfig, GenerateReport, generate};
pub use store::PortfolioStore;
pub use view::{PortfolioView, ViewItems, ViewRequest, project};
pub use vocabulary::Vocabulary;
