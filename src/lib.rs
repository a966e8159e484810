pub mod browser;
pub mod collect;
pub mod config;
pub mod element;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod navigate;
pub mod page;
pub mod report;
pub mod survey;
pub mod tabs;

pub use browser::Session;
pub use collect::{CollectionLoop, RunState, StopReason};
pub use config::{Selectors, SurveyConfig};
pub use error::{Error, Result};
pub use extract::ExtractionResult;
pub use page::Tab;
