//! Land-record collection from the Bhulekh portal.
//!
//! Only a mock source exists today: [`MockScraper`] fabricates khatauni rows
//! for the sample gazetteer. A live scraper would implement
//! [`LandRecordSource`] and plug into [`bulk_generate`] unchanged.

pub mod bulk;
pub mod error;
pub mod gazetteer;
pub mod mock;
pub mod source;

pub use bulk::{BulkFailure, BulkReport, bulk_generate};
pub use error::{Error, Result};
pub use mock::MockScraper;
pub use source::{DelayPolicy, LandRecordSource};
