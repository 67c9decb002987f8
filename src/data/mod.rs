//! Data module - CSV loading and date-window processing

mod loader;
mod processor;
mod record;

pub use loader::{DataLoader, LoadError};
pub use processor::DataProcessor;
pub use record::{date_to_x, x_to_date, CaseRecord, DateExtent, MarkerInfo, DATE_FORMAT};
