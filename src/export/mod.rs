//! Contact export formats.

pub mod csv_export;

pub use csv_export::{export_contacts_csv, CsvExport, CSV_HEADER, EXPORT_FILENAME, EXPORT_MEDIA_TYPE};
