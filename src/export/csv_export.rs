//! CSV rendering of contact selections.

use crate::error::{ExportError, ExportResult};
use crate::models::Contact;

/// Download name for exported selections.
pub const EXPORT_FILENAME: &str = "contactos.csv";

/// Media type of exported selections.
pub const EXPORT_MEDIA_TYPE: &str = "text/csv; charset=utf-8";

/// Column titles, written as the first row.
pub const CSV_HEADER: [&str; 4] = ["Nombre", "Teléfono", "Correo", "Dirección"];

/// A rendered export ready to hand to a caller as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: &'static str,
    pub media_type: &'static str,
    pub record_count: usize,
    pub bytes: Vec<u8>,
}

impl CsvExport {
    /// The CSV body as text.
    ///
    /// Always valid UTF-8 since every cell comes from a `String`.
    pub fn as_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

/// Render `contacts` as CSV, in the order given.
///
/// Writes the [`CSV_HEADER`] row followed by one `name,phone,email,address`
/// row per contact. Cells containing commas, quotes or line breaks are quoted.
/// Rows end with `\n`.
pub fn export_contacts_csv<'a, I>(contacts: I) -> ExportResult<CsvExport>
where
    I: IntoIterator<Item = &'a Contact>,
{
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;

    let mut record_count = 0;
    for contact in contacts {
        writer.write_record([
            contact.name.as_str(),
            contact.phone.as_str(),
            contact.email.as_str(),
            contact.address.as_str(),
        ])?;
        record_count += 1;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;

    Ok(CsvExport {
        filename: EXPORT_FILENAME,
        media_type: EXPORT_MEDIA_TYPE,
        record_count,
        bytes,
    })
}
