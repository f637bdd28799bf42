//! Letter layout as plain data.
//!
//! [`compose`] turns a request and the letterhead into a
//! [`LetterDocument`]; [`super::render`] draws it.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Asia::Jakarta;
use desa_shared::LetterheadConfig;

use super::error::DocumentError;
use super::payload::LetterData;
use super::types::{LetterKind, LetterRecord};

/// Characters per line of running text.
pub const PARAGRAPH_WIDTH: usize = 88;
/// Characters per line in the value column.
pub const VALUE_WIDTH: usize = 58;

const BULAN: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// A label and its wrapped value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRow {
    /// Left column.
    pub label: String,
    /// Value, one entry per printed line.
    pub lines: Vec<String>,
}

/// Everything printed on a letter, already wrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterDocument {
    /// Centred letterhead lines, top to bottom.
    pub letterhead: Vec<String>,
    /// Letterhead address line.
    pub address: String,
    /// Centred, underlined title.
    pub title: String,
    /// `Nomor: ...`.
    pub number_line: String,
    /// Opening paragraph.
    pub opening: Vec<String>,
    /// Data rows.
    pub rows: Vec<DocumentRow>,
    /// Closing paragraph.
    pub closing: Vec<String>,
    /// `Place, date`.
    pub place_date: String,
    /// Title above the signature.
    pub signer_title: String,
    /// Name under the signature.
    pub signer_name: String,
    /// Download file name.
    pub filename: String,
}

/// Indonesian long date, e.g. `17 Agustus 2026`.
#[must_use]
pub fn format_tanggal(date: NaiveDate) -> String {
    let bulan = BULAN[date.month0() as usize];
    format!("{} {bulan} {}", date.day(), date.year())
}

/// Calendar date in Western Indonesia Time.
#[must_use]
pub fn today_in_jakarta(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&Jakarta).date_naive()
}

/// Greedy word wrap. A word longer than `width` gets a line of its own.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// `{kind}-{name}.pdf` with the name reduced to ASCII letters, digits,
/// `-` and `_`.
#[must_use]
pub fn letter_filename(kind: LetterKind, applicant: &str) -> String {
    let mut name = String::with_capacity(applicant.len());
    for ch in applicant.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            name.push(ch);
        } else if !name.ends_with('-') {
            name.push('-');
        }
    }
    let name = name.trim_matches('-');
    let name = if name.is_empty() { "pemohon" } else { name };
    format!("{}-{name}.pdf", kind.slug())
}

fn region_line(prefix: &str, name: &str) -> Option<String> {
    let name = name.trim();
    (!name.is_empty()).then(|| format!("{prefix} {}", name.to_uppercase()))
}

fn letterhead_lines(head: &LetterheadConfig) -> Vec<String> {
    [
        region_line("PEMERINTAH KABUPATEN", &head.kabupaten),
        region_line("KECAMATAN", &head.kecamatan),
        region_line("DESA", &head.nama_desa),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn opening_text(head: &LetterheadConfig) -> String {
    let mut wilayah = format!("Desa {}", head.nama_desa.trim());
    if !head.kecamatan.trim().is_empty() {
        wilayah.push_str(&format!(", Kecamatan {}", head.kecamatan.trim()));
    }
    if !head.kabupaten.trim().is_empty() {
        wilayah.push_str(&format!(", Kabupaten {}", head.kabupaten.trim()));
    }
    format!(
        "Yang bertanda tangan di bawah ini, {} {wilayah}, dengan ini menerangkan bahwa:",
        head.jabatan.trim()
    )
}

fn closing_text(head: &LetterheadConfig, data: &LetterData) -> String {
    let desa = head.nama_desa.trim();
    let body = match data {
        LetterData::Kelahiran(_) => {
            "Benar telah lahir seorang anak dengan keterangan sebagaimana tersebut di atas.".to_string()
        }
        LetterData::Kematian(_) => {
            "Benar telah meninggal dunia dengan keterangan sebagaimana tersebut di atas.".to_string()
        }
        LetterData::IzinKeramaian(_) => format!(
            "Akan menyelenggarakan kegiatan tersebut di atas di wilayah Desa {desa}. Pada prinsipnya \
             Pemerintah Desa tidak keberatan, dengan ketentuan penyelenggara menjaga ketertiban dan \
             keamanan lingkungan."
        ),
        LetterData::PengantarSkck(_) => format!(
            "Orang tersebut di atas adalah benar warga Desa {desa} dan sepanjang pengetahuan kami \
             berkelakuan baik. Surat pengantar ini diberikan untuk keperluan pembuatan Surat \
             Keterangan Catatan Kepolisian (SKCK)."
        ),
        LetterData::Keterangan(_) => format!(
            "Orang tersebut di atas adalah benar warga Desa {desa}. Surat keterangan ini diberikan \
             untuk keperluan sebagaimana tersebut di atas."
        ),
    };
    format!("{body} Demikian surat ini dibuat untuk dipergunakan sebagaimana mestinya.")
}

/// Lays out the letter for `record`, dated `issued_on`.
pub fn compose(
    head: &LetterheadConfig,
    record: &LetterRecord,
    issued_on: NaiveDate,
) -> Result<LetterDocument, DocumentError> {
    let number = record
        .nomor_surat
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or(DocumentError::MissingNumber)?;

    let rows = record
        .data
        .rows()
        .into_iter()
        .map(|(label, value)| DocumentRow {
            label: label.to_string(),
            lines: wrap_text(&value, VALUE_WIDTH),
        })
        .collect();

    let signer_name = if head.kepala_desa.trim().is_empty() {
        "(..............................)".to_string()
    } else {
        head.kepala_desa.trim().to_uppercase()
    };

    Ok(LetterDocument {
        letterhead: letterhead_lines(head),
        address: head.alamat.trim().to_string(),
        title: record.kind.title().to_string(),
        number_line: format!("Nomor: {number}"),
        opening: wrap_text(&opening_text(head), PARAGRAPH_WIDTH),
        rows,
        closing: wrap_text(&closing_text(head, &record.data), PARAGRAPH_WIDTH),
        place_date: format!("{}, {}", head.nama_desa.trim(), format_tanggal(issued_on)),
        signer_title: format!("{} {}", head.jabatan.trim(), head.nama_desa.trim()),
        signer_name,
        filename: letter_filename(record.kind, &record.nama_pemohon),
    })
}
