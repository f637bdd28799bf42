//! Citizen-submitted data for each letter kind.

use std::borrow::Cow;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

use super::types::LetterKind;
use crate::validation::{nik, not_blank, phone};

/// Sex as written on civil documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JenisKelamin {
    /// Male.
    #[serde(rename = "laki-laki")]
    LakiLaki,
    /// Female.
    #[serde(rename = "perempuan")]
    Perempuan,
}

impl fmt::Display for JenisKelamin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LakiLaki => "Laki-laki",
            Self::Perempuan => "Perempuan",
        })
    }
}

fn date_order(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Birth statement (`surat-kelahiran`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct BirthReport {
    /// Child's name.
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub nama_anak: String,
    /// Child's sex.
    pub jenis_kelamin: JenisKelamin,
    /// Place of birth.
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub tempat_lahir: String,
    /// Date of birth.
    pub tanggal_lahir: NaiveDate,
    /// Time of birth, free text ("08.30 WIB").
    #[serde(default)]
    #[validate(length(max = 20))]
    pub jam_lahir: Option<String>,
    /// Birth order.
    #[serde(default)]
    #[validate(range(min = 1, max = 20))]
    pub anak_ke: Option<u8>,
    /// Father's name.
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub nama_ayah: String,
    /// Father's NIK.
    #[validate(custom(function = "nik"))]
    pub nik_ayah: String,
    /// Mother's name.
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub nama_ibu: String,
    /// Mother's NIK.
    #[validate(custom(function = "nik"))]
    pub nik_ibu: String,
    /// Family address.
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub alamat: String,
    /// Person filing the request.
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub nama_pelapor: String,
    /// Filer's NIK.
    #[validate(custom(function = "nik"))]
    pub nik_pelapor: String,
    /// Filer's relation to the child.
    #[validate(custom(function = "not_blank"), length(max = 50))]
    pub hubungan_pelapor: String,
    /// Filer's phone.
    #[validate(custom(function = "phone"))]
    pub no_hp: String,
}

/// Death statement (`surat-kematian`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "death_after_birth"))]
pub struct DeathReport {
    /// Name of the deceased.
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub nama: String,
    /// NIK of the deceased.
    #[validate(custom(function = "nik"))]
    pub nik: String,
    /// Sex.
    pub jenis_kelamin: JenisKelamin,
    /// Place of birth.
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub tempat_lahir: String,
    /// Date of birth.
    pub tanggal_lahir: NaiveDate,
    /// Last address.
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub alamat: String,
    /// Date of death.
    pub tanggal_meninggal: NaiveDate,
    /// Place of death.
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub tempat_meninggal: String,
    /// Cause of death.
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub sebab_meninggal: String,
    /// Person filing the request.
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub nama_pelapor: String,
    /// Filer's NIK.
    #[validate(custom(function = "nik"))]
    pub nik_pelapor: String,
    /// Filer's relation to the deceased.
    #[validate(custom(function = "not_blank"), length(max = 50))]
    pub hubungan_pelapor: String,
    /// Filer's phone.
    #[validate(custom(function = "phone"))]
    pub no_hp: String,
}

fn death_after_birth(report: &DeathReport) -> Result<(), ValidationError> {
    if report.tanggal_meninggal < report.tanggal_lahir {
        return Err(date_order(
            "date_order",
            "Tanggal meninggal tidak boleh sebelum tanggal lahir",
        ));
    }
    Ok(())
}

/// Event permit (`surat-izin-keramaian`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "event_dates"))]
pub struct EventPermit {
    /// Organiser's name.
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub nama: String,
    /// Organiser's NIK.
    #[validate(custom(function = "nik"))]
    pub nik: String,
    /// Organiser's address.
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub alamat: String,
    /// Organiser's phone.
    #[validate(custom(function = "phone"))]
    pub no_hp: String,
    /// Kind of event, e.g. "Hajatan pernikahan".
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub jenis_acara: String,
    /// First day.
    pub tanggal_mulai: NaiveDate,
    /// Last day.
    pub tanggal_selesai: NaiveDate,
    /// Hours, free text ("19.00 - 23.00 WIB").
    #[validate(custom(function = "not_blank"), length(max = 60))]
    pub waktu: String,
    /// Venue.
    #[validate(custom(function = "not_blank"), length(max = 150))]
    pub tempat_acara: String,
    /// Expected guests.
    #[serde(default)]
    pub jumlah_undangan: Option<u32>,
    /// Entertainment, if any.
    #[serde(default)]
    #[validate(length(max = 150))]
    pub hiburan: Option<String>,
}

fn event_dates(permit: &EventPermit) -> Result<(), ValidationError> {
    if permit.tanggal_selesai < permit.tanggal_mulai {
        return Err(date_order(
            "date_order",
            "Tanggal selesai tidak boleh sebelum tanggal mulai",
        ));
    }
    Ok(())
}

/// Police-record referral (`surat-pengantar-skck`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SkckReferral {
    /// Applicant's name.
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub nama: String,
    /// Applicant's NIK.
    #[validate(custom(function = "nik"))]
    pub nik: String,
    /// Sex.
    pub jenis_kelamin: JenisKelamin,
    /// Place of birth.
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub tempat_lahir: String,
    /// Date of birth.
    pub tanggal_lahir: NaiveDate,
    /// Religion.
    #[validate(custom(function = "not_blank"), length(max = 30))]
    pub agama: String,
    /// Marital status.
    #[validate(custom(function = "not_blank"), length(max = 30))]
    pub status_perkawinan: String,
    /// Occupation.
    #[validate(custom(function = "not_blank"), length(max = 60))]
    pub pekerjaan: String,
    /// Address.
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub alamat: String,
    /// What the certificate is needed for.
    #[validate(custom(function = "not_blank"), length(max = 300))]
    pub keperluan: String,
    /// Phone.
    #[validate(custom(function = "phone"))]
    pub no_hp: String,
}

/// General statement (`surat-keterangan`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct GeneralStatement {
    /// Applicant's name.
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub nama: String,
    /// Applicant's NIK.
    #[validate(custom(function = "nik"))]
    pub nik: String,
    /// Sex.
    pub jenis_kelamin: JenisKelamin,
    /// Place of birth.
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub tempat_lahir: String,
    /// Date of birth.
    pub tanggal_lahir: NaiveDate,
    /// Occupation.
    #[validate(custom(function = "not_blank"), length(max = 60))]
    pub pekerjaan: String,
    /// Address.
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub alamat: String,
    /// What the statement is for.
    #[validate(custom(function = "not_blank"), length(max = 300))]
    pub keperluan: String,
    /// Extra remarks printed on the letter.
    #[serde(default)]
    #[validate(length(max = 500))]
    pub keterangan: Option<String>,
    /// Phone.
    #[validate(custom(function = "phone"))]
    pub no_hp: String,
}

/// Payload of any letter kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LetterData {
    /// `surat-kelahiran`.
    Kelahiran(BirthReport),
    /// `surat-kematian`.
    Kematian(DeathReport),
    /// `surat-izin-keramaian`.
    IzinKeramaian(EventPermit),
    /// `surat-pengantar-skck`.
    PengantarSkck(SkckReferral),
    /// `surat-keterangan`.
    Keterangan(GeneralStatement),
}

fn tanggal(date: NaiveDate) -> String {
    super::document::format_tanggal(date)
}

fn ttl(tempat: &str, date: NaiveDate) -> String {
    format!("{tempat}, {}", tanggal(date))
}

impl LetterData {
    /// Decodes the payload of `kind`.
    pub fn from_json(kind: LetterKind, value: Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            LetterKind::Kelahiran => Self::Kelahiran(serde_json::from_value(value)?),
            LetterKind::Kematian => Self::Kematian(serde_json::from_value(value)?),
            LetterKind::IzinKeramaian => Self::IzinKeramaian(serde_json::from_value(value)?),
            LetterKind::PengantarSkck => Self::PengantarSkck(serde_json::from_value(value)?),
            LetterKind::Keterangan => Self::Keterangan(serde_json::from_value(value)?),
        })
    }

    /// Encodes the payload for storage.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Kind this payload belongs to.
    #[must_use]
    pub const fn kind(&self) -> LetterKind {
        match self {
            Self::Kelahiran(_) => LetterKind::Kelahiran,
            Self::Kematian(_) => LetterKind::Kematian,
            Self::IzinKeramaian(_) => LetterKind::IzinKeramaian,
            Self::PengantarSkck(_) => LetterKind::PengantarSkck,
            Self::Keterangan(_) => LetterKind::Keterangan,
        }
    }

    /// Runs the field rules of the inner payload.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Self::Kelahiran(p) => p.validate(),
            Self::Kematian(p) => p.validate(),
            Self::IzinKeramaian(p) => p.validate(),
            Self::PengantarSkck(p) => p.validate(),
            Self::Keterangan(p) => p.validate(),
        }
    }

    /// Name the request is filed under: the reporter for birth and death
    /// statements, the applicant otherwise.
    #[must_use]
    pub fn applicant_name(&self) -> &str {
        match self {
            Self::Kelahiran(p) => &p.nama_pelapor,
            Self::Kematian(p) => &p.nama_pelapor,
            Self::IzinKeramaian(p) => &p.nama,
            Self::PengantarSkck(p) => &p.nama,
            Self::Keterangan(p) => &p.nama,
        }
    }

    /// Label/value rows printed in the body of the letter.
    #[must_use]
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Kelahiran(p) => {
                let mut rows = vec![
                    ("Nama Anak", p.nama_anak.clone()),
                    ("Jenis Kelamin", p.jenis_kelamin.to_string()),
                    ("Tempat, Tanggal Lahir", ttl(&p.tempat_lahir, p.tanggal_lahir)),
                ];
                if let Some(jam) = p.jam_lahir.as_deref().filter(|j| !j.trim().is_empty()) {
                    rows.push(("Pukul", jam.to_string()));
                }
                if let Some(anak_ke) = p.anak_ke {
                    rows.push(("Anak Ke", anak_ke.to_string()));
                }
                rows.extend([
                    ("Nama Ayah", p.nama_ayah.clone()),
                    ("NIK Ayah", p.nik_ayah.clone()),
                    ("Nama Ibu", p.nama_ibu.clone()),
                    ("NIK Ibu", p.nik_ibu.clone()),
                    ("Alamat", p.alamat.clone()),
                    ("Nama Pelapor", p.nama_pelapor.clone()),
                    ("Hubungan dengan Anak", p.hubungan_pelapor.clone()),
                ]);
                rows
            }
            Self::Kematian(p) => vec![
                ("Nama", p.nama.clone()),
                ("NIK", p.nik.clone()),
                ("Jenis Kelamin", p.jenis_kelamin.to_string()),
                ("Tempat, Tanggal Lahir", ttl(&p.tempat_lahir, p.tanggal_lahir)),
                ("Alamat", p.alamat.clone()),
                ("Tanggal Meninggal", tanggal(p.tanggal_meninggal)),
                ("Tempat Meninggal", p.tempat_meninggal.clone()),
                ("Sebab Meninggal", p.sebab_meninggal.clone()),
                ("Nama Pelapor", p.nama_pelapor.clone()),
                ("Hubungan dengan Almarhum", p.hubungan_pelapor.clone()),
            ],
            Self::IzinKeramaian(p) => {
                let hari = if p.tanggal_mulai == p.tanggal_selesai {
                    tanggal(p.tanggal_mulai)
                } else {
                    format!("{} s.d. {}", tanggal(p.tanggal_mulai), tanggal(p.tanggal_selesai))
                };
                let mut rows = vec![
                    ("Nama", p.nama.clone()),
                    ("NIK", p.nik.clone()),
                    ("Alamat", p.alamat.clone()),
                    ("Jenis Acara", p.jenis_acara.clone()),
                    ("Hari/Tanggal", hari),
                    ("Waktu", p.waktu.clone()),
                    ("Tempat", p.tempat_acara.clone()),
                ];
                if let Some(jumlah) = p.jumlah_undangan {
                    rows.push(("Jumlah Undangan", format!("{jumlah} orang")));
                }
                if let Some(hiburan) = p.hiburan.as_deref().filter(|h| !h.trim().is_empty()) {
                    rows.push(("Hiburan", hiburan.to_string()));
                }
                rows
            }
            Self::PengantarSkck(p) => vec![
                ("Nama", p.nama.clone()),
                ("NIK", p.nik.clone()),
                ("Jenis Kelamin", p.jenis_kelamin.to_string()),
                ("Tempat, Tanggal Lahir", ttl(&p.tempat_lahir, p.tanggal_lahir)),
                ("Agama", p.agama.clone()),
                ("Status Perkawinan", p.status_perkawinan.clone()),
                ("Pekerjaan", p.pekerjaan.clone()),
                ("Alamat", p.alamat.clone()),
                ("Keperluan", p.keperluan.clone()),
            ],
            Self::Keterangan(p) => {
                let mut rows = vec![
                    ("Nama", p.nama.clone()),
                    ("NIK", p.nik.clone()),
                    ("Jenis Kelamin", p.jenis_kelamin.to_string()),
                    ("Tempat, Tanggal Lahir", ttl(&p.tempat_lahir, p.tanggal_lahir)),
                    ("Pekerjaan", p.pekerjaan.clone()),
                    ("Alamat", p.alamat.clone()),
                    ("Keperluan", p.keperluan.clone()),
                ];
                if let Some(ket) = p.keterangan.as_deref().filter(|k| !k.trim().is_empty()) {
                    rows.push(("Keterangan", ket.to_string()));
                }
                rows
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn birth() -> BirthReport {
        BirthReport {
            nama_anak: "Putri Ayu Lestari".into(),
            jenis_kelamin: JenisKelamin::Perempuan,
            tempat_lahir: "Sukamaju".into(),
            tanggal_lahir: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            jam_lahir: Some("08.30 WIB".into()),
            anak_ke: Some(2),
            nama_ayah: "Budi Santoso".into(),
            nik_ayah: "3201010101900001".into(),
            nama_ibu: "Siti Aminah".into(),
            nik_ibu: "3201014101920002".into(),
            alamat: "Dusun Krajan RT 01/RW 02".into(),
            nama_pelapor: "Budi Santoso".into(),
            nik_pelapor: "3201010101900001".into(),
            hubungan_pelapor: "Ayah".into(),
            no_hp: "081234567890".into(),
        }
    }

    pub fn statement() -> GeneralStatement {
        GeneralStatement {
            nama: "Rina Wulandari".into(),
            nik: "3201015505950003".into(),
            jenis_kelamin: JenisKelamin::Perempuan,
            tempat_lahir: "Bandung".into(),
            tanggal_lahir: NaiveDate::from_ymd_opt(1995, 5, 15).unwrap(),
            pekerjaan: "Wiraswasta".into(),
            alamat: "Dusun Sukamulya RT 03/RW 01".into(),
            keperluan: "Persyaratan pengajuan kredit usaha".into(),
            keterangan: None,
            no_hp: "+6281298765432".into(),
        }
    }
}
