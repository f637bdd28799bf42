//! Field rules shared by request types.
//!
//! Each function has the shape `validator` expects for
//! `#[validate(custom(function = "..."))]`.

use std::borrow::Cow;

use validator::ValidationError;

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Rejects empty or whitespace-only text.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule("required", "Wajib diisi"));
    }
    Ok(())
}

/// NIK (Nomor Induk Kependudukan) is exactly 16 digits.
pub fn nik(value: &str) -> Result<(), ValidationError> {
    if value.len() == 16 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(rule("nik", "NIK harus terdiri dari 16 digit angka"))
    }
}

/// Indonesian mobile number: `08…`, `62…` or `+62…`, 10 to 15 digits.
pub fn phone(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let valid_prefix = if trimmed.starts_with('+') {
        digits.starts_with("62")
    } else {
        digits.starts_with("08") || digits.starts_with("62")
    };

    if valid_prefix
        && (10..=15).contains(&digits.len())
        && digits.bytes().all(|b| b.is_ascii_digit())
    {
        Ok(())
    } else {
        Err(rule(
            "phone",
            "Nomor HP harus diawali 08, 62 atau +62 dan berisi 10-15 digit",
        ))
    }
}

/// Absolute `http(s)` URL, as returned by the image host.
pub fn image_url(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));

    match rest {
        Some(rest) if !rest.is_empty() && !rest.contains(char::is_whitespace) => Ok(()),
        _ => Err(rule("url", "URL gambar tidak valid")),
    }
}

/// At least one image, each a valid URL.
pub fn image_urls(values: &[String]) -> Result<(), ValidationError> {
    if values.is_empty() {
        return Err(rule("images_required", "Minimal satu gambar wajib diunggah"));
    }
    values.iter().try_for_each(|url| image_url(url))
}

/// Normalises a WhatsApp number to the international form used by `wa.me`.
///
/// Returns `None` when the number does not pass [`phone`].
#[must_use]
pub fn whatsapp_international(value: &str) -> Option<String> {
    phone(value).ok()?;
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    match digits.strip_prefix('0') {
        Some(local) => Some(format!("62{local}")),
        None => Some(digits.to_string()),
    }
}
