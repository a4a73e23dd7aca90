//! Format checks for bibliographic and business identifiers

use std::sync::LazyLock;

use regex::Regex;

static ISSN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{3}[0-9X]$").expect("valid ISSN pattern"));

static ISBN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(97[89])?[0-9]{9}[0-9X]$").expect("valid ISBN pattern"));

static ORCID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{4}-\d{4}-\d{3}[\dX]$").expect("valid ORCID pattern"));

static ROR_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://ror\.org/0[a-z0-9]{6}[0-9]{2}$").expect("valid ROR pattern")
});

static LANGUAGE_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}$").expect("valid language code pattern"));

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email pattern")
});

/// ISSN in `NNNN-NNNC` form (check character may be `X`, case-insensitive)
pub fn is_valid_issn(issn: &str) -> bool {
    ISSN_REGEX.is_match(&issn.trim().to_uppercase())
}

/// ISBN-10 or ISBN-13; dashes and spaces are ignored
pub fn is_valid_isbn(isbn: &str) -> bool {
    ISBN_REGEX.is_match(&normalize_isbn(isbn))
}

/// Strip dashes and whitespace and upper-case the check character
pub fn normalize_isbn(isbn: &str) -> String {
    isbn.chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// ORCID iD without the `https://orcid.org/` prefix
pub fn is_valid_orcid(orcid: &str) -> bool {
    ORCID_REGEX.is_match(orcid.trim())
}

/// Two-letter ISO 639-1 code
pub fn is_valid_language_code(code: &str) -> bool {
    LANGUAGE_CODE_REGEX.is_match(&code.trim().to_lowercase())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Serbian tax number (PIB): digits only, 9 or 12 long
pub fn is_valid_pib(pib: &str) -> bool {
    let pib = pib.trim();
    (pib.len() == 9 || pib.len() == 12) && pib.chars().all(|c| c.is_ascii_digit())
}

/// Company registration number: non-empty, digits only
pub fn is_valid_registration_number(number: &str) -> bool {
    let number = number.trim();
    !number.is_empty() && number.chars().all(|c| c.is_ascii_digit())
}

/// Research Organization Registry id as its canonical URL,
/// e.g. `https://ror.org/02mhbdp94`
pub fn is_valid_ror_id(ror_id: &str) -> bool {
    ROR_ID_REGEX.is_match(ror_id.trim())
}

/// Crossref member id: non-empty, alphanumeric
pub fn is_valid_crossref_member_id(id: &str) -> bool {
    let id = id.trim();
    !id.is_empty() && id.chars().all(char::is_alphanumeric)
}
