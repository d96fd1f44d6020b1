//! Party role catalogue

use riskview_domain::constants::DEFAULT_ROLE_CODES;

/// Known party roles and their display text.
pub const ROLE_CATALOGUE: [(&str, &str); 4] = [
    ("1001", "Solicitante"),
    ("Z018", "Cliente"),
    ("Z031", "Representante Legal"),
    ("Z050", "Beneficiario Final"),
];

/// Display text for a role code, if it is part of the catalogue.
pub fn role_text(code: &str) -> Option<&'static str> {
    let code = code.trim();
    ROLE_CATALOGUE.iter().find(|(known, _)| *known == code).map(|(_, text)| *text)
}

pub fn is_known_role(code: &str) -> bool {
    role_text(code).is_some()
}

/// Role codes requested when the caller configures none.
pub fn default_role_codes() -> Vec<String> {
    DEFAULT_ROLE_CODES.iter().map(|code| (*code).to_string()).collect()
}
