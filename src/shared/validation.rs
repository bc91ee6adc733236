use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for category slugs
    /// Must be lowercase alphanumeric with hyphens
    /// - Valid: "conservacion", "platos-principales", "category-2"
    /// - Invalid: "-org", "org-", "org--name", "Org", "org_name"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();

    /// Regex for `#RRGGBB` colors
    pub static ref HEX_COLOR_REGEX: Regex = Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap();

    /// Regex for files served by the data passthrough: plain names ending in `.json`
    pub static ref DATA_FILENAME_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9_-]+\.json$").unwrap();

    /// Regex for national ID numbers used as login secrets: 4 to 20 digits
    pub static ref CEDULA_REGEX: Regex = Regex::new(r"^[0-9]{4,20}$").unwrap();
}
