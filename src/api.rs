use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Number of profiles requested per fetch cycle.
pub const RESULT_COUNT: usize = 12;

/// Default host serving randomuser-shaped payloads.
pub const DEFAULT_API_URL: &str = "https://randomuser.me";

/// Nationality codes the API can generate, with display names.
pub const COUNTRIES: &[(&str, &str)] = &[
    ("AU", "Australia"),
    ("BR", "Brazil"),
    ("CA", "Canada"),
    ("CH", "Switzerland"),
    ("DE", "Germany"),
    ("DK", "Denmark"),
    ("ES", "Spain"),
    ("FI", "Finland"),
    ("FR", "France"),
    ("GB", "United Kingdom"),
    ("IE", "Ireland"),
    ("IN", "India"),
    ("IR", "Iran"),
    ("MX", "Mexico"),
    ("NL", "Netherlands"),
    ("NO", "Norway"),
    ("NZ", "New Zealand"),
    ("RS", "Serbia"),
    ("TR", "Turkey"),
    ("UA", "Ukraine"),
    ("US", "United States"),
];

/// Display name for a nationality code, if it is one the API documents.
pub fn country_name(code: &str) -> Option<&'static str> {
    COUNTRIES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Next code in the supported list, wrapping at the end. Unlisted codes
/// restart the cycle from the first entry.
pub fn next_country(current: &str) -> &'static str {
    match COUNTRIES.iter().position(|(code, _)| *code == current) {
        Some(idx) => COUNTRIES[(idx + 1) % COUNTRIES.len()].0,
        None => COUNTRIES[0].0,
    }
}

/// Previous code in the supported list, wrapping at the start.
pub fn prev_country(current: &str) -> &'static str {
    match COUNTRIES.iter().position(|(code, _)| *code == current) {
        Some(idx) => COUNTRIES[(idx + COUNTRIES.len() - 1) % COUNTRIES.len()].0,
        None => COUNTRIES[0].0,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Gender {
    #[default]
    Any,
    Female,
    Male,
}

impl Gender {
    /// Value sent in the query string. Empty selects both genders.
    pub fn query_value(self) -> &'static str {
        match self {
            Gender::Any => "",
            Gender::Female => "female",
            Gender::Male => "male",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Any => "any",
            Gender::Female => "female",
            Gender::Male => "male",
        }
    }

    /// Next value in the cycle used by the filter form.
    pub fn cycled(self) -> Self {
        match self {
            Gender::Any => Gender::Female,
            Gender::Female => Gender::Male,
            Gender::Male => Gender::Any,
        }
    }
}

/// Search filter relayed verbatim into the request URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    pub gender: Gender,
    pub country: String,
}

impl Default for Filter {
    fn default() -> Self {
        Filter {
            gender: Gender::Any,
            country: "US".to_string(),
        }
    }
}

/// Build the request URL for one fetch cycle.
///
/// The gender key is always present, empty-valued when no gender is
/// selected, so the URL shape never varies with the filter.
pub fn request_url(base: &str, filter: &Filter) -> String {
    format!(
        "{}/api/?results={}&gender={}&nat={}",
        base.trim_end_matches('/'),
        RESULT_COUNT,
        filter.gender.query_value(),
        filter.country
    )
}

/// One profile from the API's `results` array.
///
/// Only the fields the views consume are modeled; serde skips the rest
/// of the payload. `login.uuid` is the stable identity of a row.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Profile {
    pub gender: String,
    pub name: Name,
    pub email: String,
    pub login: Login,
    pub dob: Dob,
    pub location: Location,
    pub nat: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Name {
    pub title: String,
    pub first: String,
    pub last: String,
}

impl Name {
    pub fn full(&self) -> String {
        format!("{} {} {}", self.title, self.first, self.last)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Login {
    pub uuid: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Dob {
    pub age: u32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Location {
    pub city: String,
    pub country: String,
}

/// Top-level response envelope. The `info` block is not consumed.
#[derive(Debug, Deserialize)]
struct Page {
    results: Vec<Profile>,
}

/// Decode a response body into the profile batch.
pub fn decode_page(body: &str) -> Result<Vec<Profile>> {
    let page: Page = serde_json::from_str(body)?;
    Ok(page.results)
}
