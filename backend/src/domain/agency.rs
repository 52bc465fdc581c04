//! Certification agency catalogue entries.

use url::Url;

use super::Error;
use super::validation::{FieldErrors, MUST_BE_PROVIDED, check_char_len, non_blank, non_blank_token};

/// Unvalidated agency submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgencyRequest {
    /// Short name, for example "PADI".
    pub common_name: Option<String>,
    /// Registered full name.
    pub full_name: Option<String>,
    /// Optional acronym.
    pub acronym: Option<String>,
    /// Web site.
    pub url: Option<String>,
}

/// Agency row ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAgency {
    /// Short name, for example "PADI".
    pub common_name: String,
    /// Registered full name.
    pub full_name: String,
    /// Optional acronym.
    pub acronym: Option<String>,
    /// Web site.
    pub url: Option<Url>,
}

/// Persisted agency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agency {
    /// Surrogate key.
    pub id: i64,
    /// Short name, for example "PADI".
    pub common_name: String,
    /// Registered full name.
    pub full_name: String,
    /// Optional acronym.
    pub acronym: Option<String>,
    /// Web site.
    pub url: Option<String>,
}

fn is_web_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https") && url.host_str().is_some()
}

impl AgencyRequest {
    /// Validate every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns a validation failure keyed by field name.
    pub fn validate(self) -> Result<NewAgency, Error> {
        let mut errors = FieldErrors::new();

        let common_name = non_blank(self.common_name);
        let full_name = non_blank(self.full_name);
        for (field, value) in [("common_name", &common_name), ("full_name", &full_name)] {
            if value.is_none() {
                errors.add(field, MUST_BE_PROVIDED);
            }
            check_char_len(&mut errors, field, value.as_deref(), 2, 256);
        }

        let acronym = non_blank(self.acronym);
        check_char_len(&mut errors, "acronym", acronym.as_deref(), 2, 12);

        let url = non_blank_token(self.url).and_then(|raw| match Url::parse(&raw) {
            Ok(parsed) if is_web_url(&parsed) => Some(parsed),
            _ => {
                errors.add("url", "must be a valid http or https URL");
                None
            }
        });

        errors.into_result()?;
        let (Some(common_name), Some(full_name)) = (common_name, full_name) else {
            return Err(Error::internal("agency validation accepted inconsistent input"));
        };

        Ok(NewAgency {
            common_name,
            full_name,
            acronym,
            url,
        })
    }
}
