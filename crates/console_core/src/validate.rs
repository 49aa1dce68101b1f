//! Case-insensitive lookups over the externally supplied configuration.
//!
//! These feed UI affordances only; the backend revalidates everything it
//! actually executes.

/// One country with its ordered city list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryEntry {
    pub name: String,
    pub cities: Vec<String>,
}

/// Read-only snapshot of the lookup tables, fetched once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationConfig {
    countries: Vec<CountryEntry>,
    niches: Vec<String>,
    niche_priority: Vec<String>,
}

impl ValidationConfig {
    pub fn new(
        countries: Vec<CountryEntry>,
        niches: Vec<String>,
        niche_priority: Vec<String>,
    ) -> Self {
        Self {
            countries,
            niches,
            niche_priority,
        }
    }

    pub fn countries(&self) -> &[CountryEntry] {
        &self.countries
    }

    pub fn niches(&self) -> &[String] {
        &self.niches
    }

    pub fn niche_priority(&self) -> &[String] {
        &self.niche_priority
    }

    pub fn is_known_country(&self, name: &str) -> bool {
        self.country_entry(name).is_some()
    }

    /// Cities for a country, matched case-insensitively on the country name.
    pub fn cities_for(&self, country: &str) -> Option<&[String]> {
        self.country_entry(country).map(|c| c.cities.as_slice())
    }

    pub fn is_known_city(&self, country: &str, city: &str) -> bool {
        self.cities_for(country)
            .is_some_and(|cities| cities.iter().any(|c| eq_fold(c, city)))
    }

    pub fn is_known_niche(&self, name: &str) -> bool {
        self.niches.iter().any(|n| eq_fold(n, name))
    }

    /// First country whose city list contains a case-insensitive match.
    pub fn find_country_for_city(&self, city: &str) -> Option<&str> {
        self.countries
            .iter()
            .find(|entry| entry.cities.iter().any(|c| eq_fold(c, city)))
            .map(|entry| entry.name.as_str())
    }

    fn country_entry(&self, name: &str) -> Option<&CountryEntry> {
        self.countries.iter().find(|c| eq_fold(&c.name, name))
    }
}

fn eq_fold(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Cross-field check applied before dispatching a pipeline start.
///
/// A non-empty city with no country triggers a best-effort reverse lookup;
/// when that fails the start is rejected so a mismatched pair is never
/// dispatched. Returns the (country, city) pair to send, empty fields
/// mapped to `None`.
pub fn resolve_start_fields(
    country: &str,
    city: &str,
    config: &ValidationConfig,
) -> Result<(Option<String>, Option<String>), String> {
    let country = country.trim();
    let city = city.trim();

    if !city.is_empty() && country.is_empty() {
        return match config.find_country_for_city(city) {
            Some(found) => Ok((Some(found.to_string()), Some(city.to_string()))),
            None => Err(format!(
                "City '{city}' is not in the configured city list; select a country first."
            )),
        };
    }

    let country = (!country.is_empty()).then(|| country.to_string());
    let city = (!city.is_empty()).then(|| city.to_string());
    Ok((country, city))
}
