use std::str::FromStr;

use gompa_model::{AudioGuides, ContactInfo, HeritageSite, SiteDraft};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Admin form fields exactly as entered.
///
/// `images` holds one URL per line. `audio_guide_urls` holds one
/// `code=url` pair per line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteForm {
    pub name: String,
    pub description: String,
    pub location: String,
    pub latitude: String,
    pub longitude: String,
    pub altitude: String,
    pub founded_year: String,
    pub tradition: String,
    pub main_deity: String,
    pub significance: String,
    pub visiting_hours: String,
    pub entry_fee: String,
    pub phone: String,
    pub email: String,
    pub images: String,
    pub virtual_tour_url: String,
    pub audio_guide_urls: String,
}

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn display<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl SiteForm {
    /// Pre-fills the form for editing an existing site.
    pub fn from_site(site: &HeritageSite) -> Self {
        let contact = site.contact_info.clone().unwrap_or_default();
        Self {
            name: site.name.clone(),
            description: site.description.clone().unwrap_or_default(),
            location: site.location.clone(),
            latitude: display(site.latitude),
            longitude: display(site.longitude),
            altitude: display(site.altitude),
            founded_year: display(site.founded_year),
            tradition: site.tradition.clone().unwrap_or_default(),
            main_deity: site.main_deity.clone().unwrap_or_default(),
            significance: site.significance.clone().unwrap_or_default(),
            visiting_hours: site.visiting_hours.clone().unwrap_or_default(),
            entry_fee: site.entry_fee.clone().unwrap_or_default(),
            phone: contact.phone.unwrap_or_default(),
            email: contact.email.unwrap_or_default(),
            images: site.images.join("\n"),
            virtual_tour_url: site.virtual_tour_url.clone().unwrap_or_default(),
            audio_guide_urls: site
                .audio_guide_urls
                .0
                .iter()
                .map(|(code, url)| format!("{code}={url}"))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Produces a store-ready draft or every field-level problem found.
    pub fn validate(&self) -> Result<SiteDraft, ValidationError> {
        let mut errors = ValidationError::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push("name", "is required");
        }
        let location = self.location.trim();
        if location.is_empty() {
            errors.push("location", "is required");
        }

        let latitude = parse_number::<f64>(&mut errors, "latitude", &self.latitude)
            .filter(|lat| check_range(&mut errors, "latitude", *lat, 90.0));
        let longitude = parse_number::<f64>(&mut errors, "longitude", &self.longitude)
            .filter(|lon| check_range(&mut errors, "longitude", *lon, 180.0));
        let altitude = parse_number::<i32>(&mut errors, "altitude", &self.altitude);
        let founded_year = parse_number::<i32>(&mut errors, "founded_year", &self.founded_year);

        let images: Vec<String> = self
            .images
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        let audio_guide_urls = parse_audio_guides(&mut errors, &self.audio_guide_urls);

        if !errors.is_empty() {
            return Err(errors);
        }

        let contact = ContactInfo {
            phone: optional(&self.phone),
            email: optional(&self.email),
        };

        Ok(SiteDraft {
            name: name.to_string(),
            description: optional(&self.description),
            location: location.to_string(),
            latitude,
            longitude,
            altitude,
            founded_year,
            tradition: optional(&self.tradition),
            main_deity: optional(&self.main_deity),
            significance: optional(&self.significance),
            visiting_hours: optional(&self.visiting_hours),
            entry_fee: optional(&self.entry_fee),
            contact_info: (!contact.is_empty()).then_some(contact),
            images,
            virtual_tour_url: optional(&self.virtual_tour_url),
            audio_guide_urls,
        })
    }
}

fn parse_number<T: FromStr>(
    errors: &mut ValidationError,
    field: &'static str,
    raw: &str,
) -> Option<T> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(field, "must be a number");
            None
        }
    }
}

fn check_range(errors: &mut ValidationError, field: &'static str, value: f64, bound: f64) -> bool {
    if value.is_finite() && (-bound..=bound).contains(&value) {
        true
    } else {
        errors.push(field, format!("must be between -{bound} and {bound}"));
        false
    }
}

fn parse_audio_guides(errors: &mut ValidationError, raw: &str) -> AudioGuides {
    let mut guides = AudioGuides::new();
    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match line.split_once('=') {
            Some((code, url)) if !code.trim().is_empty() && !url.trim().is_empty() => {
                guides.insert(code.trim().to_ascii_lowercase(), url.trim());
            }
            _ => {
                errors.push("audio_guide_urls", "each line must look like `code=url`");
                break;
            }
        }
    }
    guides
}
