//! The singleton site-copy document and its page-lifetime cache.
//!
//! # Design
//! Every user-facing string on the public site lives in one `StaticContent`
//! document owned by the backend. `ContentCache` fetches it once, hands out
//! the same value to every consumer, and write-through saves edits. If the
//! fetch fails for any reason the cache installs [`StaticContent::fallback`]
//! and records the error, so a consumer always has a renderable document —
//! freshness is traded for never showing a "content missing" state.
//!
//! Concurrent saves are not coalesced or locked; the last write this client
//! observes wins locally. There is no version stamping.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::FestivalApi;
use crate::error::ApiError;

/// Headline figures rendered in the hero section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsBlock {
    pub events_count: String,
    pub events_label: String,
    pub celebration_duration: String,
    pub celebration_label: String,
    pub participants_count: String,
    pub participants_label: String,
}

/// One feature card in the about section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutFeature {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub gradient: String,
}

/// Event date/location/contact block in the footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterEventInfo {
    pub date: String,
    pub location: String,
    pub phone: String,
}

/// Social profile URLs in the footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaLinks {
    pub instagram: String,
    pub facebook: String,
    pub twitter: String,
}

/// The singleton site-copy document. Overwritten wholesale on save; there is
/// no partial patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticContent {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub festival_name: String,
    pub festival_dates: String,
    pub festival_location: String,
    pub hero_subtitle: String,
    pub stats: StatsBlock,
    pub about_title: String,
    pub about_description: String,
    pub about_features: Vec<AboutFeature>,
    pub events_title: String,
    pub register_title: String,
    pub register_description: String,
    pub register_form_title: String,
    pub register_form_description: String,
    pub register_button_text: String,
    pub register_disclaimer: String,
    pub event_registration_form_url: String,
    pub volunteer_title: String,
    pub volunteer_description: String,
    pub volunteer_form_title: String,
    pub volunteer_form_description: String,
    pub volunteer_button_text: String,
    pub volunteer_disclaimer: String,
    pub volunteer_registration_form_url: String,
    pub committee_title: String,
    pub committee_description: String,
    pub footer_description: String,
    pub footer_quick_links: Vec<String>,
    pub footer_event_info: FooterEventInfo,
    pub social_media_links: SocialMediaLinks,
    pub copyright_text: String,
}

impl StaticContent {
    /// The hard-coded default document installed when the backend copy cannot
    /// be fetched.
    pub fn fallback() -> Self {
        Self {
            id: None,
            festival_name: "VARNAVE'25".to_string(),
            festival_dates: "September 12-13, 2025".to_string(),
            festival_location: "Coimbatore".to_string(),
            hero_subtitle: "Cultural Festival • September 12-13, 2025 • Coimbatore".to_string(),
            stats: StatsBlock {
                events_count: "20+".to_string(),
                events_label: "Events".to_string(),
                celebration_duration: "3 Days".to_string(),
                celebration_label: "Celebration".to_string(),
                participants_count: "5000+".to_string(),
                participants_label: "Participants".to_string(),
            },
            about_title: "ABOUT VARNAVE'25".to_string(),
            about_description: "Varnave'25 is the premier cultural festival celebrating the rich \
                heritage of Tamil arts, cinema, music, and performing arts. Join us for three \
                days of extraordinary performances, competitions, and cultural immersion in the \
                heart of Coimbatore."
                .to_string(),
            about_features: vec![
                AboutFeature {
                    title: "3 DAYS".to_string(),
                    subtitle: "OF CELEBRATION".to_string(),
                    description: "Non-stop entertainment with 30+ events across multiple categories"
                        .to_string(),
                    gradient: "from-blue-500 to-purple-500".to_string(),
                },
                AboutFeature {
                    title: "₹1 LAKH+".to_string(),
                    subtitle: "PRIZE MONEY".to_string(),
                    description: "Exciting cash prizes and recognition for winners".to_string(),
                    gradient: "from-orange-500 to-yellow-500".to_string(),
                },
                AboutFeature {
                    title: "5000+".to_string(),
                    subtitle: "PARTICIPANTS".to_string(),
                    description: "Students from across Tamil Nadu and beyond".to_string(),
                    gradient: "from-pink-500 to-red-500".to_string(),
                },
            ],
            events_title: "EVENTS & COMPETITIONS".to_string(),
            register_title: "REGISTER NOW".to_string(),
            register_description: "Secure your spot at the grandest Tamil cultural celebration"
                .to_string(),
            register_form_title: "EVENT REGISTRATION".to_string(),
            register_form_description: "Register for events and competitions via Google Forms."
                .to_string(),
            register_button_text: "REGISTER VIA GOOGLE FORM".to_string(),
            register_disclaimer: "Click the button to proceed to the Google Form for registration."
                .to_string(),
            event_registration_form_url: "https://forms.gle/YourEventRegistrationFormLink"
                .to_string(),
            volunteer_title: "BE A VOLUNTEER".to_string(),
            volunteer_description: "Join our dedicated team and help make Varnave'25 a grand \
                success!"
                .to_string(),
            volunteer_form_title: "VOLUNTEER REGISTRATION".to_string(),
            volunteer_form_description: "Contribute to the festival and gain valuable experience."
                .to_string(),
            volunteer_button_text: "APPLY TO VOLUNTEER".to_string(),
            volunteer_disclaimer: "Applications close September 1, 2025".to_string(),
            volunteer_registration_form_url: "https://forms.gle/JEz272bQkz7HEjks6".to_string(),
            committee_title: "CORE COMMITTEE".to_string(),
            committee_description: "Meet the dedicated team behind Varnave'25".to_string(),
            footer_description: "The premier Tamil cultural festival celebrating arts, cinema, \
                music, and performing arts."
                .to_string(),
            footer_quick_links: vec![
                "About".to_string(),
                "Events".to_string(),
                "Register".to_string(),
                "Volunteer".to_string(),
                "Contact".to_string(),
            ],
            footer_event_info: FooterEventInfo {
                date: "September 12-13, 2025".to_string(),
                location: "Coimbatore, Tamil Nadu".to_string(),
                phone: "+91 98765 43210".to_string(),
            },
            social_media_links: SocialMediaLinks {
                instagram: "https://instagram.com".to_string(),
                facebook: "https://facebook.com".to_string(),
                twitter: "https://twitter.com".to_string(),
            },
            copyright_text: "© 2025 Varnave. All rights reserved.".to_string(),
        }
    }
}

/// Page-lifetime cache of the site-copy document.
///
/// `load` is the loading → ready transition; after it, [`ContentCache::content`]
/// is always a non-absent document.
#[derive(Debug)]
pub struct ContentCache {
    content: StaticContent,
    fetch_error: Option<String>,
}

impl ContentCache {
    /// Fetch the document once. Any failure installs the fallback document
    /// and records the error; this never fails.
    pub fn load(api: &FestivalApi) -> Self {
        match api.static_content() {
            Ok(content) => Self {
                content,
                fetch_error: None,
            },
            Err(e) => {
                warn!("static content fetch failed, serving fallback copy: {e}");
                Self {
                    content: StaticContent::fallback(),
                    fetch_error: Some(e.to_string()),
                }
            }
        }
    }

    /// The cached document. Always present once the cache is constructed.
    pub fn content(&self) -> &StaticContent {
        &self.content
    }

    /// The error recorded by the last failed fetch, if the cache is currently
    /// serving the fallback document.
    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }

    /// Re-run the fetch/fallback transition.
    pub fn refetch(&mut self, api: &FestivalApi) {
        *self = Self::load(api);
    }

    /// Write-through save: PUT the document and replace the cache only once
    /// the server confirms. On failure the previous document stays cached and
    /// the error propagates to the caller.
    pub fn save(&mut self, api: &FestivalApi, doc: &StaticContent) -> Result<&StaticContent, ApiError> {
        let updated = api.update_static_content(doc)?;
        self.content = updated;
        self.fetch_error = None;
        Ok(&self.content)
    }
}
