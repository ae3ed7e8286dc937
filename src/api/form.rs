//! Generator form state.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core::catalog::find_hook;

/// User-entered generation parameters for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormData {
    pub topic: String,
    pub country: String,
    pub language: String,
    pub word_count: String,
    pub target_audience: String,
    pub links: String,
    pub internal_links: String,
    pub faqs: String,
    pub seo_keywords: String,
    pub image_details: String,
    pub tone: String,
    pub hook_type: String,
    pub hook_brief: String,
}

impl Default for FormData {
    fn default() -> Self {
        Self {
            topic: String::new(),
            country: "United States".to_string(),
            language: "English (US)".to_string(),
            word_count: "medium".to_string(),
            target_audience: String::new(),
            links: String::new(),
            internal_links: String::new(),
            faqs: String::new(),
            seo_keywords: String::new(),
            image_details: String::new(),
            tone: "Professional".to_string(),
            hook_type: "Question".to_string(),
            hook_brief: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Topic,
    Country,
    Language,
    WordCount,
    TargetAudience,
    Links,
    InternalLinks,
    Faqs,
    SeoKeywords,
    ImageDetails,
    Tone,
    HookType,
    HookBrief,
}

impl FormField {
    pub const ALL: [FormField; 13] = [
        FormField::Topic,
        FormField::Country,
        FormField::Language,
        FormField::WordCount,
        FormField::TargetAudience,
        FormField::Links,
        FormField::InternalLinks,
        FormField::Faqs,
        FormField::SeoKeywords,
        FormField::ImageDetails,
        FormField::Tone,
        FormField::HookType,
        FormField::HookBrief,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormField::Topic => "topic",
            FormField::Country => "country",
            FormField::Language => "language",
            FormField::WordCount => "word_count",
            FormField::TargetAudience => "target_audience",
            FormField::Links => "links",
            FormField::InternalLinks => "internal_links",
            FormField::Faqs => "faqs",
            FormField::SeoKeywords => "seo_keywords",
            FormField::ImageDetails => "image_details",
            FormField::Tone => "tone",
            FormField::HookType => "hook_type",
            FormField::HookBrief => "hook_brief",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = String;

    /// Accepts `snake_case`, `kebab-case` and `camelCase` names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        FormField::ALL
            .into_iter()
            .find(|f| f.name().replace('_', "") == wanted)
            .ok_or_else(|| format!("Unknown form field '{}'", s))
    }
}

impl FormData {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Topic => &self.topic,
            FormField::Country => &self.country,
            FormField::Language => &self.language,
            FormField::WordCount => &self.word_count,
            FormField::TargetAudience => &self.target_audience,
            FormField::Links => &self.links,
            FormField::InternalLinks => &self.internal_links,
            FormField::Faqs => &self.faqs,
            FormField::SeoKeywords => &self.seo_keywords,
            FormField::ImageDetails => &self.image_details,
            FormField::Tone => &self.tone,
            FormField::HookType => &self.hook_type,
            FormField::HookBrief => &self.hook_brief,
        }
    }

    fn slot_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Topic => &mut self.topic,
            FormField::Country => &mut self.country,
            FormField::Language => &mut self.language,
            FormField::WordCount => &mut self.word_count,
            FormField::TargetAudience => &mut self.target_audience,
            FormField::Links => &mut self.links,
            FormField::InternalLinks => &mut self.internal_links,
            FormField::Faqs => &mut self.faqs,
            FormField::SeoKeywords => &mut self.seo_keywords,
            FormField::ImageDetails => &mut self.image_details,
            FormField::Tone => &mut self.tone,
            FormField::HookType => &mut self.hook_type,
            FormField::HookBrief => &mut self.hook_brief,
        }
    }
}

/// Destination of an asynchronous result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Field(FormField),
    /// Generated content prompts, kept alongside the form.
    Prompts,
}

impl From<FormField> for Slot {
    fn from(field: FormField) -> Self {
        Slot::Field(field)
    }
}

/// Stamp taken when a request starts. Only the newest stamp for a slot may
/// write its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    slot: Slot,
    generation: u64,
}

/// Owns the form record and arbitrates late results.
#[derive(Debug, Default)]
pub struct FormController {
    data: FormData,
    prompts: Vec<String>,
    generations: HashMap<Slot, u64>,
}

pub type SharedForm = Arc<Mutex<FormController>>;

/// Locks a shared form, recovering from poisoning.
pub fn lock(form: &SharedForm) -> MutexGuard<'_, FormController> {
    form.lock().unwrap_or_else(PoisonError::into_inner)
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> SharedForm {
        Arc::new(Mutex::new(self))
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Replaces one field. Setting `hook_type` also resets `hook_brief` to
    /// that hook's placeholder. Pending results for the field become stale.
    pub fn update(&mut self, field: FormField, value: impl Into<String>) {
        if field == FormField::HookType {
            self.select_hook_type(value);
            return;
        }
        self.bump(Slot::Field(field));
        *self.data.slot_mut(field) = value.into();
    }

    /// Selects a hook type and cascades its placeholder into `hook_brief`.
    /// Unknown kinds leave the brief empty.
    pub fn select_hook_type(&mut self, kind: impl Into<String>) {
        let kind = kind.into();
        self.bump(Slot::Field(FormField::HookType));
        self.bump(Slot::Field(FormField::HookBrief));
        self.data.hook_brief = find_hook(&kind)
            .map(|h| h.placeholder.to_string())
            .unwrap_or_default();
        self.data.hook_type = kind;
    }

    fn bump(&mut self, slot: Slot) -> u64 {
        let generation = self.generations.entry(slot).or_insert(0);
        *generation += 1;
        *generation
    }

    /// Starts a request whose result will land in `slot`.
    pub fn begin(&mut self, slot: impl Into<Slot>) -> RequestToken {
        let slot = slot.into();
        let generation = self.bump(slot);
        RequestToken { slot, generation }
    }

    fn is_current(&self, token: RequestToken) -> bool {
        self.generations.get(&token.slot).copied() == Some(token.generation)
    }

    /// Writes a field result if `token` is still current. Returns whether
    /// the value was applied.
    pub fn apply(&mut self, token: RequestToken, value: impl Into<String>) -> bool {
        let Slot::Field(field) = token.slot else {
            return false;
        };
        if !self.is_current(token) {
            tracing::debug!(%field, "dropping stale result");
            return false;
        }
        *self.data.slot_mut(field) = value.into();
        true
    }

    /// Same as [`apply`](Self::apply) for the prompts slot.
    pub fn apply_prompts(&mut self, token: RequestToken, prompts: Vec<String>) -> bool {
        if token.slot != Slot::Prompts || !self.is_current(token) {
            tracing::debug!("dropping stale prompts");
            return false;
        }
        self.prompts = prompts;
        true
    }

    /// Hands a snapshot of the form to `handler`.
    pub fn submit<F, R>(&self, handler: F) -> R
    where
        F: FnOnce(FormData) -> R,
    {
        handler(self.data.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::HOOK_TYPES;

    #[test]
    fn defaults() {
        let form = FormController::new();
        assert_eq!(form.data().tone, "Professional");
        assert_eq!(form.data().hook_type, "Question");
        assert_eq!(form.data().word_count, "medium");
        assert!(form.data().topic.is_empty());
        assert!(form.data().hook_brief.is_empty());
    }

    #[test]
    fn update_replaces_single_field() {
        let mut form = FormController::new();
        form.update(FormField::Topic, "cold brew");
        form.update(FormField::Tone, "Casual");
        assert_eq!(form.data().topic, "cold brew");
        assert_eq!(form.data().tone, "Casual");
        assert_eq!(form.data().country, "United States");
    }

    #[test]
    fn hook_type_cascades_into_brief() {
        let mut form = FormController::new();
        form.update(FormField::HookType, "Statistical");
        assert_eq!(form.data().hook_type, "Statistical");
        assert_eq!(form.data().hook_brief, HOOK_TYPES[1].placeholder);

        form.update(FormField::HookBrief, "Open with the 1933 moka pot patent.");
        assert_eq!(form.data().hook_type, "Statistical");

        form.select_hook_type("Rhetorical");
        assert!(form.data().hook_brief.is_empty());
    }

    #[test]
    fn field_names_parse_in_several_cases() {
        assert_eq!("seo_keywords".parse::<FormField>().unwrap(), FormField::SeoKeywords);
        assert_eq!("targetAudience".parse::<FormField>().unwrap(), FormField::TargetAudience);
        assert_eq!("hook-brief".parse::<FormField>().unwrap(), FormField::HookBrief);
        assert!("mainKeyword".parse::<FormField>().is_err());
    }

    #[test]
    fn stale_tokens_are_discarded() {
        let mut form = FormController::new();
        let first = form.begin(FormField::SeoKeywords);
        let second = form.begin(FormField::SeoKeywords);

        assert!(form.apply(second, "fresh"));
        assert!(!form.apply(first, "stale"));
        assert_eq!(form.data().seo_keywords, "fresh");
    }

    #[test]
    fn manual_edit_invalidates_pending_result() {
        let mut form = FormController::new();
        let token = form.begin(FormField::SeoKeywords);
        form.update(FormField::SeoKeywords, "typed by hand");
        assert!(!form.apply(token, "generated"));
        assert_eq!(form.data().seo_keywords, "typed by hand");
    }

    #[test]
    fn prompts_have_their_own_slot() {
        let mut form = FormController::new();
        let keywords = form.begin(FormField::SeoKeywords);
        let prompts = form.begin(Slot::Prompts);

        assert!(!form.apply_prompts(keywords, vec!["x".into()]));
        assert!(form.apply_prompts(prompts, vec!["Guide: write it".into()]));
        assert!(form.apply(keywords, "a\nb"));
        assert_eq!(form.prompts(), ["Guide: write it".to_string()]);
    }

    #[test]
    fn submit_receives_snapshot() {
        let mut form = FormController::new();
        form.update(FormField::Topic, "latte art");
        let topic = form.submit(|data| data.topic);
        assert_eq!(topic, "latte art");
    }
}
