//! crates/writing_assistant_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These types are independent of any database, transport or serialization format.

use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Number of characters of a correction's source text kept in its history record.
pub const INPUT_PREVIEW_CHARS: usize = 200;

//=========================================================================================
// Selections
//=========================================================================================

/// The kind of document the user wants generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextCategory {
    AcademicArticle,
    ProfessionalEmail,
    SocialMediaPost,
    MarketingContent,
    SimpleScript,
    ProductDescription,
}

impl TextCategory {
    /// Every category, in menu order.
    pub const ALL: [TextCategory; 6] = [
        TextCategory::AcademicArticle,
        TextCategory::ProfessionalEmail,
        TextCategory::SocialMediaPost,
        TextCategory::MarketingContent,
        TextCategory::SimpleScript,
        TextCategory::ProductDescription,
    ];

    /// Stable machine key, used in HTTP payloads and the history table.
    pub fn key(self) -> &'static str {
        match self {
            TextCategory::AcademicArticle => "academic_article",
            TextCategory::ProfessionalEmail => "professional_email",
            TextCategory::SocialMediaPost => "social_media_post",
            TextCategory::MarketingContent => "marketing_content",
            TextCategory::SimpleScript => "simple_script",
            TextCategory::ProductDescription => "product_description",
        }
    }

    /// The display label. This exact text is embedded in generation prompts.
    pub fn label(self) -> &'static str {
        match self {
            TextCategory::AcademicArticle => "Artigo/Texto Acadêmico",
            TextCategory::ProfessionalEmail => "E-mail Profissional",
            TextCategory::SocialMediaPost => "Post para Redes Sociais (Ideias e Sugestões)",
            TextCategory::MarketingContent => {
                "Conteúdo de Marketing Digital (Ideias, sugestões, descrição de Produto)"
            }
            TextCategory::SimpleScript => "Roteiro Simples (Viagens entre outros)",
            TextCategory::ProductDescription => "Descrição de Produto",
        }
    }
}

impl fmt::Display for TextCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts the machine key, the 1-based menu number or the exact label.
impl FromStr for TextCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        parse_choice(&TextCategory::ALL, needle, |c| c.key(), |c| c.label())
            .ok_or_else(|| ValidationError::UnknownCategory(needle.to_string()))
    }
}

/// The stylistic register requested for generated or revised text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tone {
    #[default]
    Formal,
    Friendly,
    Persuasive,
    Technical,
    Creative,
    Neutral,
}

impl Tone {
    /// Every tone, in menu order.
    pub const ALL: [Tone; 6] = [
        Tone::Formal,
        Tone::Friendly,
        Tone::Persuasive,
        Tone::Technical,
        Tone::Creative,
        Tone::Neutral,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Tone::Formal => "formal",
            Tone::Friendly => "friendly",
            Tone::Persuasive => "persuasive",
            Tone::Technical => "technical",
            Tone::Creative => "creative",
            Tone::Neutral => "neutral",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tone::Formal => "Formal",
            Tone::Friendly => "Amigável",
            Tone::Persuasive => "Persuasivo",
            Tone::Technical => "Técnico",
            Tone::Creative => "Criativo",
            Tone::Neutral => "Neutro",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tone {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        parse_choice(&Tone::ALL, needle, |t| t.key(), |t| t.label())
            .ok_or_else(|| ValidationError::UnknownTone(needle.to_string()))
    }
}

/// Resolves a user choice against a fixed option list by key, menu number or label.
/// Matching is always on whole values, never on substrings.
fn parse_choice<T: Copy>(
    options: &[T],
    needle: &str,
    key: impl Fn(T) -> &'static str,
    label: impl Fn(T) -> &'static str,
) -> Option<T> {
    if let Ok(number) = needle.parse::<usize>() {
        return number.checked_sub(1).and_then(|i| options.get(i).copied());
    }
    options
        .iter()
        .copied()
        .find(|&o| key(o).eq_ignore_ascii_case(needle) || label(o) == needle)
}

/// Which of the two operations produced a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Generate,
    Correct,
}

impl OperationKind {
    /// Persisted key, compatible with the existing history database.
    pub fn key(self) -> &'static str {
        match self {
            OperationKind::Generate => "gerar",
            OperationKind::Correct => "corrigir",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OperationKind::Generate => "Geração",
            OperationKind::Correct => "Correção",
        }
    }
}

impl FromStr for OperationKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "gerar" => Ok(OperationKind::Generate),
            "corrigir" => Ok(OperationKind::Correct),
            other => Err(ValidationError::UnknownOperation(other.to_string())),
        }
    }
}

//=========================================================================================
// Requests and Generation Parameters
//=========================================================================================

/// A request to write a new text. Created per user action and consumed once.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub category: TextCategory,
    pub tone: Tone,
    pub topic: String,
}

/// A request to revise an existing text.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionRequest {
    pub tone: Tone,
    pub source_text: String,
}

/// Sampling controls sent along with a prompt.
///
/// Always derived from the operation and category; never edited by users.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParameters {
    /// Token budget for the response.
    pub max_output_length: u32,
    /// In `[0, 1]`.
    pub temperature: f32,
    /// "top_p", in `(0, 1]`.
    pub nucleus_probability: f32,
    /// "top_k". Zero leaves the candidate pool unrestricted.
    pub candidate_pool_size: u32,
}

/// A fully assembled prompt together with the parameters it must be sent with.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub text: String,
    pub params: GenerationParameters,
}

//=========================================================================================
// History
//=========================================================================================

/// A persisted log entry of one completed generate/correct operation.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionRecord {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub operation: OperationKind,
    pub model: String,
    pub input_text: String,
    pub output_text: String,
    /// Only set for generations.
    pub category: Option<TextCategory>,
    pub tone: Tone,
}

/// An interaction that has not been stored yet; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInteraction {
    pub created_at: DateTime<Utc>,
    pub operation: OperationKind,
    pub model: String,
    pub input_text: String,
    pub output_text: String,
    pub category: Option<TextCategory>,
    pub tone: Tone,
}

/// Shortens long correction inputs before they are written to history.
pub fn input_preview(text: &str) -> String {
    if text.chars().count() > INPUT_PREVIEW_CHARS {
        let head: String = text.chars().take(INPUT_PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

//=========================================================================================
// Completion
//=========================================================================================

/// The outcome of a successful generate or correct step.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub operation: OperationKind,
    pub model: String,
    /// The topic, or the full source text for corrections.
    pub input: String,
    /// Raw model output, unmodified.
    pub output: String,
    pub category: Option<TextCategory>,
    pub tone: Tone,
    /// Whether the interaction made it into the history store.
    pub persisted: bool,
    /// Set when the history store rejected the interaction.
    pub store_warning: Option<String>,
}

impl Completion {
    /// The download name the front-ends offer for this text.
    pub fn suggested_file_name(&self, format: ExportFormat) -> String {
        let stem = match (self.operation, self.category) {
            (OperationKind::Generate, Some(category)) => {
                format!("gerai_{}_gerado", file_name_fragment(category.label()))
            }
            _ => format!("gerai_revisado_{}", file_name_fragment(self.tone.label())),
        };
        format!("{}.{}", stem, format.extension())
    }
}

fn file_name_fragment(label: &str) -> String {
    label
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            '/' => Some('-'),
            c if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') => Some(c),
            _ => None,
        })
        .collect()
}

//=========================================================================================
// Export
//=========================================================================================

/// The download formats offered for generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    PlainText,
    Docx,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::PlainText, ExportFormat::Docx];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::PlainText => "txt",
            ExportFormat::Docx => "docx",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::PlainText => "text/plain; charset=utf-8",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_start_matches('.').to_ascii_lowercase();
        ExportFormat::ALL
            .into_iter()
            .find(|f| f.extension() == normalized)
            .ok_or_else(|| ValidationError::UnknownFormat(s.trim().to_string()))
    }
}

/// Builds `<base>.<ext>` from a user-supplied base name.
pub fn export_file_name(base: &str, format: ExportFormat) -> Result<String, ValidationError> {
    let base = base.trim();
    if base.is_empty() {
        return Err(ValidationError::EmptyFileName);
    }
    let suffix = format!(".{}", format.extension());
    if base.to_ascii_lowercase().ends_with(&suffix) {
        Ok(base.to_string())
    } else {
        Ok(format!("{}{}", base, suffix))
    }
}

//=========================================================================================
// Caller-owned Session State
//=========================================================================================

/// One line of in-memory history kept by a front-end for the current session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: OperationKind,
    pub summary: String,
}

/// Per-session state owned by the front-end and threaded through its handlers.
///
/// The prompt builder, gateway and workflow never read or write it.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    entries: Vec<SessionEntry>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a completed operation to the session history.
    pub fn record(&mut self, completion: &Completion) {
        let summary = match completion.category {
            Some(category) => format!("{}, {}", category.label(), completion.tone.label()),
            None => format!("{}, {}", completion.operation.label(), completion.tone.label()),
        };
        self.entries.push(SessionEntry {
            timestamp: Utc::now(),
            operation: completion.operation,
            summary,
        });
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &SessionEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completion(operation: OperationKind, category: Option<TextCategory>, tone: Tone) -> Completion {
        Completion {
            operation,
            model: "gemini-1.5-flash".to_string(),
            input: "tema".to_string(),
            output: "texto".to_string(),
            category,
            tone,
            persisted: true,
            store_warning: None,
        }
    }

    #[test]
    fn category_parses_key_number_and_label() {
        assert_eq!("professional_email".parse::<TextCategory>(), Ok(TextCategory::ProfessionalEmail));
        assert_eq!("2".parse::<TextCategory>(), Ok(TextCategory::ProfessionalEmail));
        assert_eq!("E-mail Profissional".parse::<TextCategory>(), Ok(TextCategory::ProfessionalEmail));
        assert_eq!(" 6 ".parse::<TextCategory>(), Ok(TextCategory::ProductDescription));
    }

    #[test]
    fn category_rejects_partial_labels_and_out_of_range_numbers() {
        assert!("Marketing Digital".parse::<TextCategory>().is_err());
        assert!("0".parse::<TextCategory>().is_err());
        assert!("7".parse::<TextCategory>().is_err());
        assert_eq!(
            "poem".parse::<TextCategory>(),
            Err(ValidationError::UnknownCategory("poem".to_string()))
        );
    }

    #[test]
    fn tone_parses_and_defaults_to_formal() {
        assert_eq!("Técnico".parse::<Tone>(), Ok(Tone::Technical));
        assert_eq!("friendly".parse::<Tone>(), Ok(Tone::Friendly));
        assert_eq!("5".parse::<Tone>(), Ok(Tone::Creative));
        assert!("sarcastic".parse::<Tone>().is_err());
        assert_eq!(Tone::default(), Tone::Formal);
    }

    #[test]
    fn keys_round_trip_through_from_str() {
        for category in TextCategory::ALL {
            assert_eq!(category.key().parse::<TextCategory>(), Ok(category));
        }
        for tone in Tone::ALL {
            assert_eq!(tone.key().parse::<Tone>(), Ok(tone));
        }
        for op in [OperationKind::Generate, OperationKind::Correct] {
            assert_eq!(op.key().parse::<OperationKind>(), Ok(op));
        }
    }

    #[test]
    fn input_preview_truncates_on_character_boundaries() {
        let short = "Ele foi na loja";
        assert_eq!(input_preview(short), short);

        let long: String = "ç".repeat(250);
        let preview = input_preview(&long);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), INPUT_PREVIEW_CHARS + 3);
    }

    #[test]
    fn suggested_file_names_follow_operation() {
        let generated = completion(
            OperationKind::Generate,
            Some(TextCategory::AcademicArticle),
            Tone::Formal,
        );
        assert_eq!(
            generated.suggested_file_name(ExportFormat::PlainText),
            "gerai_Artigo-Texto_Acadêmico_gerado.txt"
        );

        let social = completion(
            OperationKind::Generate,
            Some(TextCategory::SocialMediaPost),
            Tone::Friendly,
        );
        assert_eq!(
            social.suggested_file_name(ExportFormat::Docx),
            "gerai_Post_para_Redes_Sociais_Ideias_e_Sugestões_gerado.docx"
        );

        let revised = completion(OperationKind::Correct, None, Tone::Technical);
        assert_eq!(
            revised.suggested_file_name(ExportFormat::Docx),
            "gerai_revisado_Técnico.docx"
        );
    }

    #[test]
    fn export_format_parses_with_or_without_dot() {
        assert_eq!("txt".parse::<ExportFormat>(), Ok(ExportFormat::PlainText));
        assert_eq!(".DOCX".parse::<ExportFormat>(), Ok(ExportFormat::Docx));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn export_file_name_requires_a_base_name() {
        assert_eq!(export_file_name("  ", ExportFormat::PlainText), Err(ValidationError::EmptyFileName));
        assert_eq!(export_file_name("carta", ExportFormat::Docx), Ok("carta.docx".to_string()));
        assert_eq!(export_file_name("carta.txt", ExportFormat::PlainText), Ok("carta.txt".to_string()));
    }

    #[test]
    fn session_state_lists_newest_first_and_clears() {
        let mut session = SessionState::new();
        assert!(session.is_empty());

        session.record(&completion(
            OperationKind::Generate,
            Some(TextCategory::ProfessionalEmail),
            Tone::Formal,
        ));
        session.record(&completion(OperationKind::Correct, None, Tone::Neutral));

        let entries: Vec<_> = session.newest_first().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, OperationKind::Correct);
        assert_eq!(entries[0].summary, "Correção, Neutro");
        assert_eq!(entries[1].summary, "E-mail Profissional, Formal");

        session.clear();
        assert_eq!(session.len(), 0);
    }
}
