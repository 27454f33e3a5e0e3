//! crates/writing_assistant_core/src/prompt.rs
//!
//! Turns generation and correction requests into the final prompt text plus the
//! sampling parameters to send with it. Everything here is pure: no I/O, and the
//! same request always yields the same prompt.

use crate::domain::{
    CorrectionRequest, GenerationParameters, GenerationRequest, Prompt, TextCategory,
};

impl GenerationParameters {
    /// Used for generation before the category override is applied.
    pub const DEFAULT: GenerationParameters = GenerationParameters {
        max_output_length: 1000,
        temperature: 0.7,
        nucleus_probability: 0.9,
        candidate_pool_size: 0,
    };

    /// Fixed for every correction, whatever the tone or text.
    pub const CORRECTION: GenerationParameters = GenerationParameters {
        max_output_length: 1500,
        temperature: 0.5,
        nucleus_probability: 0.9,
        candidate_pool_size: 0,
    };

    /// The sampling parameters for generating a text of the given category.
    pub fn for_category(category: TextCategory) -> Self {
        let (max_output_length, temperature, nucleus_probability, candidate_pool_size) =
            match category {
                TextCategory::AcademicArticle => (1800, 0.6, 0.95, 50),
                TextCategory::ProfessionalEmail => (800, 0.5, 0.9, 0),
                TextCategory::SocialMediaPost => (400, 0.8, 0.9, 0),
                TextCategory::MarketingContent => (1000, 0.9, 0.9, 0),
                TextCategory::SimpleScript => (1200, 0.8, 0.95, 50),
                TextCategory::ProductDescription => (600, 0.7, 0.9, 0),
            };
        Self {
            max_output_length,
            temperature,
            nucleus_probability,
            candidate_pool_size,
        }
    }
}

/// The instruction appended to the base block for each category.
pub fn category_clause(category: TextCategory) -> &'static str {
    match category {
        TextCategory::AcademicArticle => {
            "Inclua introdução, desenvolvimento com argumentos e exemplos relevantes, e conclusão. Mantenha a formalidade e objetividade."
        }
        TextCategory::ProfessionalEmail => {
            "Formate a resposta como um e-mail profissional pronto para envio, com linhas para Assunto: e Corpo:."
        }
        TextCategory::SocialMediaPost => {
            "Seja conciso (máximo 280 caracteres se for Twitter, ajuste para outras redes), use linguagem engajadora e inclua hashtags relevantes ao tema."
        }
        TextCategory::MarketingContent => {
            "Foque nos benefícios, crie urgência ou desejo e inclua uma chamada para ação (call to action) clara relevante ao tema/produto/serviço."
        }
        TextCategory::SimpleScript => {
            "Formate como um roteiro básico, com indicação de cenas, diálogos e ações."
        }
        TextCategory::ProductDescription => {
            "Descreva as características e benefícios do produto de forma atraente para um público comprador."
        }
    }
}

/// Builds the prompt for writing a new text.
///
/// The topic is embedded as given; rejecting empty topics is the caller's job.
pub fn build_generation_prompt(request: &GenerationRequest) -> Prompt {
    let text = format!(
        "Crie um texto completo e bem estruturado do tipo \"{category}\" sobre o tema/assunto: \"{topic}\"\n\
         Use um tom \"{tone}\".\n\
         Não use gírias, palavrões ou termos complexos demais a menos que o tema ou o tom técnico exijam e sejam explicados.\n\
         Responda em formato Markdown.\n\
         {clause}",
        category = request.category.label(),
        topic = request.topic,
        tone = request.tone.label(),
        clause = category_clause(request.category),
    );

    Prompt {
        text,
        params: GenerationParameters::for_category(request.category),
    }
}

/// Builds the prompt for revising an existing text.
///
/// The source text is embedded verbatim, exactly once.
pub fn build_correction_prompt(request: &CorrectionRequest) -> Prompt {
    let text = format!(
        "Por favor, revise e aprimore o seguinte texto.\n\
         Use um tom {tone} na revisão e nas sugestões.\n\
         Corrija erros de ortografia, gramática, pontuação e dê sugestões para melhorar a clareza, a coesão e a fluidez. Mantenha o significado original do texto.\n\
         Não use gírias, palavrões ou termos complexos demais a menos que o texto original já os contenha e seja necessário revisá-los.\n\
         Forneça o texto revisado e, em uma seção separada marcada como \"Sugestões:\", liste as sugestões de melhoria em tópicos numerados.\n\
         Responda em formato Markdown.\n\
         \n\
         Texto a revisar:\n\
         {source}\n\
         \n\
         Texto revisado:\n",
        tone = request.tone.label(),
        source = request.source_text,
    );

    Prompt {
        text,
        params: GenerationParameters::CORRECTION,
    }
}
