//! services/api/src/cli/app.rs
//!
//! The menu loop of the terminal front-end. Every prompt and message is in
//! Portuguese; failures are reported and the loop goes back to the menu.

use crate::cli::{console::Console, MenuAction};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use writing_assistant_core::{
    export_file_name, AssistantError, Completion, ExportFormat, SessionState, TextCategory, Tone,
    WritingAssistant,
};

const RULE: &str = "--------------------";

pub struct TerminalApp {
    assistant: WritingAssistant,
    output_dir: PathBuf,
    history_limit: u32,
}

impl TerminalApp {
    pub fn new(assistant: WritingAssistant, output_dir: PathBuf, history_limit: u32) -> Self {
        Self {
            assistant,
            output_dir,
            history_limit,
        }
    }

    /// Runs the menu until the user leaves or the input ends, returning the session.
    pub async fn run<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> io::Result<SessionState> {
        let mut session = SessionState::new();
        console.say("Bem-vindo(a) ao GerAI, seu Assistente de Escrita com IA!")?;

        loop {
            console.say("")?;
            console.say("O que gostaria de fazer?")?;
            console.say("1. Gerar um novo texto")?;
            console.say("2. Corrigir/Aprimorar um texto existente")?;
            console.say("3. Ver histórico")?;
            console.say("4. Sair")?;

            let Some(choice) = console.ask("Digite o número da sua escolha: ")? else {
                break;
            };
            match MenuAction::parse(&choice) {
                Some(MenuAction::Generate) => self.generate(console, &mut session).await?,
                Some(MenuAction::Correct) => self.correct(console, &mut session).await?,
                Some(MenuAction::History) => self.show_history(console, &session).await?,
                Some(MenuAction::Exit) => break,
                None => console.say("Opção inválida. Por favor, tente novamente.")?,
            }
        }

        console.say("Obrigado por usar o GerAI. Até mais!")?;
        info!(operations = session.len(), "Terminal session finished");
        Ok(session)
    }

    async fn generate<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        session: &mut SessionState,
    ) -> io::Result<()> {
        console.say("")?;
        console.say("Escolha o tipo de texto a gerar:")?;
        for (i, category) in TextCategory::ALL.iter().enumerate() {
            console.say(format!("{}. {}", i + 1, category.label()))?;
        }
        let Some(answer) = console.ask("Digite o número do tipo: ")? else {
            return Ok(());
        };
        let Ok(category) = answer.parse::<TextCategory>() else {
            return console.say("Opção de tipo inválida. Voltando ao menu principal.");
        };

        let Some(tone) = self.pick_tone(console, "Escolha o tom para o texto:")? else {
            return console.say("Opção de tom inválida. Voltando ao menu principal.");
        };

        let Some(topic) = console.ask("Certo, qual tema/assunto deve ter o seu texto? ")? else {
            return Ok(());
        };
        if topic.is_empty() {
            return console.say("Por favor, digite um tema/assunto.");
        }

        console.say("")?;
        console.say("Gerando texto...")?;
        match self.assistant.generate(category, tone, &topic).await {
            Ok(completion) => {
                self.show_completion(console, "--- Texto Gerado ---", &completion)?;
                session.record(&completion);
                self.offer_save(console, &completion)
            }
            Err(e) => report_error(console, &e),
        }
    }

    async fn correct<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        session: &mut SessionState,
    ) -> io::Result<()> {
        console.say("")?;
        console.say("Por favor, cole o texto que você quer corrigir.")?;
        console.say("Para finalizar a entrada, pressione Enter duas vezes.")?;
        let source = console.read_block()?;
        if source.is_empty() {
            return console.say("Nenhum texto foi inserido para correção.");
        }

        let tone = match self.pick_tone(console, "Escolha o tom para a revisão/sugestões:")? {
            Some(tone) => tone,
            None => {
                console.say("Opção de tom inválida. Usando o tom Formal.")?;
                Tone::default()
            }
        };

        console.say("")?;
        console.say("Corrigindo e aprimorando texto...")?;
        match self.assistant.correct(tone, &source).await {
            Ok(completion) => {
                self.show_completion(console, "--- Texto Revisado e Sugestões ---", &completion)?;
                session.record(&completion);
                self.offer_save(console, &completion)
            }
            Err(e) => report_error(console, &e),
        }
    }

    /// Lists the tones and reads a choice. `None` for an invalid answer or closed input.
    fn pick_tone<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        heading: &str,
    ) -> io::Result<Option<Tone>> {
        console.say("")?;
        console.say(heading)?;
        for (i, tone) in Tone::ALL.iter().enumerate() {
            console.say(format!("{}. {}", i + 1, tone.label()))?;
        }
        let answer = console.ask("Digite o número do tom: ")?;
        Ok(answer.and_then(|a| a.parse::<Tone>().ok()))
    }

    fn show_completion<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        heading: &str,
        completion: &Completion,
    ) -> io::Result<()> {
        console.say("")?;
        console.say(heading)?;
        console.say(&completion.output)?;
        console.say(RULE)?;
        if let Some(warning) = &completion.store_warning {
            console.say(format!("Aviso: o histórico não foi salvo ({}).", warning))?;
        }
        Ok(())
    }

    async fn show_history<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        session: &SessionState,
    ) -> io::Result<()> {
        console.say("")?;
        if self.assistant.has_history() {
            match self.assistant.history(self.history_limit).await {
                Ok(records) if records.is_empty() => {
                    return console.say("Nenhuma interação registrada ainda.");
                }
                Ok(records) => {
                    console.say("--- Histórico ---")?;
                    for record in records {
                        let category = record.category.map_or("-", |c| c.label());
                        console.say(format!(
                            "[{}] {} | {} | {}",
                            record.created_at.format("%d/%m/%Y %H:%M"),
                            record.operation.label(),
                            category,
                            record.tone.label()
                        ))?;
                        console.say(format!("    {}", record.input_text))?;
                    }
                    return console.say(RULE);
                }
                Err(e) => {
                    report_error(console, &e)?;
                    console.say("Mostrando apenas o histórico desta sessão.")?;
                }
            }
        }

        if session.is_empty() {
            return console.say("Nenhuma interação nesta sessão ainda.");
        }
        console.say("--- Histórico desta sessão ---")?;
        for entry in session.newest_first() {
            console.say(format!(
                "[{}] {} | {}",
                entry.timestamp.format("%H:%M:%S"),
                entry.operation.label(),
                entry.summary
            ))?;
        }
        console.say(RULE)
    }

    /// Asks whether to save the result and writes the file into the output directory.
    fn offer_save<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        completion: &Completion,
    ) -> io::Result<()> {
        let answer = console.ask("Deseja salvar este texto em um arquivo? (s/n): ")?;
        if !answer.is_some_and(|a| a.eq_ignore_ascii_case("s")) {
            return console.say("Salvamento cancelado pelo usuário.");
        }

        let suggested = completion.suggested_file_name(ExportFormat::PlainText);
        let suggested_stem = suggested.trim_end_matches(".txt");
        let base = console
            .ask(&format!(
                "Digite o nome base para o arquivo (sem extensão) [{}]: ",
                suggested_stem
            ))?
            .unwrap_or_default();
        let base = if base.is_empty() { suggested_stem.to_string() } else { base };

        let Some(format) = console
            .ask("Escolha o formato (txt ou docx): ")?
            .and_then(|f| f.parse::<ExportFormat>().ok())
        else {
            return console.say("Formato inválido. Salvamento cancelado.");
        };

        let file_name = match export_file_name(&base, format) {
            Ok(name) => name,
            Err(_) => return console.say("Nome de arquivo inválido. Salvamento cancelado."),
        };
        let bytes = match self.assistant.export(&completion.output, format) {
            Ok(bytes) => bytes,
            Err(e) => return report_error(console, &e),
        };

        let path = self.output_dir.join(&file_name);
        match std::fs::write(&path, bytes) {
            Ok(()) => {
                info!(path = %path.display(), "Saved text");
                console.say(format!("Texto salvo com sucesso em {}", path.display()))
            }
            Err(e) => {
                warn!(path = %path.display(), "Could not save text: {}", e);
                console.say(format!("Erro ao salvar o arquivo: {}", e))?;
                console.say("Verifique se você tem permissão para escrever nesta pasta.")
            }
        }
    }
}

fn report_error<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    err: &AssistantError,
) -> io::Result<()> {
    console.say(format!("Erro: {}", err))?;
    if let AssistantError::Generation(generation) = err {
        console.say(generation.advice())?;
    }
    Ok(())
}
