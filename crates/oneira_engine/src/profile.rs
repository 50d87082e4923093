//! Task profiles: the static table driving the generation pipeline.
//!
//! Each profile bundles a prompt template, an output schema, quality
//! thresholds and a malformed-output policy for one task. The orchestrator
//! consumes any profile; there is exactly one generation pipeline,
//! parameterized here.

use crate::quality::QualitySpec;
use oneira_core::{DreamSummary, GenerationRequest, TaskContent, TaskKind};
use oneira_error::RequestError;

/// Most recent dreams considered by history-wide tasks.
pub const MAX_HISTORY_DREAMS: usize = 10;

/// Character cap for each dream interpretation in a history summary.
pub const MAX_SUMMARY_CHARS: usize = 300;

/// Character cap applied to the daily message after normalization.
pub const DAILY_MESSAGE_MAX_CHARS: usize = 420;

/// Element type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A string field
    Text,
    /// An array of strings
    TextList,
    /// An array of objects with the given keys
    PairList(&'static [&'static str]),
}

/// One field of a task's output schema, with its normalization and quality
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Canonical field name
    pub name: &'static str,
    /// Element type
    pub kind: FieldKind,
    /// Legacy/alias names, cross-filled bidirectionally for text fields
    pub aliases: &'static [&'static str],
    /// Placeholder used when nothing fills a required text field
    pub placeholder: Option<&'static str>,
    /// Derive a text field from the first element of this list field
    pub derive_first_from: Option<&'static str>,
    /// Minimum item count enforced by the quality gate (list kinds)
    pub min_items: usize,
}

impl FieldSpec {
    /// A plain text field.
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            aliases: &[],
            placeholder: None,
            derive_first_from: None,
            min_items: 0,
        }
    }

    /// An array-of-strings field with a quality-gate minimum.
    pub const fn list(name: &'static str, min_items: usize) -> Self {
        Self {
            name,
            kind: FieldKind::TextList,
            aliases: &[],
            placeholder: None,
            derive_first_from: None,
            min_items,
        }
    }

    /// An array-of-objects field with a quality-gate minimum.
    pub const fn pairs(
        name: &'static str,
        keys: &'static [&'static str],
        min_items: usize,
    ) -> Self {
        Self {
            name,
            kind: FieldKind::PairList(keys),
            aliases: &[],
            placeholder: None,
            derive_first_from: None,
            min_items,
        }
    }

    /// Adds legacy alias names.
    pub const fn aliased(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    /// Adds a placeholder for when the field cannot be filled.
    pub const fn or(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Derives the field from the first element of the named list field.
    pub const fn first_of(mut self, list: &'static str) -> Self {
        self.derive_first_from = Some(list);
        self
    }
}

/// How a task's model output is turned into a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// A JSON object conforming to the profile's field table
    Json,
    /// Plain prose stored under a single field
    FreeText {
        /// Field name the text lands under
        field: &'static str,
        /// Optional character cap applied during normalization
        max_chars: Option<usize>,
    },
}

/// What to do when the first response is malformed (unextractable or
/// unparseable) rather than merely low quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedFallback {
    /// Normalize an empty object; defaults fill in, the gate fails, and the
    /// repair round runs
    EmptyObject,
    /// Return this fixed question list immediately
    Questions(&'static [&'static str]),
    /// Return this fixed text immediately, under the free-text field
    Text(&'static str),
}

/// A declarative bundle of prompt template, output schema and quality
/// thresholds for one kind of generation job.
#[derive(Debug)]
pub struct TaskProfile {
    kind: TaskKind,
    system_template: &'static str,
    output: OutputFormat,
    fields: &'static [FieldSpec],
    quality: QualitySpec,
    temperature: Option<f32>,
    fallback: MalformedFallback,
}

impl TaskProfile {
    /// Looks up the profile for a task kind.
    pub fn for_kind(kind: TaskKind) -> &'static TaskProfile {
        match kind {
            TaskKind::Interpretation => &INTERPRETATION,
            TaskKind::Questions => &QUESTIONS,
            TaskKind::DeepAnalysis => &DEEP_ANALYSIS,
            TaskKind::PhaseAnalysis => &PHASE_ANALYSIS,
            TaskKind::SymbolLookup => &SYMBOL_LOOKUP,
            TaskKind::DailyMessage => &DAILY_MESSAGE,
            TaskKind::LifeContext => &LIFE_CONTEXT,
        }
    }

    /// The task kind this profile serves.
    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    /// How the model output is realized into a result.
    pub fn output(&self) -> OutputFormat {
        self.output
    }

    /// The output schema (empty for free-text tasks).
    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Quality thresholds for this task.
    pub fn quality(&self) -> &QualitySpec {
        &self.quality
    }

    /// Sampling temperature override, when the task wants one.
    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    /// Malformed-output policy.
    pub fn fallback(&self) -> MalformedFallback {
        self.fallback
    }

    /// Renders the system prompt for the requested language.
    pub fn system_prompt(&self, language: &str) -> String {
        self.system_template.replace("{language}", language)
    }

    /// Builds the user message from the request payload, validating it
    /// before any upstream call is made.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] when the payload is empty where the task
    /// needs content, or does not match the task kind.
    pub fn user_content(&self, request: &GenerationRequest) -> Result<String, RequestError> {
        let language = request.language();
        match (self.kind, request.content()) {
            (TaskKind::Interpretation | TaskKind::Questions, TaskContent::Dream(text)) => {
                let text = require_text(text, "dream text")?;
                Ok(format!("Dream: {}\n\nResponse language: {}", text, language))
            }
            (TaskKind::SymbolLookup, TaskContent::Symbol(name)) => {
                let name = require_text(name, "symbol name")?;
                Ok(format!("Symbol: {}\nResponse language: {}", name, language))
            }
            (TaskKind::PhaseAnalysis, TaskContent::History(history)) => {
                if history.is_empty() {
                    return Err(RequestError::new(
                        "phase analysis needs at least one dream in the history",
                    ));
                }
                Ok(format!(
                    "Dream history (summary):\n{}\n\nResponse language: {}",
                    history_summary(history),
                    language
                ))
            }
            (TaskKind::DailyMessage, TaskContent::History(history)) => Ok(format!(
                "Recent dreams:\n{}\nResponse language: {}",
                history_summary(history),
                language
            )),
            (
                TaskKind::DeepAnalysis,
                TaskContent::DeepDive {
                    dream,
                    initial_interpretation,
                    answers,
                },
            ) => {
                let dream = require_text(dream, "dream text")?;
                Ok(format!(
                    "INPUT DATA:\nDREAM: {}\nINITIAL INTERPRETATION: {}\nUSER ANSWERS: {}\nRequested language: {}",
                    dream,
                    serde_json::to_string(initial_interpretation).unwrap_or_default(),
                    serde_json::to_string_pretty(answers).unwrap_or_default(),
                    language
                ))
            }
            (TaskKind::LifeContext, TaskContent::LifeContext { text, history }) => {
                let text = require_text(text, "life context text")?;
                Ok(format!(
                    "Context:\n{}\n\nRecent dreams:\n{}\n\nResponse language: {}",
                    text,
                    history_summary(history),
                    language
                ))
            }
            (kind, _) => Err(RequestError::new(format!(
                "payload does not match task '{}'",
                kind
            ))),
        }
    }

    /// Builds the corrective user turn for the single repair call,
    /// restating the schema and the quality minimums.
    pub fn repair_instruction(&self, language: &str) -> String {
        match self.output {
            OutputFormat::Json => {
                let mut rules = vec![format!(
                    "Respond ONLY with a single JSON object, no markdown fences, no prose, in exactly this shape:\n{}",
                    render_schema(self.fields)
                )];

                if let Some(field) = self.quality.narrative_field {
                    rules.push(format!(
                        "\"{}\" must contain at least {} paragraphs separated by blank lines, at least {} characters, and no hedging phrases (\"may indicate\", \"in general\", \"talvez\").",
                        field, self.quality.min_paragraphs, self.quality.min_narrative_chars
                    ));
                }
                if let Some(field) = self.quality.advice_field {
                    rules.push(format!(
                        "\"{}\" must list at least {} concrete numbered actions on separate lines and include one reflective question ending with \"?\".",
                        field, self.quality.min_advice_items
                    ));
                }
                for field in self.fields {
                    if field.min_items > 0 {
                        rules.push(format!(
                            "\"{}\" must contain at least {} items.",
                            field.name, field.min_items
                        ));
                    }
                }
                rules.push(format!("Respond strictly in the language: {}", language));

                format!(
                    "Your previous answer did not satisfy the required structure. Rewrite it completely, following every rule:\n- {}",
                    rules.join("\n- ")
                )
            }
            OutputFormat::FreeText { .. } => format!(
                "Your previous answer was empty or too thin. Answer again with substantial plain text (no JSON, no markdown fences), strictly in the language: {}",
                language
            ),
        }
    }
}

fn require_text<'a>(text: &'a str, what: &str) -> Result<&'a str, RequestError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(RequestError::new(format!("{} must not be empty", what)));
    }
    Ok(trimmed)
}

/// Summarizes dream history for prompt inclusion, bounded to the
/// [`MAX_HISTORY_DREAMS`] most recent entries with each interpretation
/// truncated to [`MAX_SUMMARY_CHARS`] characters.
pub fn history_summary(history: &[DreamSummary]) -> String {
    if history.is_empty() {
        return "No recent dreams.".to_string();
    }

    history
        .iter()
        .take(MAX_HISTORY_DREAMS)
        .map(|dream| {
            let title = dream.title.as_deref().unwrap_or("Untitled");
            let meaning = truncate_chars(
                dream.interpretation.as_deref().unwrap_or(""),
                MAX_SUMMARY_CHARS,
            );
            format!("- {}: {}", title, meaning)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Truncates on a character boundary; dream text is routinely accented.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn render_schema(fields: &[FieldSpec]) -> String {
    let mut lines = Vec::with_capacity(fields.len() + 1);
    for field in fields {
        let value = match field.kind {
            FieldKind::Text => "\"...\"".to_string(),
            FieldKind::TextList => "[\"...\"]".to_string(),
            FieldKind::PairList(keys) => {
                let pairs = keys
                    .iter()
                    .map(|key| format!("\"{}\": \"...\"", key))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("[{{{}}}]", pairs)
            }
        };
        lines.push(format!("  \"{}\": {}", field.name, value));
    }
    lines.push("  \"language\": \"...\"".to_string());
    format!("{{\n{}\n}}", lines.join(",\n"))
}

const INTERPRETATION_PROMPT: &str = "\
You are a depth psychologist specializing in dream interpretation, symbolic \
psychology and unconscious conflict. Interpret the dream specifically and \
directly; never produce a reading that could apply to anyone. Do not \
describe the dream back. Do not hedge (\"may indicate\", \"in general\", \
\"talvez\"). Risk a clear psychological reading even when uncomfortable.

Respond ONLY with a JSON object, no markdown fences, in exactly this shape:
{
  \"dreamTitle\": \"short, striking title for the dream's central axis\",
  \"interpretationMain\": \"deep interpretation in at least 2 paragraphs separated by a blank line\",
  \"symbols\": [{\"name\": \"important symbol\", \"meaning\": \"specific emotional/psychological meaning\"}],
  \"emotions\": [\"main emotions perceived\"],
  \"lifeAreas\": [\"life areas affected\"],
  \"advice\": \"at least 3 numbered concrete actions on separate lines, ending with one reflective question\",
  \"tags\": [\"keywords\"],
  \"language\": \"{language}\"
}

Respond strictly in the language: {language}";

const QUESTIONS_PROMPT: &str = "\
You are an experienced Jungian therapist. Generate deep questions that help \
the dreamer reflect.
Rules:
1. Generate exactly 6 questions.
2. The FIRST question must ask whether the dream mirrors the dreamer's \
present moment.
3. The other 5 must be specific to the dream's symbols and emotions.
4. Respond ONLY with JSON in the shape: {\"questions\": [\"question 1\", \"question 2\"]}
5. Respond strictly in the language: {language}";

const DEEP_ANALYSIS_PROMPT: &str = "\
You are an analyst specializing in shadow work, analytical psychology and \
unconscious behavior patterns. Produce an analysis that goes BEYOND the \
initial interpretation by integrating the dream, that interpretation, and \
the dreamer's conscious answers. Do not repeat the initial interpretation, \
do not soften conflicts, do not explain theory. Surface repeating emotional \
patterns, unresolved conflicts, gaps between desire and action, and avoided \
decisions.

Respond ONLY with a JSON object, no markdown fences, in exactly this shape:
{
  \"deepInsights\": [{\"title\": \"clear name of the insight\", \"content\": \"deep, direct, confrontational text\"}],
  \"patterns\": [\"identified psychological pattern\"],
  \"finalIntegration\": \"practical synthesis connecting awareness and action\",
  \"language\": \"{language}\"
}

Respond strictly in the language: {language}";

const PHASE_ANALYSIS_PROMPT: &str = "\
You are a senior archetypal analyst and therapeutic mentor. Analyze the \
dream history and identify the dreamer's current life phase and journey \
arc. Connect real patterns (recurring emotions, symbols, themes) and \
explain why this phase is showing up now: central conflict, shadow risk, \
and potential strength. Never return empty fields, never be generic.

Respond ONLY with a JSON object, no markdown fences, in exactly this shape:
{
  \"phaseTitle\": \"striking title of the current phase\",
  \"phaseName\": \"short phase name\",
  \"archetype\": \"dominant archetype\",
  \"description\": \"2 to 4 paragraphs on what the unconscious is processing now, including the central conflict\",
  \"keyChallenges\": [\"3 to 6 short, specific inner challenges\"],
  \"strengths\": [\"3 to 6 short, specific strengths of the moment\"],
  \"guidance\": \"direct, practical mentor guidance: 3 numbered small actions for the next 24-72h plus 1 reflective question at the end\",
  \"tags\": [\"4 to 10 short tags\"],
  \"language\": \"{language}\"
}

Respond strictly in the language: {language}";

const SYMBOL_LOOKUP_PROMPT: &str = "\
You are a specialist in dream symbolism. Explain what the given symbol \
tends to mean in dreams: its emotional core, its common variations, and \
what to observe in the dream's context. Plain text only, no JSON, at most \
two short paragraphs.

Respond strictly in the language: {language}";

const DAILY_MESSAGE_PROMPT: &str = "\
You generate a short, deep, inspiring message of the day grounded in what \
the person has been dreaming recently. Plain text, at most 6 short lines, \
no JSON, no markdown.

Respond strictly in the language: {language}";

const LIFE_CONTEXT_PROMPT: &str = "\
You are specialized in analytical psychology. Analyze the person's life \
context together with their recent dreams and surface the patterns \
connecting them. Respond ONLY with plain, deep, welcoming text (no JSON), \
in at most 3 paragraphs.

Respond strictly in the language: {language}";

const FALLBACK_QUESTIONS: &[&str] = &[
    "Esse sonho se parece com algo que você está vivendo hoje?",
    "Qual o sentimento mais forte que ficou ao acordar?",
    "Há algum símbolo que chamou sua atenção?",
];

const FALLBACK_SYMBOL_TEXT: &str = "Este símbolo costuma apontar para um conteúdo \
emocional em elaboração. Observe o contexto em que ele apareceu no sonho e o \
sentimento que ficou ao acordar: eles dizem mais do que o símbolo isolado.";

static INTERPRETATION: TaskProfile = TaskProfile {
    kind: TaskKind::Interpretation,
    system_template: INTERPRETATION_PROMPT,
    output: OutputFormat::Json,
    fields: &[
        FieldSpec::text("dreamTitle").or("Sonho sem título"),
        FieldSpec::text("interpretationMain").or(
            "Não foi possível aprofundar a interpretação desta vez. Tente novamente em instantes.",
        ),
        FieldSpec::pairs("symbols", &["name", "meaning"], 2),
        FieldSpec::list("emotions", 2),
        FieldSpec::list("lifeAreas", 1),
        FieldSpec::text("advice")
            .or("Anote o sonho com suas palavras e volte a ele amanhã. O que mudou na releitura?"),
        FieldSpec::list("tags", 2),
    ],
    quality: QualitySpec {
        narrative_field: Some("interpretationMain"),
        min_paragraphs: 2,
        min_narrative_chars: 280,
        max_hedges: 2,
        advice_field: Some("advice"),
        min_advice_items: 3,
    },
    temperature: None,
    fallback: MalformedFallback::EmptyObject,
};

static QUESTIONS: TaskProfile = TaskProfile {
    kind: TaskKind::Questions,
    system_template: QUESTIONS_PROMPT,
    output: OutputFormat::Json,
    fields: &[FieldSpec::list("questions", 6)],
    quality: QualitySpec::none(),
    temperature: Some(0.7),
    fallback: MalformedFallback::Questions(FALLBACK_QUESTIONS),
};

static DEEP_ANALYSIS: TaskProfile = TaskProfile {
    kind: TaskKind::DeepAnalysis,
    system_template: DEEP_ANALYSIS_PROMPT,
    output: OutputFormat::Json,
    fields: &[
        FieldSpec::pairs("deepInsights", &["title", "content"], 2),
        FieldSpec::list("patterns", 1),
        FieldSpec::text("finalIntegration").or(
            "Observe qual padrão apareceu com mais força nas suas respostas e escolha uma ação pequena para testá-lo na prática.",
        ),
    ],
    quality: QualitySpec {
        narrative_field: Some("finalIntegration"),
        min_paragraphs: 1,
        min_narrative_chars: 120,
        max_hedges: 2,
        advice_field: None,
        min_advice_items: 0,
    },
    temperature: Some(0.7),
    fallback: MalformedFallback::EmptyObject,
};

static PHASE_ANALYSIS: TaskProfile = TaskProfile {
    kind: TaskKind::PhaseAnalysis,
    system_template: PHASE_ANALYSIS_PROMPT,
    output: OutputFormat::Json,
    fields: &[
        FieldSpec::text("phaseTitle").or("Fase Atual"),
        FieldSpec::text("phaseName").aliased(&["phaseTitle"]),
        FieldSpec::text("archetype").or("Arquétipo em Integração"),
        FieldSpec::text("description").aliased(&["summary"]).or(
            "Seu inconsciente está sinalizando um ciclo de transição: padrões emocionais e temas recorrentes pedem integração, clareza e ação consciente.",
        ),
        FieldSpec::list("keyChallenges", 3).aliased(&["mainChallenge"]),
        FieldSpec::list("strengths", 3),
        FieldSpec::text("guidance").aliased(&["advice"]).or(
            "Escolha um ponto de fricção que vem se repetindo e transforme isso em uma ação pequena e concreta nas próximas 48h. Depois, registre o que mudou internamente.",
        ),
        FieldSpec::list("tags", 4),
        FieldSpec::text("mainChallenge")
            .first_of("keyChallenges")
            .or("Desafio central em integração (veja description)."),
    ],
    quality: QualitySpec {
        narrative_field: Some("description"),
        min_paragraphs: 2,
        min_narrative_chars: 280,
        max_hedges: 2,
        advice_field: Some("guidance"),
        min_advice_items: 3,
    },
    temperature: Some(0.7),
    fallback: MalformedFallback::EmptyObject,
};

static SYMBOL_LOOKUP: TaskProfile = TaskProfile {
    kind: TaskKind::SymbolLookup,
    system_template: SYMBOL_LOOKUP_PROMPT,
    output: OutputFormat::FreeText {
        field: "analysis",
        max_chars: None,
    },
    fields: &[],
    quality: QualitySpec::prose("analysis", 40),
    temperature: None,
    fallback: MalformedFallback::Text(FALLBACK_SYMBOL_TEXT),
};

static DAILY_MESSAGE: TaskProfile = TaskProfile {
    kind: TaskKind::DailyMessage,
    system_template: DAILY_MESSAGE_PROMPT,
    output: OutputFormat::FreeText {
        field: "message",
        max_chars: Some(DAILY_MESSAGE_MAX_CHARS),
    },
    fields: &[],
    quality: QualitySpec::prose("message", 20),
    temperature: None,
    fallback: MalformedFallback::Text(
        "Hoje, escolha um pequeno gesto de cuidado com você mesmo e observe o que ele desperta.",
    ),
};

static LIFE_CONTEXT: TaskProfile = TaskProfile {
    kind: TaskKind::LifeContext,
    system_template: LIFE_CONTEXT_PROMPT,
    output: OutputFormat::FreeText {
        field: "message",
        max_chars: None,
    },
    fields: &[],
    quality: QualitySpec::prose("message", 80),
    temperature: None,
    fallback: MalformedFallback::Text(
        "Seu momento atual pede presença: observe os temas que se repetem nos seus dias e nos seus sonhos, e escolha um deles para olhar de perto esta semana.",
    ),
};
