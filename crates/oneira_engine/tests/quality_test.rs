//! Tests for the quality gate predicates.

use oneira_core::{NormalizedResult, TaskKind};
use oneira_engine::{
    enumerated_items, hedge_count, meets_quality, normalize, paragraph_count,
    profile::TaskProfile,
};
use serde_json::json;

fn interpretation() -> &'static TaskProfile {
    TaskProfile::for_kind(TaskKind::Interpretation)
}

/// A result that satisfies every interpretation-task check.
fn passing_interpretation() -> NormalizedResult {
    normalize(
        json!({
            "dreamTitle": "O Incêndio Observado",
            "interpretationMain": format!(
                "{}\n\n{}",
                "Você sobrevoa a destruição em vez de estar dentro dela: o sonho marca uma posição de observador diante de uma perda que já começou e que você ainda trata como paisagem.",
                "O fogo consome uma estrutura antiga da sua vida enquanto a altitude protege e ao mesmo tempo isola. A distância que evita a dor também adia a escolha que o sonho cobra."
            ),
            "symbols": [
                { "name": "fogo", "meaning": "transformação em curso" },
                { "name": "voo", "meaning": "distanciamento de um conflito" }
            ],
            "emotions": ["medo", "fascínio"],
            "lifeAreas": ["trabalho"],
            "advice": "1. Liste o que está sendo consumido nessa fase.\n2. Escolha uma estrutura para reconstruir primeiro.\n3. Marque uma conversa que você vem adiando.\nO que você observa queimar sem intervir?",
            "tags": ["fogo", "voo"],
            "language": "pt"
        }),
        interpretation(),
        "pt",
    )
}

#[test]
fn counts_paragraphs_on_blank_line_boundaries() {
    assert_eq!(paragraph_count(""), 0);
    assert_eq!(paragraph_count("um bloco só de texto"), 1);
    assert_eq!(paragraph_count("primeiro\n\nsegundo"), 2);
    assert_eq!(paragraph_count("primeiro\n \nsegundo\n\n\nterceiro"), 3);
    // Adjacent lines without a blank line stay in one paragraph.
    assert_eq!(paragraph_count("linha um\nlinha dois"), 1);
}

#[test]
fn counts_enumerated_items() {
    assert_eq!(enumerated_items("sem lista nenhuma"), 0);
    assert_eq!(enumerated_items("- primeiro\n- segundo\n- terceiro"), 3);
    assert_eq!(enumerated_items("• um\n• dois"), 2);
    assert_eq!(enumerated_items("1. um\n2) dois\n3. três"), 3);
    // A dash mid-sentence is not an item.
    assert_eq!(enumerated_items("um texto - com um traço no meio"), 0);
}

#[test]
fn counts_hedge_phrases_case_insensitively() {
    assert_eq!(hedge_count("uma leitura direta e específica"), 0);
    assert_eq!(hedge_count("Isso PODE INDICAR algo. Em geral, talvez."), 3);
    assert_eq!(hedge_count("This may indicate change. In general, perhaps."), 3);
}

#[test]
fn verdict_is_deterministic() {
    let result = passing_interpretation();

    let first = meets_quality(&result, interpretation());
    let second = meets_quality(&result, interpretation());

    assert_eq!(first, second);
    assert!(first);
}

#[test]
fn single_paragraph_narrative_fails() {
    let mut result = passing_interpretation();
    result.set(
        "interpretationMain",
        json!(
            "Um único bloco denso de texto que não respeita a separação em parágrafos pedida continua reprovado por mais longo e detalhado que seja, porque colapsa a estrutura da resposta em uma massa contínua sem pausas de leitura: o sonhador perde as camadas da interpretação, a passagem do conflito central para o risco e do risco para a força deixa de existir, e o texto vira um parágrafo só que exige releitura para ser digerido."
        ),
    );

    assert!(!meets_quality(&result, interpretation()));
}

#[test]
fn hedge_heavy_narrative_fails() {
    let mut result = passing_interpretation();
    result.set(
        "interpretationMain",
        json!(format!(
            "{}\n\n{}",
            "Em geral, sonhos assim podem ser lidos de muitas formas. Isso pode indicar uma fase de mudança, talvez ligada ao trabalho, talvez à família, sem que se possa afirmar muito.",
            "De certa forma, tudo depende do contexto; em geral cada pessoa sente de um jeito e isso pode significar coisas diferentes conforme o momento em que o sonho aparece na vida."
        )),
    );

    assert!(!meets_quality(&result, interpretation()));
}

#[test]
fn advice_without_items_fails() {
    let mut result = passing_interpretation();
    result.set(
        "advice",
        json!("Reflita com calma sobre o que o sonho desperta em você?"),
    );

    assert!(!meets_quality(&result, interpretation()));
}

#[test]
fn advice_without_question_fails() {
    let mut result = passing_interpretation();
    result.set(
        "advice",
        json!("1. Anote o sonho.\n2. Releia amanhã.\n3. Converse com alguém de confiança."),
    );

    assert!(!meets_quality(&result, interpretation()));
}

#[test]
fn short_list_fields_fail() {
    let mut result = passing_interpretation();
    result.set("emotions", json!(["medo"]));

    assert!(!meets_quality(&result, interpretation()));
}

#[test]
fn questions_gate_requires_six() {
    let profile = TaskProfile::for_kind(TaskKind::Questions);

    let five = normalize(json!({ "questions": ["a", "b", "c", "d", "e"] }), profile, "pt");
    let six = normalize(
        json!({ "questions": ["a", "b", "c", "d", "e", "f"] }),
        profile,
        "pt",
    );

    assert!(!meets_quality(&five, profile));
    assert!(meets_quality(&six, profile));
}
