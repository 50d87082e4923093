//! Response text extraction.

use crate::envelope::{
    CompletionEnvelope, OutputText, OutputTextBlock, ResponsesEnvelope, TextValue,
};
use oneira_error::ExtractionError;

/// Pulls the raw text payload out of whatever envelope the completion
/// service returned.
///
/// Tries, in order: the chat shape's `choices[0].message.content`, the
/// simplified `output_text` field (string, or first element of a list),
/// then the verbose `output[0].content[0]` path. The ordering mirrors the
/// service's API evolution; both responses variants must stay supported
/// simultaneously.
///
/// # Errors
///
/// Returns [`ExtractionError`] when no recognizable text field is found
/// under any known shape.
pub fn extract_text(envelope: &CompletionEnvelope) -> Result<String, ExtractionError> {
    match envelope {
        CompletionEnvelope::Chat(response) => response
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .ok_or_else(|| ExtractionError::new("chat response has no choices")),
        CompletionEnvelope::Responses(envelope) => extract_responses(envelope),
    }
}

fn extract_responses(envelope: &ResponsesEnvelope) -> Result<String, ExtractionError> {
    if let Some(output_text) = &envelope.output_text {
        match output_text {
            OutputText::Text(text) => return Ok(text.clone()),
            OutputText::Blocks(blocks) => match blocks.first() {
                Some(OutputTextBlock::Text(text)) => return Ok(text.clone()),
                Some(OutputTextBlock::Tagged { text }) => return Ok(text.clone()),
                // An empty output_text list falls through to the verbose path.
                None => {}
            },
        }
    }

    let block = envelope
        .output
        .as_deref()
        .and_then(|items| items.first())
        .and_then(|item| item.content.first())
        .ok_or_else(|| ExtractionError::new("response has no recognizable output"))?;

    match &block.text {
        Some(TextValue::Plain(text)) => Ok(text.clone()),
        Some(TextValue::Valued { value }) => Ok(value.clone()),
        None => Err(ExtractionError::new(
            "output content block carries no text field",
        )),
    }
}
