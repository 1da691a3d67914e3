//! Prompt assembly from the instruction template and the loaded datasets.

use thiserror::Error;

use synapse_primitives::EquipmentData;

use crate::instructions::PROTOCOL_INSTRUCTIONS;

/// Result alias for prompt composition.
pub type ComposeResult<T> = Result<T, ComposeError>;

/// Errors raised while composing a prompt.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The experiment description was empty after trimming.
    #[error("experiment description must not be empty")]
    EmptyDescription,
}

/// Marker separating the reference datasets from the user's request.
const END_OF_DATA: &str = "--- END OF JSON DATA ---";

/// Sentence restating the task after the reference data.
const RESTATEMENT: &str = "Now, please analyze the following experiment description and \
                           generate the protocol according to the OUTPUT FORMAT specified above:";

/// Builds the single text payload sent to the generation endpoint.
///
/// The composer is a pure function of its inputs: the fixed instruction
/// template, the two loaded datasets, and the experiment description. It
/// keeps no state and enforces no size cap; an oversized payload is the
/// endpoint's call to reject.
#[derive(Clone, Debug)]
pub struct PromptComposer {
    instructions: String,
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptComposer {
    /// Creates a composer using the built-in protocol instructions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            instructions: PROTOCOL_INSTRUCTIONS.to_owned(),
        }
    }

    /// Replaces the instruction template.
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Returns the instruction template in use.
    #[must_use]
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Composes the full prompt for one experiment description.
    ///
    /// Output order: instruction template, serialized internal dataset,
    /// serialized external dataset, end-of-data marker, restated request.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::EmptyDescription`] if the description is
    /// empty after trimming surrounding whitespace.
    pub fn compose(&self, data: &EquipmentData, description: &str) -> ComposeResult<String> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ComposeError::EmptyDescription);
        }

        let internal = data.internal();
        let external = data.external();

        Ok(format!(
            "{instructions}\n\n\
             {internal_label}:\n{internal_json}\n\n\
             {external_label}:\n{external_json}\n\n\
             {END_OF_DATA}\n\n\
             {RESTATEMENT}\n\n\
             Experiment Description: \"{description}\"\n",
            instructions = self.instructions,
            internal_label = internal.label(),
            internal_json = internal.to_pretty_json(),
            external_label = external.label(),
            external_json = external.to_pretty_json(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use synapse_primitives::Dataset;

    fn loaded_data() -> EquipmentData {
        EquipmentData::new(
            Dataset::new(
                "Lab_equipments.json",
                json!([{"Equipment_Name": "Thermocycler", "Available": "Yes"}]),
            ),
            Dataset::new(
                "lab_out.json",
                json!([{"Equipment_Name": "Electron Microscope", "Distance_km": 12}]),
            ),
        )
    }

    #[test]
    fn compose_orders_template_data_and_description() {
        let composer = PromptComposer::new();
        let prompt = composer
            .compose(&loaded_data(), "PCR amplification of DNA")
            .unwrap();

        let template_at = prompt.find("Project Synapse").unwrap();
        let internal_at = prompt.find("Thermocycler").unwrap();
        let external_at = prompt.find("Electron Microscope").unwrap();
        let marker_at = prompt.find(END_OF_DATA).unwrap();
        let description_at = prompt.find("PCR amplification of DNA").unwrap();

        assert!(template_at < internal_at);
        assert!(internal_at < external_at);
        assert!(external_at < marker_at);
        assert!(marker_at < description_at);
    }

    #[test]
    fn compose_embeds_round_trippable_datasets() {
        let composer = PromptComposer::new();
        let prompt = composer.compose(&loaded_data(), "titration").unwrap();

        let start = prompt.find("lab_out.json:\n").unwrap() + "lab_out.json:\n".len();
        let end = prompt.find(END_OF_DATA).unwrap();
        let serialized = prompt[start..end].trim();
        let reparsed: serde_json::Value = serde_json::from_str(serialized).unwrap();
        assert_eq!(reparsed[0]["Distance_km"], json!(12));
    }

    #[test]
    fn compose_trims_description_whitespace() {
        let composer = PromptComposer::new();
        let prompt = composer
            .compose(&loaded_data(), "  gel electrophoresis \n")
            .unwrap();
        assert!(prompt.contains("Experiment Description: \"gel electrophoresis\""));
    }

    #[test]
    fn compose_rejects_blank_description() {
        let composer = PromptComposer::new();
        let err = composer.compose(&loaded_data(), "   \n\t").unwrap_err();
        assert!(matches!(err, ComposeError::EmptyDescription));
    }

    #[test]
    fn custom_instructions_replace_template() {
        let composer = PromptComposer::new().with_instructions("Plan the run.");
        let prompt = composer.compose(&loaded_data(), "assay").unwrap();
        assert!(prompt.starts_with("Plan the run."));
        assert!(!prompt.contains("Project Synapse"));
    }
}
