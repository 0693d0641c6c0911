pub mod commands;

use anyhow::{bail, Result};

use crate::models::QuestionKind;

/// Kind-specific shape rules from the authoring form: multiple choice needs
/// four filled options with the answer among them, true/false is locked to
/// its two options, short answer carries none.
pub fn validate_question(kind: QuestionKind, options: &[String], answer: &str) -> Result<()> {
    if answer.trim().is_empty() {
        bail!("an answer is required");
    }

    match kind {
        QuestionKind::MultipleChoice => {
            if options.len() != 4 {
                bail!("multiple choice questions need exactly 4 options");
            }
            if options.iter().any(|option| option.trim().is_empty()) {
                bail!("multiple choice options cannot be empty");
            }
            if !options.iter().any(|option| option == answer) {
                bail!("the answer must be one of the options");
            }
        }
        QuestionKind::TrueFalse => {
            if options.len() != 2 || options[0] != "True" || options[1] != "False" {
                bail!("true/false questions must offer exactly True and False");
            }
            if answer != "True" && answer != "False" {
                bail!("the answer must be True or False");
            }
        }
        QuestionKind::ShortAnswer => {
            if !options.is_empty() {
                bail!("short answer questions take no options");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn multiple_choice_requires_answer_among_options() {
        let opts = options(&["2x", "x", "x^2", "2"]);
        assert!(validate_question(QuestionKind::MultipleChoice, &opts, "2x").is_ok());
        assert!(validate_question(QuestionKind::MultipleChoice, &opts, "3x").is_err());
    }

    #[test]
    fn multiple_choice_requires_four_filled_options() {
        assert!(
            validate_question(QuestionKind::MultipleChoice, &options(&["a", "b"]), "a").is_err()
        );
        assert!(validate_question(
            QuestionKind::MultipleChoice,
            &options(&["a", "b", "", "d"]),
            "a"
        )
        .is_err());
    }

    #[test]
    fn true_false_options_are_fixed() {
        let fixed = options(&["True", "False"]);
        assert!(validate_question(QuestionKind::TrueFalse, &fixed, "False").is_ok());
        assert!(validate_question(QuestionKind::TrueFalse, &fixed, "Maybe").is_err());
        assert!(
            validate_question(QuestionKind::TrueFalse, &options(&["Yes", "No"]), "Yes").is_err()
        );
    }

    #[test]
    fn short_answer_takes_no_options() {
        assert!(validate_question(QuestionKind::ShortAnswer, &[], "mitochondria").is_ok());
        assert!(validate_question(QuestionKind::ShortAnswer, &options(&["a"]), "a").is_err());
        assert!(validate_question(QuestionKind::ShortAnswer, &[], "  ").is_err());
    }
}
