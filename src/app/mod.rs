mod text_input;

pub use text_input::TextInput;

use crate::services::Services;
use crate::services::logbook::LogOutcome;
use crate::services::matcher::MatchKind;
use crate::services::retrieval::RetrievalOutcome;

const UNRESOLVED_HINT: &str = "Couldn't identify a person's name. Try 'show me interactions with [name]' or 'what did I discuss with [name]'.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Log,
    Retrieve,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Log, Tab::Retrieve];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Log => "Log Interaction",
            Tab::Retrieve => "Retrieve Interactions",
        }
    }

    fn other(self) -> Self {
        match self {
            Tab::Log => Tab::Retrieve,
            Tab::Retrieve => Tab::Log,
        }
    }
}

/// Which field of the log form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogField {
    Name,
    Details,
}

/// A one-line result banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Info(String),
    Error(String),
}

/// A found interaction, shown in its own box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub heading: String,
    pub details: String,
}

pub struct App {
    pub tab: Tab,
    pub log_field: LogField,
    pub name_input: TextInput,
    pub details_input: TextInput,
    pub query_input: TextInput,
    pub notice: Option<Notice>,
    pub answer: Option<Answer>,
    pub should_quit: bool,
    services: Services,
}

impl App {
    pub fn new(services: Services) -> Self {
        Self {
            tab: Tab::Log,
            log_field: LogField::Name,
            name_input: TextInput::new(),
            details_input: TextInput::new(),
            query_input: TextInput::new(),
            notice: None,
            answer: None,
            should_quit: false,
            services,
        }
    }

    pub fn switch_tab(&mut self) {
        self.tab = self.tab.other();
        self.notice = None;
        self.answer = None;
    }

    pub fn toggle_log_field(&mut self) {
        self.log_field = match self.log_field {
            LogField::Name => LogField::Details,
            LogField::Details => LogField::Name,
        };
    }

    /// The input receiving keystrokes
    pub fn active_input(&mut self) -> &mut TextInput {
        match (self.tab, self.log_field) {
            (Tab::Log, LogField::Name) => &mut self.name_input,
            (Tab::Log, LogField::Details) => &mut self.details_input,
            (Tab::Retrieve, _) => &mut self.query_input,
        }
    }

    /// Enter on the name field advances; Enter on details saves.
    /// The form clears after a successful save.
    pub fn submit_log(&mut self) {
        if self.log_field == LogField::Name {
            self.log_field = LogField::Details;
            return;
        }

        let outcome = self
            .services
            .logbook
            .log(self.name_input.content(), self.details_input.content());
        if matches!(outcome, LogOutcome::Saved(_)) {
            self.name_input.clear();
            self.details_input.clear();
            self.log_field = LogField::Name;
        }
        self.notice = Some(log_notice(&outcome));
    }

    pub fn submit_query(&mut self) {
        self.answer = None;
        match self.services.retrieval() {
            Ok(retrieval) => {
                let outcome = retrieval.retrieve(self.query_input.content());
                let (answer, notice) = describe_retrieval(&outcome);
                self.answer = answer;
                self.notice = notice;
            }
            Err(error) => self.notice = Some(Notice::Error(error.to_string())),
        }
    }
}

/// Banner text for a logging outcome
#[must_use]
pub fn log_notice(outcome: &LogOutcome) -> Notice {
    match outcome {
        LogOutcome::Saved(interaction) => Notice::Success(format!(
            "Interaction with '{}' saved successfully!",
            interaction.name
        )),
        LogOutcome::Rejected(error) => Notice::Error(error.to_string()),
    }
}

/// What to show for a retrieval outcome
#[must_use]
pub fn describe_retrieval(outcome: &RetrievalOutcome) -> (Option<Answer>, Option<Notice>) {
    match outcome {
        RetrievalOutcome::Found {
            name,
            interaction,
            kind,
        } => {
            let heading = match kind {
                MatchKind::Exact => format!("Interaction with {}:", name),
                MatchKind::Fuzzy { score } => format!(
                    "Interaction with {} (closest match: {}, {}%):",
                    name, interaction.name, score
                ),
            };
            let answer = Answer {
                heading,
                details: interaction.details.clone(),
            };
            (Some(answer), None)
        }
        RetrievalOutcome::Info { message } => (None, Some(Notice::Info(message.clone()))),
        RetrievalOutcome::Unresolved { warning } => {
            let text = match warning {
                Some(error) => format!("{}\n{}", error, UNRESOLVED_HINT),
                None => UNRESOLVED_HINT.to_string(),
            };
            (None, Some(Notice::Error(text)))
        }
        RetrievalOutcome::NotFound { .. } | RetrievalOutcome::Failed(_) => {
            let text = outcome.error().map(|error| error.to_string()).unwrap_or_default();
            (None, Some(Notice::Error(text)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Field, MeetError};
    use crate::storage::Interaction;

    #[test]
    fn test_saved_notice() {
        let outcome = LogOutcome::Saved(Interaction::new("Pritha", "discussed project X"));
        assert_eq!(
            log_notice(&outcome),
            Notice::Success("Interaction with 'Pritha' saved successfully!".to_string())
        );
    }

    #[test]
    fn test_rejected_notice_uses_error_text() {
        let outcome = LogOutcome::Rejected(MeetError::Validation(Field::Name));
        assert_eq!(
            log_notice(&outcome),
            Notice::Error("Please provide both a name and interaction details.".to_string())
        );
    }

    #[test]
    fn test_found_answer_mentions_closest_match() {
        let outcome = RetrievalOutcome::Found {
            name: "Jon".to_string(),
            interaction: Interaction::new("John", "met for coffee"),
            kind: MatchKind::Fuzzy { score: 86 },
        };
        let (answer, notice) = describe_retrieval(&outcome);
        assert_eq!(notice, None);
        assert_eq!(
            answer,
            Some(Answer {
                heading: "Interaction with Jon (closest match: John, 86%):".to_string(),
                details: "met for coffee".to_string(),
            })
        );
    }

    #[test]
    fn test_not_found_and_unresolved_are_errors() {
        let (_, notice) = describe_retrieval(&RetrievalOutcome::NotFound {
            name: "Zed".to_string(),
        });
        assert_eq!(
            notice,
            Some(Notice::Error(
                "No interaction found with 'Zed' or a close match (case-insensitive).".to_string()
            ))
        );

        let (_, notice) = describe_retrieval(&RetrievalOutcome::Unresolved {
            warning: Some(MeetError::ModelCall("Groq returned an empty response.".to_string())),
        });
        let Some(Notice::Error(text)) = notice else {
            panic!("expected an error notice");
        };
        assert!(text.starts_with("Language model error: Groq returned an empty response."));
        assert!(text.ends_with(UNRESOLVED_HINT));
    }

    #[test]
    fn test_info_passes_message_through() {
        let (answer, notice) = describe_retrieval(&RetrievalOutcome::Info {
            message: "Hello!".to_string(),
        });
        assert_eq!(answer, None);
        assert_eq!(notice, Some(Notice::Info("Hello!".to_string())));
    }
}
