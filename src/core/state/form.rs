use crate::core::{
    cmd::Cmd,
    msg::form::{FormMsg, SubmissionOutcome},
};
use crate::domain::form::{FieldErrors, FormFields, FormMessages, FormRules};

/// Contact form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub rules: FormRules,
    pub messages: FormMessages,
    pub errors: FieldErrors,
    pub status: String,
    /// A submission has been sent and no outcome has arrived yet
    pub in_flight: bool,
}

impl FormState {
    pub fn new(rules: FormRules, messages: FormMessages) -> Self {
        Self {
            rules,
            messages,
            ..Default::default()
        }
    }

    pub fn update(&mut self, msg: FormMsg) -> Vec<Cmd> {
        match msg {
            FormMsg::Submit(fields) => self.submit(&fields),
            FormMsg::SubmissionFinished(outcome) => self.finish(outcome),
        }
    }

    fn submit(&mut self, fields: &FormFields) -> Vec<Cmd> {
        self.errors.clear();
        self.status = self.messages.sending.clone();
        let mut cmds = vec![
            Cmd::ClearFieldErrors,
            Cmd::SetFormStatus(self.status.clone()),
        ];

        self.errors = self.rules.validate(fields);
        if !self.errors.is_empty() {
            cmds.extend(self.errors.iter().map(|(field, message)| Cmd::ShowFieldError {
                field: field.to_string(),
                message: message.to_string(),
            }));
            self.status.clear();
            cmds.push(Cmd::SetFormStatus(String::new()));
            return cmds;
        }

        self.in_flight = true;
        cmds.push(Cmd::SubmitForm {
            body: fields.to_urlencoded(),
        });
        cmds
    }

    fn finish(&mut self, outcome: SubmissionOutcome) -> Vec<Cmd> {
        self.in_flight = false;
        if outcome.is_success() {
            self.status = self.messages.success.clone();
            return vec![Cmd::SetFormStatus(self.status.clone()), Cmd::ResetForm];
        }

        self.status = self.messages.failure.clone();
        let detail = match outcome {
            SubmissionOutcome::Responded(status) => {
                format!("Server responded with status: {status}")
            }
            SubmissionOutcome::Failed(reason) => reason,
        };
        vec![
            Cmd::SetFormStatus(self.status.clone()),
            Cmd::LogError {
                message: format!("Form submission error: {detail}"),
            },
        ]
    }
}
