//! Confirmation dialog state
//!
//! A dialog carries the messages to dispatch for each choice, so the handler
//! that opens it decides what "yes" means.

use crate::data::Mutation;
use crate::message::Message;

#[derive(Debug, Clone)]
pub struct ConfirmDialogState {
    pub title: String,
    pub message: String,
    /// (label, message) pairs; the first option is the confirm action
    pub options: Vec<(String, Message)>,
}

impl ConfirmDialogState {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        options: Vec<(&str, Message)>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            options: options
                .into_iter()
                .map(|(label, msg)| (label.to_string(), msg))
                .collect(),
        }
    }

    /// Delete confirmation for `mutation`.
    pub fn delete(mutation: Mutation) -> Self {
        let summary = mutation.summary();
        Self::new(
            format!("Delete {}", summary.collection.noun().to_lowercase()),
            format!("Nuke {}? This cannot be undone.", summary.subject),
            vec![
                ("Delete", Message::ConfirmDelete(mutation)),
                ("Cancel", Message::CancelConfirm),
            ],
        )
    }

    pub fn disconnect(address: &str) -> Self {
        Self::new(
            "Disconnect",
            format!("Disconnect from {}?", address),
            vec![
                ("Disconnect", Message::ConfirmDisconnect),
                ("Cancel", Message::CancelConfirm),
            ],
        )
    }

    pub fn confirm_message(&self) -> Option<&Message> {
        self.options.first().map(|(_, msg)| msg)
    }

    pub fn cancel_message(&self) -> Option<&Message> {
        self.options.get(1).map(|(_, msg)| msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_dialog_carries_mutation() {
        let dialog = ConfirmDialogState::delete(Mutation::DeleteCredential { key: "aws".into() });
        assert_eq!(dialog.title, "Delete credential set");
        assert!(dialog.message.starts_with("Nuke aws?"));
        assert!(matches!(
            dialog.confirm_message(),
            Some(Message::ConfirmDelete(Mutation::DeleteCredential { key })) if key == "aws"
        ));
        assert!(matches!(dialog.cancel_message(), Some(Message::CancelConfirm)));
    }

    #[test]
    fn test_disconnect_dialog() {
        let dialog = ConfirmDialogState::disconnect("10.0.0.1");
        assert_eq!(dialog.message, "Disconnect from 10.0.0.1?");
        assert_eq!(dialog.options.len(), 2);
        assert!(matches!(
            dialog.confirm_message(),
            Some(Message::ConfirmDisconnect)
        ));
    }
}
