use yew::prelude::*;

#[derive(Clone, PartialEq)]
pub enum FormMessage {
    None,
    Success(String),
    Error(String),
}

#[derive(Clone)]
pub struct FormState {
    pub message: FormMessage,
    pub handle_success: Callback<String>,
    pub handle_error: Callback<String>,
    pub clear: Callback<()>,
}

impl FormState {
    pub fn error(&self) -> Option<&str> {
        match &self.message {
            FormMessage::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn success(&self) -> Option<&str> {
        match &self.message {
            FormMessage::Success(msg) => Some(msg),
            _ => None,
        }
    }
}

/// A single status line for a form: setting one kind of message replaces the other
#[hook]
pub fn use_form_state() -> FormState {
    let message = use_state(|| FormMessage::None);

    let handle_success = {
        let message = message.clone();
        Callback::from(move |msg: String| message.set(FormMessage::Success(msg)))
    };

    let handle_error = {
        let message = message.clone();
        Callback::from(move |msg: String| message.set(FormMessage::Error(msg)))
    };

    let clear = {
        let message = message.clone();
        Callback::from(move |_| message.set(FormMessage::None))
    };

    FormState {
        message: (*message).clone(),
        handle_success,
        handle_error,
        clear,
    }
}
