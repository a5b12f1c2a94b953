//! Email capture for the call-to-action form.
//!
//! The typed address is local state owned by [`EmailCapture`]. Submitting
//! hands it to a [`SignupSink`] and clears the field; what the sink does
//! with it is outside this crate.

/// Receives captured email addresses
pub trait SignupSink {
    fn submit(&mut self, email: &str);
}

/// Stub collaborator that only logs the signup
#[derive(Debug, Default)]
pub struct LogSink;

impl SignupSink for LogSink {
    fn submit(&mut self, email: &str) {
        log::info!("Thanks for signing up with {}!", email);
    }
}

impl SignupSink for Vec<String> {
    fn submit(&mut self, email: &str) {
        self.push(email.to_string());
    }
}

pub struct EmailCapture<S: SignupSink> {
    value: String,
    sink: S,
}

impl<S: SignupSink> EmailCapture<S> {
    pub fn new(sink: S) -> Self {
        Self {
            value: String::new(),
            sink,
        }
    }

    /// Replace the field contents, as a text input change event would
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Submit the form. Like a `required` input, an empty field is not
    /// submitted. Returns whether the sink received the value.
    pub fn submit(&mut self) -> bool {
        if self.value.is_empty() {
            return false;
        }
        let email = std::mem::take(&mut self.value);
        self.sink.submit(&email);
        true
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
