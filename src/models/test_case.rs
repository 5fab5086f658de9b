//! Test case definitions
//!
//! A test case pairs a human-readable suite name with the remote endpoint
//! that triggers it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Remote test suite trigger
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestCase {
    /// Display name of the suite
    pub name: String,

    /// Path appended to the base URL, e.g. `/test-login`
    pub endpoint: String,
}

impl TestCase {
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Get the suite category, derived from the endpoint path
    pub fn category(&self) -> &'static str {
        let path = self.endpoint.trim_start_matches('/');
        if path.starts_with("test-login") {
            "Authentication"
        } else if path.starts_with("test-user") {
            "Users"
        } else if path.starts_with("test-contact") {
            "Contacts"
        } else if path.starts_with("test-knowledgebase") {
            "Knowledge Base"
        } else if path.ends_with("-general-tab") || path.starts_with("test-voice") {
            "Assistant Updates"
        } else if path.contains("assistant") {
            "Assistants"
        } else {
            "Other"
        }
    }

    /// Default ordered suite list
    ///
    /// Order follows the dependency chain of the remote suites: authentication
    /// first, then users, contacts, knowledge base, assistants and finally the
    /// per-channel assistant updates.
    pub fn defaults() -> Vec<TestCase> {
        vec![
            // Authentication
            TestCase::new("Login Tests", "/test-login"),
            // Users
            TestCase::new("Users List Tests", "/test-users-list"),
            TestCase::new("User Detail Tests", "/test-user-detail"),
            // Contacts
            TestCase::new("Contacts List Tests", "/test-contacts-list"),
            TestCase::new("Contact Form Tests", "/test-contact-form"),
            // Knowledge base
            TestCase::new("Knowledge Base List Tests", "/test-knowledgebase-list"),
            TestCase::new("Knowledge Base Form Tests", "/test-knowledgebase-form"),
            // Assistants
            TestCase::new("Assistant Creation Tests", "/test-assistant-creation"),
            TestCase::new("Create Assistant All Types", "/test-create-assistant-all-types"),
            TestCase::new("Update Assistant Basic", "/test-update-assistant-basic"),
            TestCase::new("Delete Assistant", "/test-delete-assistant"),
            // Assistant updates
            TestCase::new("Voice Type Tests", "/test-voice-type"),
            TestCase::new("WhatsApp General Tab", "/test-whatsapp-general-tab"),
            TestCase::new("Chatbot General Tab", "/test-chatbot-general-tab"),
            TestCase::new("SMS General Tab", "/test-sms-general-tab"),
        ]
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.endpoint)
    }
}
