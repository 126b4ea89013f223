//! Session DTOs and migrations

use chrono::{DateTime, Utc};
use educhat_core::session::{DEFAULT_MODEL, Message, SearchResultItem, Session};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use version_migrate::{IntoDomain, MigratesTo, MigrationError, Migrator, Versioned};

/// Entity name the session migration path is registered under.
pub const SESSION_ENTITY: &str = "session";

/// Version assumed for stored sessions that carry no version of their own.
const LEGACY_SESSION_VERSION: &str = "1.0.0";

// ============================================================================
// Message DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItemV1_0_0 {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

/// Represents V1.0.0 of a stored chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct MessageV1_0_0 {
    pub id: String,
    pub content: String,
    pub is_from_user: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_results: Option<Vec<SearchResultItemV1_0_0>>,
}

impl From<&Message> for MessageV1_0_0 {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.clone(),
            content: message.content.clone(),
            is_from_user: message.is_from_user,
            timestamp: message.timestamp,
            search_results: message.search_results.as_ref().map(|items| {
                items
                    .iter()
                    .map(|item| SearchResultItemV1_0_0 {
                        title: item.title.clone(),
                        snippet: item.snippet.clone(),
                        url: item.url.clone(),
                    })
                    .collect()
            }),
        }
    }
}

impl From<MessageV1_0_0> for Message {
    fn from(dto: MessageV1_0_0) -> Self {
        Message {
            id: dto.id,
            content: dto.content,
            is_from_user: dto.is_from_user,
            timestamp: dto.timestamp,
            search_results: dto.search_results.map(|items| {
                items
                    .into_iter()
                    .map(|item| SearchResultItem {
                        title: item.title,
                        snippet: item.snippet,
                        url: item.url,
                    })
                    .collect()
            }),
        }
    }
}

// ============================================================================
// Session DTOs
// ============================================================================

fn default_selected_model() -> String {
    DEFAULT_MODEL.to_string()
}

/// Represents V1.0.0 of the session data schema.
/// Written before sessions carried a version; `selected_model` and `title`
/// may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct SessionV1_0_0 {
    pub id: String,
    #[serde(default)]
    pub messages: Vec<MessageV1_0_0>,
    #[serde(default = "default_selected_model")]
    pub selected_model: String,
    #[serde(default)]
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Represents V1.1.0 of the session data schema.
/// Every field is written explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
pub struct SessionV1_1_0 {
    pub id: String,
    pub messages: Vec<MessageV1_0_0>,
    pub selected_model: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Migration from SessionV1_0_0 to SessionV1_1_0.
impl MigratesTo<SessionV1_1_0> for SessionV1_0_0 {
    fn migrate(self) -> SessionV1_1_0 {
        SessionV1_1_0 {
            id: self.id,
            messages: self.messages,
            selected_model: self.selected_model,
            title: self.title,
            created_at: self.created_at,
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl IntoDomain<Session> for SessionV1_1_0 {
    fn into_domain(self) -> Session {
        Session {
            id: self.id,
            messages: self.messages.into_iter().map(Message::from).collect(),
            selected_model: self.selected_model,
            title: self.title,
            created_at: self.created_at,
        }
    }
}

impl From<&Session> for SessionV1_1_0 {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.clone(),
            messages: session.messages.iter().map(MessageV1_0_0::from).collect(),
            selected_model: session.selected_model.clone(),
            title: session.title.clone(),
            created_at: session.created_at,
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a Migrator for Session entities.
///
/// # Migration Path
///
/// - V1.0.0 → V1.1.0: `selected_model` and `title` become required
/// - V1.1.0 → Session: Converts DTO to domain model
pub fn create_session_migrator() -> Result<Migrator, MigrationError> {
    let mut migrator = Migrator::builder().build();

    let session_path = Migrator::define(SESSION_ENTITY)
        .from::<SessionV1_0_0>()
        .step::<SessionV1_1_0>()
        .into::<Session>();

    migrator.register(session_path)?;
    Ok(migrator)
}

/// Extracts the flat session entries from a stored history document.
///
/// Accepts a plain list, or the older `{version, sessions}` wrapper whose
/// version applies to every entry. Entries without a version of their own
/// are stamped with the wrapper version, or V1.0.0 for a plain list.
/// Returns `None` for any other shape.
pub fn session_entries(document: Value) -> Option<Vec<Value>> {
    let (entries, inherited) = match document {
        Value::Array(entries) => (entries, Value::from(LEGACY_SESSION_VERSION)),
        Value::Object(mut wrapper) => {
            let Some(Value::Array(entries)) = wrapper.remove("sessions") else {
                return None;
            };
            let version = wrapper
                .remove("version")
                .unwrap_or_else(|| Value::from(LEGACY_SESSION_VERSION));
            (entries, version)
        }
        _ => return None,
    };

    Some(
        entries
            .into_iter()
            .map(|mut entry| {
                if let Value::Object(fields) = &mut entry {
                    fields
                        .entry("version")
                        .or_insert_with(|| inherited.clone());
                }
                entry
            })
            .collect(),
    )
}
