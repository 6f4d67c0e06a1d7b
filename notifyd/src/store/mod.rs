//! In-memory storage for all domain records.
//!
//! The four tables (users, services, templates, messages) live in a single
//! `Tables` struct behind one coarse `RwLock`. Requests mutate shared state
//! only through this lock, so check-then-insert sequences (duplicate signup,
//! lazy status transitions) cannot race. Everything is lost on restart.
//!
//! Ownership is purely relational: a service is owned by the user whose email
//! it records, a template is owned through its parent service, and a message
//! through its parent template. Lookups walk those chains with linear scans,
//! which is fine at this scale.

pub mod models;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::crypto;
use crate::delivery::{self, MessageStatus};
use crate::errors::{Error, Result};
use crate::types::{MessageId, ServiceId, TemplateId};
use models::{Channel, Message, Service, Template, User};

#[derive(Default)]
struct Tables {
    /// Keyed by normalized (lowercased, trimmed) email.
    users: HashMap<String, User>,
    services: HashMap<ServiceId, Service>,
    templates: HashMap<TemplateId, Template>,
    messages: HashMap<MessageId, Message>,
}

/// Record counts per table, for the health endpoint.
#[derive(Debug, Clone, Copy)]
pub struct StoreCounts {
    pub users: usize,
    pub services: usize,
    pub templates: usize,
    pub messages: usize,
}

/// Handle to the shared in-memory tables.
///
/// Cloning is cheap and all clones observe the same state.
#[derive(Clone)]
pub struct Store {
    tables: Arc<RwLock<Tables>>,
    delivery_delay: Duration,
}

impl Store {
    pub fn new(delivery_delay: Duration) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            delivery_delay,
        }
    }

    /// Register a new user, generating their API key.
    ///
    /// The email is normalized (lowercased, trimmed) before use as the table
    /// key. Fails with a conflict if that normalized email is taken.
    pub fn create_user(&self, email: &str, password_hash: String) -> Result<User> {
        let email = email.trim().to_lowercase();

        let mut tables = self.tables.write();
        if tables.users.contains_key(&email) {
            return Err(Error::Conflict {
                message: "User already exists".to_string(),
            });
        }

        let user = User {
            email: email.clone(),
            password_hash,
            api_key: crypto::generate_api_key(),
            created_at: Utc::now(),
        };
        tables.users.insert(email, user.clone());
        Ok(user)
    }

    /// Resolve an API key to its owning user.
    pub fn user_by_api_key(&self, api_key: &str) -> Option<User> {
        let tables = self.tables.read();
        tables.users.values().find(|user| user.api_key == api_key).cloned()
    }

    pub fn create_service(&self, owner_email: &str, name: String, description: Option<String>) -> Service {
        let service = Service {
            id: Uuid::new_v4(),
            name,
            description,
            owner_email: owner_email.to_string(),
            created_at: Utc::now(),
        };

        let mut tables = self.tables.write();
        tables.services.insert(service.id, service.clone());
        service
    }

    /// All services owned by the user. Order is incidental, not contractual.
    pub fn services_owned(&self, owner_email: &str) -> Vec<Service> {
        let tables = self.tables.read();
        tables
            .services
            .values()
            .filter(|service| service.owner_email == owner_email)
            .cloned()
            .collect()
    }

    pub fn create_template(
        &self,
        owner_email: &str,
        service_id: ServiceId,
        name: String,
        subject: String,
        body: String,
    ) -> Result<Template> {
        let mut tables = self.tables.write();

        let service = tables.services.get(&service_id).ok_or_else(|| Error::NotFound {
            resource: "Service".to_string(),
        })?;
        if service.owner_email != owner_email {
            return Err(Error::Forbidden {
                resource: "Service".to_string(),
            });
        }

        let template = Template {
            id: Uuid::new_v4(),
            name,
            subject,
            body,
            service_id,
            created_at: Utc::now(),
        };
        tables.templates.insert(template.id, template.clone());
        Ok(template)
    }

    /// All templates whose parent service is owned by the user.
    pub fn templates_owned(&self, owner_email: &str) -> Vec<Template> {
        let tables = self.tables.read();
        let owned_services: HashSet<ServiceId> = tables
            .services
            .values()
            .filter(|service| service.owner_email == owner_email)
            .map(|service| service.id)
            .collect();

        tables
            .templates
            .values()
            .filter(|template| owned_services.contains(&template.service_id))
            .cloned()
            .collect()
    }

    /// Resolve a template for dispatch, checking the ownership chain.
    ///
    /// The template must exist and its parent service must belong to the
    /// caller. A missing parent service is reported as not-found rather than
    /// crashing, even though nothing ever deletes services.
    pub fn template_for_send(&self, owner_email: &str, template_id: TemplateId) -> Result<Template> {
        let tables = self.tables.read();

        let template = tables.templates.get(&template_id).ok_or_else(|| Error::NotFound {
            resource: "Template".to_string(),
        })?;
        let service = tables.services.get(&template.service_id).ok_or_else(|| Error::NotFound {
            resource: "Service".to_string(),
        })?;
        if service.owner_email != owner_email {
            return Err(Error::Forbidden {
                resource: "Template".to_string(),
            });
        }

        Ok(template.clone())
    }

    /// Record a dispatched message with content snapshotted from the template.
    ///
    /// The caller must have resolved the template through
    /// [`Store::template_for_send`]. New messages always start out `pending`
    /// with no delivery timestamp; SMS messages drop the subject.
    pub fn create_message(&self, template: &Template, recipient: String, channel: Channel) -> Message {
        let message = Message {
            id: Uuid::new_v4(),
            template_id: template.id,
            recipient,
            channel,
            status: MessageStatus::Pending,
            sent_at: Utc::now(),
            delivered_at: None,
            subject: match channel {
                Channel::Email => Some(template.subject.clone()),
                Channel::Sms => None,
            },
            body: template.body.clone(),
        };

        let mut tables = self.tables.write();
        tables.messages.insert(message.id, message.clone());
        message
    }

    /// Look up a single message, applying the lazy delivery transition.
    ///
    /// This is the only read path that mutates: if the message is still
    /// `pending` and past the delivery delay, a new status is drawn as part
    /// of answering the query. Bulk listing deliberately does not do this.
    pub fn message_status(&self, owner_email: &str, message_id: MessageId) -> Result<Message> {
        let mut tables = self.tables.write();

        let template_id = tables
            .messages
            .get(&message_id)
            .ok_or_else(|| Error::NotFound {
                resource: "Message".to_string(),
            })?
            .template_id;
        // A break anywhere in the message -> template -> service chain means
        // the message is unreachable for this caller.
        let service_id = tables
            .templates
            .get(&template_id)
            .ok_or_else(|| Error::NotFound {
                resource: "Message".to_string(),
            })?
            .service_id;
        let service = tables.services.get(&service_id).ok_or_else(|| Error::NotFound {
            resource: "Service".to_string(),
        })?;
        if service.owner_email != owner_email {
            return Err(Error::Forbidden {
                resource: "Message".to_string(),
            });
        }

        let delay = self.delivery_delay;
        let message = tables
            .messages
            .get_mut(&message_id)
            .expect("message existed above and nothing deletes");
        if delivery::advance_if_due(message, delay, Utc::now(), &mut rand::thread_rng()) {
            tracing::debug!(message_id = %message.id, status = %message.status, "message status advanced");
        }

        Ok(message.clone())
    }

    /// All messages whose parent template's parent service is owned by the
    /// user. Never triggers the lazy status transition, so listings can show
    /// stale `pending` statuses indefinitely.
    pub fn messages_owned(&self, owner_email: &str) -> Vec<Message> {
        let tables = self.tables.read();
        let owned_services: HashSet<ServiceId> = tables
            .services
            .values()
            .filter(|service| service.owner_email == owner_email)
            .map(|service| service.id)
            .collect();
        let owned_templates: HashSet<TemplateId> = tables
            .templates
            .values()
            .filter(|template| owned_services.contains(&template.service_id))
            .map(|template| template.id)
            .collect();

        tables
            .messages
            .values()
            .filter(|message| owned_templates.contains(&message.template_id))
            .cloned()
            .collect()
    }

    pub fn counts(&self) -> StoreCounts {
        let tables = self.tables.read();
        StoreCounts {
            users: tables.users.len(),
            services: tables.services.len(),
            templates: tables.templates.len(),
            messages: tables.messages.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Store {
        Store::new(Duration::from_secs(5))
    }

    /// Store with the delivery gate always open.
    fn store_due_immediately() -> Store {
        Store::new(Duration::ZERO)
    }

    fn register(store: &Store, email: &str) -> User {
        store.create_user(email, "hash".to_string()).unwrap()
    }

    #[test]
    fn test_signup_normalizes_email_and_rejects_duplicates() {
        let store = store();
        let user = register(&store, "  Alice@Example.COM ");
        assert_eq!(user.email, "alice@example.com");

        let err = store.create_user("alice@example.com", "other-hash".to_string()).unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));
        assert_eq!(store.counts().users, 1);
    }

    #[test]
    fn test_api_key_resolves_exactly_one_user() {
        let store = store();
        let alice = register(&store, "alice@example.com");
        let bob = register(&store, "bob@example.com");
        assert_ne!(alice.api_key, bob.api_key);

        assert_eq!(store.user_by_api_key(&alice.api_key).unwrap().email, alice.email);
        assert_eq!(store.user_by_api_key(&bob.api_key).unwrap().email, bob.email);
        assert!(store.user_by_api_key("nk-bogus").is_none());
    }

    #[test]
    fn test_ownership_isolation_across_all_hops() {
        let store = store_due_immediately();
        let alice = register(&store, "alice@example.com");
        let bob = register(&store, "bob@example.com");

        let service = store.create_service(&alice.email, "alerts".to_string(), None);
        let template = store
            .create_template(
                &alice.email,
                service.id,
                "welcome".to_string(),
                "Welcome".to_string(),
                "Hello!".to_string(),
            )
            .unwrap();
        let message = store.create_message(&template, "c@d.e".to_string(), Channel::Email);

        // Bob sees none of Alice's records through any listing
        assert!(store.services_owned(&bob.email).is_empty());
        assert!(store.templates_owned(&bob.email).is_empty());
        assert!(store.messages_owned(&bob.email).is_empty());

        // And cannot address them directly
        assert!(matches!(
            store.create_template(&bob.email, service.id, "t".into(), "s".into(), "b".into()),
            Err(Error::Forbidden { .. })
        ));
        assert!(matches!(
            store.template_for_send(&bob.email, template.id),
            Err(Error::Forbidden { .. })
        ));
        assert!(matches!(
            store.message_status(&bob.email, message.id),
            Err(Error::Forbidden { .. })
        ));

        // Alice sees everything
        assert_eq!(store.services_owned(&alice.email).len(), 1);
        assert_eq!(store.templates_owned(&alice.email).len(), 1);
        assert_eq!(store.messages_owned(&alice.email).len(), 1);
    }

    #[test]
    fn test_unknown_references_are_not_found() {
        let store = store();
        let alice = register(&store, "alice@example.com");

        assert!(matches!(
            store.create_template(&alice.email, Uuid::new_v4(), "t".into(), "s".into(), "b".into()),
            Err(Error::NotFound { .. })
        ));
        assert!(matches!(
            store.template_for_send(&alice.email, Uuid::new_v4()),
            Err(Error::NotFound { .. })
        ));
        assert!(matches!(
            store.message_status(&alice.email, Uuid::new_v4()),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_fresh_message_is_pending_without_timestamp() {
        let store = store();
        let alice = register(&store, "alice@example.com");
        let service = store.create_service(&alice.email, "alerts".to_string(), None);
        let template = store
            .create_template(&alice.email, service.id, "t".into(), "Subject".into(), "Body".into())
            .unwrap();

        let email = store.create_message(&template, "a@b.c".to_string(), Channel::Email);
        assert_eq!(email.status, MessageStatus::Pending);
        assert!(email.delivered_at.is_none());
        assert_eq!(email.subject.as_deref(), Some("Subject"));
        assert_eq!(email.body, "Body");

        // SMS snapshot drops the subject
        let sms = store.create_message(&template, "5551234567".to_string(), Channel::Sms);
        assert!(sms.subject.is_none());
        assert_eq!(sms.body, "Body");
    }

    #[test]
    fn test_status_query_before_delay_leaves_pending() {
        let store = store();
        let alice = register(&store, "alice@example.com");
        let service = store.create_service(&alice.email, "alerts".to_string(), None);
        let template = store
            .create_template(&alice.email, service.id, "t".into(), "s".into(), "b".into())
            .unwrap();
        let message = store.create_message(&template, "a@b.c".to_string(), Channel::Email);

        for _ in 0..50 {
            let fetched = store.message_status(&alice.email, message.id).unwrap();
            assert_eq!(fetched.status, MessageStatus::Pending);
            assert!(fetched.delivered_at.is_none());
        }
    }

    #[test]
    fn test_status_query_eventually_settles_and_sticks() {
        let store = store_due_immediately();
        let alice = register(&store, "alice@example.com");
        let service = store.create_service(&alice.email, "alerts".to_string(), None);
        let template = store
            .create_template(&alice.email, service.id, "t".into(), "s".into(), "b".into())
            .unwrap();
        let message = store.create_message(&template, "a@b.c".to_string(), Channel::Email);

        // With a 10% pending re-roll per query, 200 queries failing to settle
        // has probability 10^-200.
        let mut settled = None;
        for _ in 0..200 {
            let fetched = store.message_status(&alice.email, message.id).unwrap();
            if fetched.status.is_settled() {
                settled = Some(fetched);
                break;
            }
        }
        let settled = settled.expect("message never left pending");

        match settled.status {
            MessageStatus::Delivered | MessageStatus::Failed => {
                assert!(settled.delivered_at.is_some());
            }
            MessageStatus::Sent => assert!(settled.delivered_at.is_none()),
            MessageStatus::Pending => unreachable!(),
        }

        // Settled means settled: later queries return the identical record
        for _ in 0..50 {
            let again = store.message_status(&alice.email, message.id).unwrap();
            assert_eq!(again.status, settled.status);
            assert_eq!(again.delivered_at, settled.delivered_at);
        }
    }

    #[test]
    fn test_listing_never_advances_status() {
        let store = store_due_immediately();
        let alice = register(&store, "alice@example.com");
        let service = store.create_service(&alice.email, "alerts".to_string(), None);
        let template = store
            .create_template(&alice.email, service.id, "t".into(), "s".into(), "b".into())
            .unwrap();
        let message = store.create_message(&template, "a@b.c".to_string(), Channel::Email);

        // Past the (zero) delay, listing must still show the stale pending
        for _ in 0..50 {
            let listed = store.messages_owned(&alice.email);
            assert_eq!(listed.len(), 1);
            assert_eq!(listed[0].status, MessageStatus::Pending);
        }

        // Only the individual query advances it
        let mut fetched = store.message_status(&alice.email, message.id).unwrap();
        for _ in 0..200 {
            if fetched.status.is_settled() {
                break;
            }
            fetched = store.message_status(&alice.email, message.id).unwrap();
        }
        assert!(fetched.status.is_settled());

        let listed = store.messages_owned(&alice.email);
        assert_eq!(listed[0].status, fetched.status);
    }

    #[test]
    fn test_counts_track_created_records() {
        let store = store();
        let counts = store.counts();
        assert_eq!(
            (counts.users, counts.services, counts.templates, counts.messages),
            (0, 0, 0, 0)
        );

        let alice = register(&store, "alice@example.com");
        let service = store.create_service(&alice.email, "alerts".to_string(), None);
        let template = store
            .create_template(&alice.email, service.id, "t".into(), "s".into(), "b".into())
            .unwrap();
        store.create_message(&template, "a@b.c".to_string(), Channel::Email);
        store.create_message(&template, "5551234567".to_string(), Channel::Sms);

        let counts = store.counts();
        assert_eq!(
            (counts.users, counts.services, counts.templates, counts.messages),
            (1, 1, 1, 2)
        );
    }
}
