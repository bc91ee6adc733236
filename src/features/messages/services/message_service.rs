use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::core::error::Result;
use crate::features::messages::dtos::{CreateMessageDto, MessageQueryParams, UpdateMessageDto};
use crate::features::messages::models::{
    extract_tags, Message, MessagePriority, MessageStats, MessageStatus,
};
use crate::shared::entity::{Entity, EntityStore};
use crate::shared::filtering::{normalize_tags, normalize_term};

const DEFAULT_SUBJECT: &str = "Contacto desde el sitio web";

pub struct MessageService {
    store: Arc<EntityStore<Message>>,
}

impl MessageService {
    pub fn new(store: Arc<EntityStore<Message>>) -> Self {
        Self { store }
    }

    /// Store a contact form submission as an unread, auto-classified message
    pub async fn create(&self, dto: CreateMessageDto) -> Result<Message> {
        let message = self
            .store
            .create(|_, id, now| {
                let subject = dto
                    .subject
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| DEFAULT_SUBJECT.to_string());
                let body = dto.message.trim().to_string();

                Ok(Message {
                    id,
                    name: dto.name.trim().to_string(),
                    email: dto.email.trim().to_lowercase(),
                    phone: dto.phone.map(|p| p.trim().to_string()).unwrap_or_default(),
                    priority: MessagePriority::classify(&subject, &body),
                    tags: extract_tags(&body),
                    subject,
                    message: body,
                    status: MessageStatus::Unread,
                    active: true,
                    created_at: now,
                    updated_at: Some(now),
                    read_at: None,
                    replied_at: None,
                })
            })
            .await?;

        tracing::info!(
            "New contact message {} from {} (priority {:?})",
            message.id,
            message.email,
            message.priority
        );
        Ok(message)
    }

    /// Newest first; archived messages only with `include_archived`
    pub async fn list(&self, query: &MessageQueryParams) -> Result<(Vec<Message>, i64)> {
        let term = normalize_term(query.search.as_deref());

        let messages = self
            .store
            .filter(|m| {
                (query.include_archived || m.active)
                    && query.status.is_none_or(|s| m.status == s)
                    && query.priority.is_none_or(|p| m.priority == p)
                    && term.as_deref().is_none_or(|t| m.matches(t))
            })
            .await?;

        Ok(query.pagination().apply(messages))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Message> {
        self.store.get_by_id(id).await
    }

    pub async fn update(&self, id: i64, dto: UpdateMessageDto) -> Result<Message> {
        self.store
            .update(id, |message, _| {
                let now = Utc::now();
                if let Some(status) = dto.status {
                    message.set_status(status, now);
                }
                if let Some(priority) = dto.priority {
                    message.priority = priority;
                }
                if let Some(tags) = dto.tags {
                    message.tags = normalize_tags(tags);
                }
                Ok(())
            })
            .await
    }

    /// Archive; the message stays reachable by id and with `include_archived`
    pub async fn soft_delete(&self, id: i64) -> Result<Message> {
        self.store.soft_delete(id).await
    }

    pub async fn restore(&self, id: i64) -> Result<Message> {
        self.store.restore(id).await
    }

    pub async fn mark_read(&self, id: i64) -> Result<Message> {
        self.store
            .update(id, |message, _| {
                message.mark_read(Utc::now());
                Ok(())
            })
            .await
    }

    pub async fn mark_replied(&self, id: i64) -> Result<Message> {
        self.store
            .update(id, |message, _| {
                message.mark_replied(Utc::now());
                Ok(())
            })
            .await
    }

    pub async fn change_priority(&self, id: i64, priority: MessagePriority) -> Result<Message> {
        self.store
            .update(id, |message, _| {
                message.priority = priority;
                Ok(())
            })
            .await
    }

    pub async fn add_tags(&self, id: i64, tags: Vec<String>) -> Result<Message> {
        let tags = normalize_tags(tags);
        self.store
            .update(id, |message, _| {
                message.add_tags(&tags);
                Ok(())
            })
            .await
    }

    pub async fn remove_tags(&self, id: i64, tags: Vec<String>) -> Result<Message> {
        let tags = normalize_tags(tags);
        self.store
            .update(id, |message, _| {
                message.remove_tags(&tags);
                Ok(())
            })
            .await
    }

    pub async fn stats(&self) -> Result<MessageStats> {
        let messages = self.store.all().await?;
        Ok(MessageStats::compute(&messages, Utc::now()))
    }

    /// Permanently delete messages received more than `days` days ago
    pub async fn cleanup(&self, days: i64) -> Result<usize> {
        self.cleanup_before(Utc::now() - Duration::days(days)).await
    }

    async fn cleanup_before(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        let deleted = self
            .store
            .remove_where(|m| m.created_at < cutoff)
            .await?;
        tracing::info!("Deleted {} messages received before {}", deleted, cutoff);
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::shared::constants::MESSAGES_COLLECTION;
    use crate::shared::test_helpers::memory_backend;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn service() -> (MessageService, Arc<EntityStore<Message>>) {
        let store = Arc::new(EntityStore::new(memory_backend(), MESSAGES_COLLECTION));
        (MessageService::new(store.clone()), store)
    }

    fn contact(subject: &str, body: &str) -> CreateMessageDto {
        CreateMessageDto {
            name: Name().fake(),
            email: SafeEmail().fake(),
            phone: Some(" +57 300 123 4567 ".to_string()),
            subject: Some(subject.to_string()),
            message: body.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_classifies_and_tags() {
        let (service, _) = service();
        let message = service
            .create(contact(
                "Evento de boda",
                "Necesitamos catering y cocktail para 100 invitados",
            ))
            .await
            .unwrap();

        assert_eq!(message.status, MessageStatus::Unread);
        assert_eq!(message.priority, MessagePriority::High);
        assert_eq!(message.tags, vec!["catering", "cocktail"]);
        assert_eq!(message.phone, "+57 300 123 4567");
        assert!(message.read_at.is_none());
    }

    #[tokio::test]
    async fn test_list_filters_and_hides_archived() {
        let (service, _) = service();
        let urgent = service
            .create(contact("Urgente", "Catering para mañana"))
            .await
            .unwrap();
        let medium = service
            .create(contact("Consulta", "¿Hacen desayunos?"))
            .await
            .unwrap();
        service.soft_delete(medium.id).await.unwrap();

        let (visible, total) = service.list(&MessageQueryParams::default()).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(visible[0].id, urgent.id);

        let query = MessageQueryParams {
            include_archived: true,
            ..Default::default()
        };
        let (all, _) = service.list(&query).await.unwrap();
        // newest first
        assert_eq!(all[0].id, medium.id);

        let query = MessageQueryParams {
            priority: Some(MessagePriority::Urgent),
            include_archived: true,
            ..Default::default()
        };
        assert_eq!(service.list(&query).await.unwrap().1, 1);

        let query = MessageQueryParams {
            search: Some("DESAYUNOS".to_string()),
            include_archived: true,
            ..Default::default()
        };
        assert_eq!(service.list(&query).await.unwrap().1, 1);
    }

    #[tokio::test]
    async fn test_read_replied_and_priority() {
        let (service, _) = service();
        let message = service.create(contact("Hola", "Información")).await.unwrap();

        let read = service.mark_read(message.id).await.unwrap();
        assert_eq!(read.status, MessageStatus::Read);
        assert!(read.read_at.is_some());

        let replied = service.mark_replied(message.id).await.unwrap();
        assert_eq!(replied.status, MessageStatus::Replied);
        assert!(replied.replied_at.is_some());

        let changed = service
            .change_priority(message.id, MessagePriority::Low)
            .await
            .unwrap();
        assert_eq!(changed.priority, MessagePriority::Low);

        let stats = service.stats().await.unwrap();
        assert_eq!(stats.replied, 1);
        assert_eq!(stats.priorities.low, 1);
        assert_eq!(stats.recent.today, 1);
    }

    #[tokio::test]
    async fn test_tag_editing() {
        let (service, _) = service();
        let message = service
            .create(contact("Consulta", "Menú vegano"))
            .await
            .unwrap();
        assert_eq!(message.tags, vec!["vegano"]);

        let tagged = service
            .add_tags(message.id, vec!["VIP".to_string(), "vegano".to_string()])
            .await
            .unwrap();
        assert_eq!(tagged.tags, vec!["vegano", "vip"]);

        let untagged = service
            .remove_tags(message.id, vec!["vegano".to_string()])
            .await
            .unwrap();
        assert_eq!(untagged.tags, vec!["vip"]);
    }

    #[tokio::test]
    async fn test_cleanup_removes_only_old_messages() {
        let (service, store) = service();
        let old = service.create(contact("Antiguo", "Hola")).await.unwrap();
        service.create(contact("Reciente", "Hola")).await.unwrap();

        store
            .collection()
            .mutate(|messages| {
                if let Some(m) = messages.iter_mut().find(|m| m.id == old.id) {
                    m.created_at = Utc::now() - Duration::days(45);
                }
                Ok::<_, AppError>(())
            })
            .await
            .unwrap();

        assert_eq!(service.cleanup(30).await.unwrap(), 1);
        assert!(matches!(
            service.get_by_id(old.id).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(service.cleanup(30).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_blank_subject_gets_default() {
        let (service, _) = service();
        let mut dto = contact("", "Hola");
        dto.subject = None;
        let message = service.create(dto).await.unwrap();
        assert_eq!(message.subject, DEFAULT_SUBJECT);

        let message = service.create(contact("   ", "Hola")).await.unwrap();
        assert_eq!(message.subject, DEFAULT_SUBJECT);
    }

    #[tokio::test]
    async fn test_missing_message_is_not_found() {
        let (service, _) = service();
        assert!(matches!(
            service.mark_read(7).await,
            Err(AppError::NotFound(_))
        ));
    }
}
