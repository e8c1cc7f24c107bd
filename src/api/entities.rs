use serde::Serialize;
use serde_json::Value;

use super::ApiClient;
use crate::error::{AdminError, Result};
use crate::models::{
    Admin, AdminUpdate, CardContent, CardInput, CardStatus, Category, CategoryInput, Deck, DeckInput,
    Entity, EntityKind, Validate,
};
use crate::records::Record;
use crate::session::Role;
use crate::types::Operation;

fn unsupported(kind: EntityKind, operation: Operation) -> AdminError {
    AdminError::forbidden(format!("Cannot {} {}", operation.verb(), kind))
}

/// The saved record from a mutation reply, or `fallback` when the backend replies without one
fn saved_record(reply: Value, fallback: impl FnOnce() -> Result<Record>) -> Result<Record> {
    match reply {
        Value::Object(ref map) if map.contains_key("id") => Ok(Record::from_json(reply)?),
        _ => fallback(),
    }
}

/// `fallback` with the sent payload's fields laid over it
fn merged(base: &Record, payload: &impl Serialize) -> Result<Record> {
    let mut next = base.clone();
    if let Value::Object(fields) = serde_json::to_value(payload)? {
        for (key, value) in fields {
            next.set(key, value);
        }
    }
    Ok(next)
}

impl ApiClient {
    pub async fn list_records(&self, kind: EntityKind) -> Result<Vec<Record>> {
        let body = self.get(kind.list_path()).await?;
        let records = Record::from_json_flexible(body)?;
        tracing::debug!("Loaded {} {}", records.len(), kind);
        Ok(records)
    }

    /// Typed list of one collection
    pub async fn list<E: Entity>(&self) -> Result<Vec<E>> {
        self.list_records(E::KIND)
            .await?
            .iter()
            .map(E::from_record)
            .collect()
    }

    pub async fn get_record(&self, kind: EntityKind, id: &str) -> Result<Record> {
        let path = kind.detail_path(id).ok_or_else(|| unsupported(kind, Operation::List))?;
        Ok(Record::from_json(self.get(&path).await?)?)
    }

    pub async fn get_card(&self, id: &str) -> Result<CardContent> {
        CardContent::from_record(&self.get_record(EntityKind::Cards, id).await?)
    }

    /// Validate `input` locally, then create it
    pub async fn create_record<I>(&self, kind: EntityKind, input: &I) -> Result<Record>
    where
        I: Serialize + Validate,
    {
        input.validate()?;
        let path = kind.create_path().ok_or_else(|| unsupported(kind, Operation::Create))?;
        let reply = self.post(path, input).await?;
        tracing::info!("Created {} record", kind);
        saved_record(reply, || {
            Err(AdminError::api(200, format!("Create {} returned no record", kind)))
        })
    }

    /// Validate `input` locally, then replace record `current` with it
    pub async fn update_record<I>(&self, kind: EntityKind, current: &Record, input: &I) -> Result<Record>
    where
        I: Serialize + Validate,
    {
        input.validate()?;
        let id = current.id().ok_or_else(|| AdminError::not_found(format!("{} record without an id", kind)))?;
        let path = kind.update_path(&id).ok_or_else(|| unsupported(kind, Operation::Update))?;
        let reply = self.put(&path, input).await?;
        tracing::info!("Updated {} {}", kind, id);
        saved_record(reply, || merged(current, input))
    }

    pub async fn delete_record(&self, kind: EntityKind, id: &str) -> Result<()> {
        self.delete(&kind.delete_path(id)).await?;
        tracing::info!("Deleted {} {}", kind, id);
        Ok(())
    }

    // ========================================
    // Status transitions
    // ========================================

    /// Fetch the card, then send its full payload back with the new status
    pub async fn update_card_status(&self, id: &str, status: CardStatus) -> Result<Record> {
        let card = self.get_card(id).await?;
        let payload = CardInput::with_status(&card, status);
        let path = EntityKind::Cards
            .update_path(id)
            .ok_or_else(|| unsupported(EntityKind::Cards, Operation::StatusChange))?;
        let reply = self.put(&path, &payload).await?;
        tracing::info!("Card {} is now {}", id, status.as_str());
        saved_record(reply, || merged(&card.to_record()?, &payload))
    }

    /// Flip a deck's or category's active flag by sending its full payload
    pub async fn set_active(&self, kind: EntityKind, current: &Record, active: bool) -> Result<Record> {
        match kind {
            EntityKind::Decks => {
                let mut payload = DeckInput::from(&Deck::from_record(current)?);
                payload.status = Some(active);
                self.update_record(kind, current, &payload).await
            }
            EntityKind::Categories => {
                let mut payload = CategoryInput::from(&Category::from_record(current)?);
                payload.status = Some(active);
                self.update_record(kind, current, &payload).await
            }
            other => Err(unsupported(other, Operation::StatusChange)),
        }
    }

    /// Change another admin's role; only a SuperAdmin session may do this
    pub async fn change_admin_role(&self, current: &Record, role: Role) -> Result<Record> {
        self.session.require_super_admin()?;
        let mut payload = AdminUpdate::from(&Admin::from_record(current)?);
        payload.role = role;
        self.update_record(EntityKind::Admins, current, &payload).await
    }
}
