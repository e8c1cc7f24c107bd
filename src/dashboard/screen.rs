use serde::Serialize;

use super::notifier::Notifier;
use crate::api::ApiClient;
use crate::error::{AdminError, Result};
use crate::models::validate::Validate;
use crate::models::{admin, card_content, category, count_active, CardStatus, EntityKind, InsertPosition};
use crate::records::{Record, RecordSource};
use crate::session::Role;
use crate::table::{CsvExport, TableSnapshot, TableView};
use crate::types::Operation;

/// Headline counts shown above a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Kpis {
    pub total: usize,
    pub active: Option<usize>,
    pub inactive: Option<usize>,
}

/// One admin screen: its record list, table state and notices.
///
/// Every mutation talks to the backend first and only touches the record list once the call
/// succeeds. Failures produce exactly one notice and leave the list as it was.
#[derive(Debug)]
pub struct Screen {
    kind: EntityKind,
    api: ApiClient,
    source: RecordSource,
    table: TableView,
    notifier: Notifier,
}

impl Screen {
    pub fn new(kind: EntityKind, api: ApiClient, notifier: Notifier) -> Self {
        Self { kind, api, source: RecordSource::default(), table: kind.table_view(), notifier }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn source(&self) -> &RecordSource {
        &self.source
    }

    pub fn records(&self) -> &[Record] {
        self.source.records()
    }

    pub fn table(&self) -> &TableView {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TableView {
        &mut self.table
    }

    /// Render the current page
    pub fn view(&mut self) -> TableSnapshot {
        self.table.view(self.source.records())
    }

    pub fn export(&self) -> Result<CsvExport> {
        Ok(self.table.export(self.source.records())?)
    }

    /// Report a failure once and hand it back to the caller
    fn fail<T>(&self, operation: Operation, err: AdminError) -> Result<T> {
        match &err {
            // Validation problems are shown inline next to the fields
            AdminError::Validation { .. } => {}
            AdminError::Forbidden(message) => self.notifier.info(message.clone()),
            _ => {
                let fallback = self.kind.failure_message(operation);
                let message = if self.kind.surfaces_backend_detail() {
                    err.notice_message(fallback)
                } else {
                    fallback.to_string()
                };
                self.notifier.error(message);
            }
        }
        Err(err)
    }

    fn require(&self, id: &str) -> Result<Record> {
        self.source
            .find(id)
            .cloned()
            .ok_or_else(|| AdminError::not_found(format!("{} {}", self.kind, id)))
    }

    // ========================================
    // Loading
    // ========================================

    /// Fetch the list plus whatever lookups its derived columns need
    pub async fn load(&mut self) -> Result<()> {
        match self.fetch().await {
            Ok(records) => {
                self.source.replace(records);
                self.refresh_own_lookups();
                Ok(())
            }
            Err(e) => self.fail(Operation::List, e),
        }
    }

    async fn fetch(&mut self) -> Result<Vec<Record>> {
        match self.kind {
            EntityKind::Categories => {
                let (decks, categories) = tokio::try_join!(
                    self.api.list_records(EntityKind::Decks),
                    self.api.list_records(EntityKind::Categories),
                )?;
                self.table.set_lookup(category::DECK_LOOKUP, category::deck_lookup(&decks));
                Ok(categories)
            }
            EntityKind::Cards => {
                let (decks, categories, cards) = tokio::try_join!(
                    self.api.list_records(EntityKind::Decks),
                    self.api.list_records(EntityKind::Categories),
                    self.api.list_records(EntityKind::Cards),
                )?;
                self.table.set_lookup(card_content::CATEGORY_LOOKUP, card_content::category_lookup(&categories));
                self.table.set_lookup(
                    card_content::CATEGORY_DECK_LOOKUP,
                    card_content::category_deck_lookup(&categories, &decks),
                );
                Ok(cards)
            }
            kind => self.api.list_records(kind).await,
        }
    }

    /// Lookups built from this screen's own records
    fn refresh_own_lookups(&mut self) {
        if self.kind == EntityKind::Admins {
            self.table.set_lookup(admin::CREATOR_LOOKUP, admin::creator_lookup(self.source.records()));
        }
    }

    async fn refetch(&mut self) {
        match self.api.list_records(self.kind).await {
            Ok(records) => {
                self.source.replace(records);
                self.refresh_own_lookups();
            }
            Err(e) => tracing::warn!("Refetching {} after a change failed: {}", self.kind, e),
        }
    }

    // ========================================
    // Mutations
    // ========================================

    pub async fn create<I>(&mut self, input: &I) -> Result<Record>
    where
        I: serde::Serialize + Validate,
    {
        let record = match self.api.create_record(self.kind, input).await {
            Ok(record) => record,
            Err(e) => return self.fail(Operation::Create, e),
        };

        match self.kind.insert_position() {
            InsertPosition::Prepend => self.source.prepend(record.clone()),
            InsertPosition::Append => self.source.append(record.clone()),
            InsertPosition::Refetch => self.refetch().await,
        }
        self.refresh_own_lookups();
        self.notifier.success(self.kind.success_message(Operation::Create));
        Ok(record)
    }

    pub async fn update<I>(&mut self, id: &str, input: &I) -> Result<Record>
    where
        I: serde::Serialize + Validate,
    {
        let current = match self.require(id) {
            Ok(current) => current,
            Err(e) => return self.fail(Operation::Update, e),
        };
        match self.api.update_record(self.kind, &current, input).await {
            Ok(record) => Ok(self.apply_update(Operation::Update, record).await),
            Err(e) => self.fail(Operation::Update, e),
        }
    }

    pub async fn delete(&mut self, id: &str) -> Result<()> {
        if let Err(e) = self.api.delete_record(self.kind, id).await {
            return self.fail(Operation::Delete, e);
        }
        self.source.remove_by_id(id);
        self.refresh_own_lookups();
        self.notifier.success(self.kind.success_message(Operation::Delete));
        Ok(())
    }

    /// Deck or category active toggle
    pub async fn set_active(&mut self, id: &str, active: bool) -> Result<Record> {
        let result = match self.require(id) {
            Ok(current) => self.api.set_active(self.kind, &current, active).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(record) => Ok(self.apply_update(Operation::StatusChange, record).await),
            Err(e) => self.fail(Operation::StatusChange, e),
        }
    }

    pub async fn set_card_status(&mut self, id: &str, status: CardStatus) -> Result<Record> {
        if self.kind != EntityKind::Cards {
            return self.fail(Operation::StatusChange, AdminError::forbidden("Only cards have a publication status"));
        }
        match self.api.update_card_status(id, status).await {
            Ok(record) => Ok(self.apply_update(Operation::StatusChange, record).await),
            Err(e) => self.fail(Operation::StatusChange, e),
        }
    }

    /// Admin role change; non-SuperAdmin sessions get an info notice and no request is made
    pub async fn change_role(&mut self, id: &str, role: Role) -> Result<Record> {
        let result = match self.require(id) {
            Ok(current) => self.api.change_admin_role(&current, role).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(record) => Ok(self.apply_update(Operation::StatusChange, record).await),
            Err(e) => self.fail(Operation::StatusChange, e),
        }
    }

    async fn apply_update(&mut self, operation: Operation, record: Record) -> Record {
        if self.kind.insert_position() == InsertPosition::Refetch {
            self.refetch().await;
        } else if !self.source.replace_by_id(record.clone()) {
            tracing::debug!("Updated {} record was not in the current list", self.kind);
        }
        self.refresh_own_lookups();
        self.notifier.success(self.kind.success_message(operation));
        record
    }

    // ========================================
    // KPIs
    // ========================================

    pub fn kpis(&self) -> Kpis {
        let records = self.source.records();
        let total = records.len();
        let active = match self.kind {
            EntityKind::Decks | EntityKind::Categories => Some(count_active(records, "status")),
            EntityKind::Cards => Some(
                records.iter().filter(|r| r.text("status") == CardStatus::Published.as_str()).count(),
            ),
            EntityKind::Users => {
                Some(records.iter().filter(|r| r.text("status").eq_ignore_ascii_case("active")).count())
            }
            EntityKind::Admins => None,
        };
        Kpis { total, active, inactive: active.map(|a| total - a) }
    }
}
