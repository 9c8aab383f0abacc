//! Routing of user actions to entity records and persistence calls.
//!
//! The [`Dispatcher`] pairs one table with the [`Entity`] registered for
//! it. For each [`Action`] it first collects the matching
//! [`EntityRecord`] from the user, then checks that the table exists and
//! runs exactly one [`QueryExecutor`] operation. Every failure ends in an
//! [`Outcome::Halted`] so the caller can report it and carry on.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use stockroom_core::{
    BOOK_TABLE, CreateRecord, DeleteRecord, EntityRecord, FieldSchema, FieldType, Prompter,
    SchemaError, SearchRecord, UpdateRecord, Value, book_schema,
};
use stockroom_sqlite::{QueryExecutor, RowSet, SqliteError};
use thiserror::Error;

/// Errors raised while resolving a dispatch request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("No matching action for '{0}'")]
    UnknownAction(String),
}

/// Operations the dispatcher can perform on a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CreateDefaultTable,
    CreateEntity,
    ReadEntity,
    SearchEntity,
    ReadAll,
    UpdateEntity,
    DeleteEntity,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::CreateDefaultTable,
        Action::CreateEntity,
        Action::ReadEntity,
        Action::SearchEntity,
        Action::ReadAll,
        Action::UpdateEntity,
        Action::DeleteEntity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::CreateDefaultTable => "Create Default Table",
            Action::CreateEntity => "Create Entity",
            Action::ReadEntity => "Read Entity",
            Action::SearchEntity => "Search Entity",
            Action::ReadAll => "Read All",
            Action::UpdateEntity => "Update Entity",
            Action::DeleteEntity => "Delete Entity",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Action::ALL.iter().find(|action| action.as_str() == s) {
            Some(action) => Ok(*action),
            None => {
                tracing::error!(action = s, "no matching action");
                Err(DispatchError::UnknownAction(s.to_string()))
            }
        }
    }
}

/// Entity types with a registered schema, keyed by table name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Book,
}

impl Entity {
    /// Finds the entity stored in `table`.
    pub fn from_table(table: &str) -> Option<Self> {
        match table {
            BOOK_TABLE => Some(Entity::Book),
            _ => {
                tracing::error!(table, "table name has not been matched to an entity");
                None
            }
        }
    }

    pub fn schema(self) -> Result<FieldSchema, SchemaError> {
        match self {
            Entity::Book => book_schema(),
        }
    }
}

/// Why an action stopped before producing a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// No entity record was available for the action.
    EntityNotCreated,
    /// The table does not exist, so nothing was attempted.
    TableMissing,
    /// The database file could not be opened.
    ConnectionUnavailable,
    /// The statement was rejected by the database.
    StatementFailed,
    /// Input ended before the record was complete.
    InputClosed,
    /// No entity is registered for the table.
    UnknownTable,
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Halt::EntityNotCreated => "entity was not created",
            Halt::TableMissing => "table does not exist",
            Halt::ConnectionUnavailable => "database could not be opened",
            Halt::StatementFailed => "database rejected the request",
            Halt::InputClosed => "input closed",
            Halt::UnknownTable => "no entity is registered for this table",
        };
        f.write_str(reason)
    }
}

/// Result of one dispatched action.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The table exists, either already or after creation.
    TableReady,
    /// A write ran; `true` when at least one row changed.
    Confirmed(bool),
    /// A read ran; empty when nothing matched.
    Rows(RowSet),
    Halted(Halt),
}

impl Outcome {
    /// Returns `true` only for a write that changed a row.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Outcome::Confirmed(true))
    }
}

/// Runs actions against one table of one database.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    executor: QueryExecutor,
}

impl Dispatcher {
    pub fn new(database: impl AsRef<Path>, table: impl Into<String>) -> Self {
        Self {
            executor: QueryExecutor::new(database, table),
        }
    }

    pub fn database(&self) -> &Path {
        self.executor.database()
    }

    pub fn table(&self) -> &str {
        self.executor.table()
    }

    /// Collects the record `action` needs, prompting the user as required.
    ///
    /// Returns `None` when the table has no entity or input closed early.
    pub fn entity_record<P: Prompter + ?Sized>(
        &self,
        action: Action,
        prompter: &mut P,
    ) -> Option<EntityRecord> {
        self.collect(action, prompter).ok()
    }

    /// Collects a record for `action` and executes it.
    pub fn run<P: Prompter + ?Sized>(&self, action: Action, prompter: &mut P) -> Outcome {
        match self.collect(action, prompter) {
            Ok(record) => self.execute(action, Some(record)),
            Err(halt) => {
                tracing::warn!(table = self.table(), %action, %halt, "entity record not created");
                Outcome::Halted(halt)
            }
        }
    }

    /// Executes `action` with an already collected record.
    ///
    /// The table is verified before anything else. For
    /// [`Action::CreateDefaultTable`] a missing table is created; for every
    /// other action it halts with [`Halt::TableMissing`].
    pub fn execute(&self, action: Action, record: Option<EntityRecord>) -> Outcome {
        let Some(record) = record else {
            tracing::warn!(table = self.table(), %action, "entity record not created");
            return Outcome::Halted(Halt::EntityNotCreated);
        };

        match self.perform(action, record) {
            Ok(outcome) => outcome,
            Err(err) => {
                let halt = if err.is_unavailable() {
                    Halt::ConnectionUnavailable
                } else {
                    Halt::StatementFailed
                };
                tracing::warn!(table = self.table(), %action, error = %err, "action halted");
                Outcome::Halted(halt)
            }
        }
    }

    fn collect<P: Prompter + ?Sized>(
        &self,
        action: Action,
        prompter: &mut P,
    ) -> Result<EntityRecord, Halt> {
        let schema = self.schema()?;

        let record = match action {
            Action::CreateDefaultTable => Ok(EntityRecord::DefineTable(schema)),
            Action::CreateEntity => CreateRecord::collect(&schema, prompter).map(EntityRecord::Create),
            Action::ReadEntity | Action::SearchEntity => {
                SearchRecord::collect(&schema, prompter).map(EntityRecord::Search)
            }
            Action::ReadAll => Ok(EntityRecord::Search(SearchRecord::read_all())),
            Action::UpdateEntity => UpdateRecord::collect(&schema, prompter).map(EntityRecord::Update),
            Action::DeleteEntity => DeleteRecord::collect(&schema, prompter).map(EntityRecord::Delete),
        };

        record.map_err(|_| Halt::InputClosed)
    }

    fn schema(&self) -> Result<FieldSchema, Halt> {
        let entity = Entity::from_table(self.table()).ok_or(Halt::UnknownTable)?;
        entity.schema().map_err(|_| Halt::EntityNotCreated)
    }

    fn perform(&self, action: Action, record: EntityRecord) -> stockroom_sqlite::Result<Outcome> {
        let exists = self.executor.verify_table_exists()?;

        if action == Action::CreateDefaultTable {
            return match record {
                EntityRecord::DefineTable(schema) => {
                    if !exists {
                        tracing::info!(table = self.table(), "creating default table");
                        self.executor.create_table(&schema)?;
                    }
                    Ok(Outcome::TableReady)
                }
                _ => Ok(self.mismatched(action)),
            };
        }

        if !exists {
            tracing::warn!(
                table = self.table(),
                %action,
                "table does not exist, cannot perform action"
            );
            return Ok(Outcome::Halted(Halt::TableMissing));
        }

        match (action, record) {
            (Action::CreateEntity, EntityRecord::Create(create)) => self.insert(create),
            (
                Action::ReadEntity | Action::SearchEntity | Action::ReadAll,
                EntityRecord::Search(search),
            ) => {
                let rows = self.executor.read_rows(
                    &search.projection.columns(),
                    &search.where_fields(),
                    &search.where_values(),
                )?;
                Ok(Outcome::Rows(rows))
            }
            (Action::UpdateEntity, EntityRecord::Update(update)) => {
                let changed = self.executor.update_row(
                    &update.field,
                    &update.key_field,
                    &update.value,
                    &update.key_value,
                )?;
                Ok(Outcome::Confirmed(changed))
            }
            (Action::DeleteEntity, EntityRecord::Delete(delete)) => {
                let removed = self.executor.delete_row(&delete.key_field, &delete.key_value)?;
                Ok(Outcome::Confirmed(removed))
            }
            (action, _) => Ok(self.mismatched(action)),
        }
    }

    /// Inserts a new row, assigning the next key for integer-keyed tables.
    fn insert(&self, mut create: CreateRecord) -> stockroom_sqlite::Result<Outcome> {
        let key = match create.key.take() {
            Some(key) => key,
            None => {
                let schema = self.schema().map_err(|halt| {
                    SqliteError::InvalidRows(format!("cannot resolve primary key: {halt}"))
                })?;
                let pk = schema.primary_key();
                if pk.field_type != FieldType::Integer {
                    return Err(SqliteError::InvalidRows(format!(
                        "no value supplied for {} key '{}'",
                        pk.field_type, pk.name
                    )));
                }
                let last = self.executor.next_primary_key(&pk.name)?;
                Value::Integer(last.saturating_add(1))
            }
        };

        let inserted = self.executor.insert_rows(&[create.into_row(key)])?;
        Ok(Outcome::Confirmed(inserted))
    }

    fn mismatched(&self, action: Action) -> Outcome {
        tracing::error!(table = self.table(), %action, "entity record does not match action");
        Outcome::Halted(Halt::EntityNotCreated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::{Projection, ScriptedPrompter};

    fn dispatcher(dir: &tempfile::TempDir) -> Dispatcher {
        Dispatcher::new(dir.path().join("ebookstore"), "books")
    }

    #[test]
    fn test_action_strings_round_trip() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn test_unknown_action_string() {
        assert_eq!(
            "Drop Table".parse::<Action>(),
            Err(DispatchError::UnknownAction("Drop Table".to_string()))
        );
    }

    #[test]
    fn test_entity_registry() {
        assert_eq!(Entity::from_table("books"), Some(Entity::Book));
        assert_eq!(Entity::from_table("employees"), None);
        assert_eq!(Entity::Book.schema().unwrap().primary_key().name, "id");
    }

    #[test]
    fn test_missing_record_halts() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = dispatcher(&dir).execute(Action::ReadAll, None);
        assert_eq!(outcome, Outcome::Halted(Halt::EntityNotCreated));
    }

    #[test]
    fn test_unknown_table_halts_without_prompting() {
        let dir = tempfile::tempdir().unwrap();
        let dispatcher = Dispatcher::new(dir.path().join("ebookstore"), "employees");
        let mut prompter = ScriptedPrompter::new(["1"]);
        assert_eq!(
            dispatcher.run(Action::DeleteEntity, &mut prompter),
            Outcome::Halted(Halt::UnknownTable)
        );
        assert!(prompter.questions().is_empty());
        assert!(dispatcher.entity_record(Action::ReadAll, &mut prompter).is_none());
    }

    #[test]
    fn test_action_on_missing_table_halts() {
        let dir = tempfile::tempdir().unwrap();
        let mut prompter = ScriptedPrompter::new(["1"]);
        let outcome = dispatcher(&dir).run(Action::DeleteEntity, &mut prompter);
        assert_eq!(outcome, Outcome::Halted(Halt::TableMissing));
    }

    #[test]
    fn test_default_table_is_created_once() {
        let dir = tempfile::tempdir().unwrap();
        let dispatcher = dispatcher(&dir);
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
        assert_eq!(dispatcher.run(Action::CreateDefaultTable, &mut prompter), Outcome::TableReady);
        assert_eq!(dispatcher.run(Action::CreateDefaultTable, &mut prompter), Outcome::TableReady);
        assert_eq!(
            dispatcher.run(Action::ReadAll, &mut prompter),
            Outcome::Rows(RowSet::default())
        );
    }

    #[test]
    fn test_create_assigns_sequential_keys() {
        let dir = tempfile::tempdir().unwrap();
        let dispatcher = dispatcher(&dir);
        let mut prompter = ScriptedPrompter::new([
            "Le Guin", "The Dispossessed", "3",
            "Herbert", "Dune", "0",
        ]);
        dispatcher.run(Action::CreateDefaultTable, &mut prompter);
        assert!(dispatcher.run(Action::CreateEntity, &mut prompter).is_confirmed());
        assert!(dispatcher.run(Action::CreateEntity, &mut prompter).is_confirmed());

        let Outcome::Rows(rows) = dispatcher.run(Action::ReadAll, &mut prompter) else {
            panic!("expected rows");
        };
        let keys: Vec<&Value> = rows.rows.iter().map(|row| &row[0]).collect();
        assert_eq!(keys, vec![&Value::Integer(1), &Value::Integer(2)]);
    }

    #[test]
    fn test_update_and_delete_confirm() {
        let dir = tempfile::tempdir().unwrap();
        let dispatcher = dispatcher(&dir);
        let mut prompter = ScriptedPrompter::new([
            // create
            "A. Author", "Title One", "10",
            // update id 1, option 0 (qty), value 4
            "1", "0", "4",
            // update missing id
            "7", "0", "1",
            // delete id 1
            "1",
        ]);
        dispatcher.run(Action::CreateDefaultTable, &mut prompter);
        dispatcher.run(Action::CreateEntity, &mut prompter);

        assert_eq!(dispatcher.run(Action::UpdateEntity, &mut prompter), Outcome::Confirmed(true));
        assert_eq!(dispatcher.run(Action::UpdateEntity, &mut prompter), Outcome::Confirmed(false));
        assert_eq!(dispatcher.run(Action::DeleteEntity, &mut prompter), Outcome::Confirmed(true));
    }

    #[test]
    fn test_search_by_author() {
        let dir = tempfile::tempdir().unwrap();
        let dispatcher = dispatcher(&dir);
        let mut prompter = ScriptedPrompter::new([
            "A. Author", "Title One", "10",
            // option 1 is author
            "1", "A. Author",
            "1", "Nobody",
        ]);
        dispatcher.run(Action::CreateDefaultTable, &mut prompter);
        dispatcher.run(Action::CreateEntity, &mut prompter);

        let Outcome::Rows(found) = dispatcher.run(Action::SearchEntity, &mut prompter) else {
            panic!("expected rows");
        };
        assert_eq!(
            found.to_table(),
            vec![
                vec!["id", "qty", "author", "title"],
                vec!["1", "10", "A. Author", "Title One"],
            ]
        );
        assert_eq!(
            dispatcher.run(Action::ReadEntity, &mut prompter),
            Outcome::Rows(RowSet::default())
        );
    }

    #[test]
    fn test_closed_input_halts() {
        let dir = tempfile::tempdir().unwrap();
        let dispatcher = dispatcher(&dir);
        let mut prompter = ScriptedPrompter::new(["A. Author"]);
        assert_eq!(
            dispatcher.run(Action::CreateEntity, &mut prompter),
            Outcome::Halted(Halt::InputClosed)
        );
    }

    #[test]
    fn test_dispatcher_targets_configured_table() {
        let dir = tempfile::tempdir().unwrap();
        let dispatcher = dispatcher(&dir);
        assert_eq!(dispatcher.database(), dir.path().join("ebookstore").as_path());
        assert_eq!(dispatcher.table(), "books");
    }

    #[test]
    fn test_projected_search_returns_named_columns() {
        let dir = tempfile::tempdir().unwrap();
        let dispatcher = dispatcher(&dir);
        let mut prompter = ScriptedPrompter::new(["A. Author", "Title One", "10"]);
        dispatcher.run(Action::CreateDefaultTable, &mut prompter);
        dispatcher.run(Action::CreateEntity, &mut prompter);

        let search = SearchRecord {
            projection: Projection::Fields(vec!["title".to_string(), "qty".to_string()]),
            filter: Some(("author".to_string(), Value::from("A. Author"))),
        };
        let Outcome::Rows(found) =
            dispatcher.execute(Action::SearchEntity, Some(EntityRecord::Search(search)))
        else {
            panic!("expected rows");
        };
        assert_eq!(found.header, vec!["title", "qty"]);
        assert_eq!(found.rows, vec![vec![Value::from("Title One"), Value::Integer(10)]]);
    }

    #[test]
    fn test_unopenable_database_halts() {
        let dir = tempfile::tempdir().unwrap();
        let dispatcher = Dispatcher::new(dir.path().join("missing").join("db"), "books");
        assert_eq!(
            dispatcher.execute(Action::ReadAll, Some(EntityRecord::Search(SearchRecord::read_all()))),
            Outcome::Halted(Halt::ConnectionUnavailable)
        );
    }

    #[test]
    fn test_mismatched_record_halts() {
        let dir = tempfile::tempdir().unwrap();
        let dispatcher = dispatcher(&dir);
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
        dispatcher.run(Action::CreateDefaultTable, &mut prompter);
        let outcome = dispatcher.execute(
            Action::DeleteEntity,
            Some(EntityRecord::Search(SearchRecord::read_all())),
        );
        assert_eq!(outcome, Outcome::Halted(Halt::EntityNotCreated));
    }
}
