//! Parse an incoming request (method, path and body) into an [`Action`].
//!
//! The query grammar is tried first, for `GET` requests only. If the path is
//! not shaped like a query, the CRUD grammar is tried. Anything else is
//! [`Action::Unknown`].

pub mod conditions;
pub mod segments;

use serde::Serialize;

pub use conditions::{Around, Condition, Conditions, Point};

/// What a request asks for. Each variant carries exactly the fields its action
/// requires.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Action {
    Query {
        database: String,
        table: String,
        conditions: Conditions,
    },
    Create {
        database: String,
        table: String,
        body: String,
    },
    Read {
        database: String,
        table: String,
        id: String,
    },
    Update {
        database: String,
        table: String,
        id: String,
        body: String,
    },
    Delete {
        database: String,
        table: String,
        id: String,
    },
    Unknown,
}

impl Action {
    /// The action's name, as serialized.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Query { .. } => "query",
            Action::Create { .. } => "create",
            Action::Read { .. } => "read",
            Action::Update { .. } => "update",
            Action::Delete { .. } => "delete",
            Action::Unknown => "unknown",
        }
    }

    /// The database the action addresses, if any.
    pub fn database(&self) -> Option<&str> {
        match self {
            Action::Query { database, .. }
            | Action::Create { database, .. }
            | Action::Read { database, .. }
            | Action::Update { database, .. }
            | Action::Delete { database, .. } => Some(database),
            Action::Unknown => None,
        }
    }

    /// The table the action addresses, if any.
    pub fn table(&self) -> Option<&str> {
        match self {
            Action::Query { table, .. }
            | Action::Create { table, .. }
            | Action::Read { table, .. }
            | Action::Update { table, .. }
            | Action::Delete { table, .. } => Some(table),
            Action::Unknown => None,
        }
    }
}

/// Parse a request. Total: malformed input gives [`Action::Unknown`].
pub fn parse(method: &str, path: &str, body: &str) -> Action {
    let Some(segments) = segments::split(path) else {
        return Action::Unknown;
    };
    let [database, table, rest @ ..] = segments.as_slice() else {
        return Action::Unknown;
    };

    if method == "GET" {
        match conditions::parse(rest) {
            conditions::ConditionsParse::Parsed(conditions) => {
                return match (segments::decode(database), segments::decode(table)) {
                    (Some(database), Some(table)) => Action::Query {
                        database,
                        table,
                        conditions,
                    },
                    _ => Action::Unknown,
                };
            }
            conditions::ConditionsParse::Invalid => return Action::Unknown,
            conditions::ConditionsParse::NoMatch => {}
        }
    }

    parse_crud(method, database, table, rest, body).unwrap_or(Action::Unknown)
}

/// `/{database}/{table}{/{id}}?`, with the action taken from the method.
/// Empty fields count as absent, and the fields present must be exactly the
/// ones the action requires.
fn parse_crud(
    method: &str,
    database: &str,
    table: &str,
    rest: &[&str],
    body: &str,
) -> Option<Action> {
    let database = segments::decode_non_empty(database)?;
    let table = segments::decode_non_empty(table)?;
    let id = match rest {
        [] => None,
        [id] => Some(segments::decode(id)?).filter(|id| !id.is_empty()),
        _ => return None,
    };
    let body = Some(body.to_string()).filter(|body| !body.is_empty());

    match (method, id, body) {
        ("GET", Some(id), None) => Some(Action::Read {
            database,
            table,
            id,
        }),
        ("POST", None, Some(body)) => Some(Action::Create {
            database,
            table,
            body,
        }),
        ("DELETE", Some(id), None) => Some(Action::Delete {
            database,
            table,
            id,
        }),
        ("PUT", Some(id), Some(body)) => Some(Action::Update {
            database,
            table,
            id,
            body,
        }),
        _ => None,
    }
}
