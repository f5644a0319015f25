#[cfg(test)]
#[path = "sqlite_test.rs"]
mod tests;

use async_trait::async_trait;
use eyre::{Context, Result};
use tokio_rusqlite::{Connection, OpenFlags, ToSql, named_params};

use crate::models::{ChatTurn, NewTurn, Role};
use crate::storage::Storage;

use super::migration::MIGRATION;

const SELECT_TURNS: &str = "SELECT id, session_id, role, content, sources, created_at FROM turns";

pub struct Sqlite {
    conn: Connection,
}

impl Sqlite {
    pub async fn new(path: Option<&str>) -> Result<Self> {
        let conn = match path {
            Some(path) => Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
            )
            .await
            .wrap_err(format!("opening database path: {}", path))?,
            None => Connection::open_in_memory()
                .await
                .wrap_err("opening in-memory database")?,
        };

        let ret = Self { conn };
        ret.run_migration().await.wrap_err("running migration")?;
        Ok(ret)
    }

    async fn run_migration(&self) -> Result<()> {
        self.conn
            .call(|conn| Ok(conn.execute_batch(MIGRATION)?))
            .await
            .wrap_err("executing migration")?;
        Ok(())
    }

    async fn query_turns(&self, filter: TurnFilter) -> Result<Vec<ChatTurn>> {
        let newest_first = filter.newest_first;
        let turns = self
            .conn
            .call(move |conn| {
                let (query, params) = filter_to_query(&filter);
                let mut stmt = conn.prepare(&query)?;
                let params: Vec<(&str, &dyn ToSql)> =
                    params.iter().map(|(n, v)| (*n, v.as_ref())).collect();
                let mut rows = stmt.query(params.as_slice())?;

                let mut turns = vec![];
                while let Some(row) = rows.next()? {
                    let id: i64 = row.get(0)?;
                    let session_id: String = row.get(1)?;
                    let role: String = row.get(2)?;
                    let content: String = row.get(3)?;
                    let sources: Option<String> = row.get(4)?;
                    let created_at: i64 = row.get(5)?;

                    let role = role
                        .parse::<Role>()
                        .map_err(|err| tokio_rusqlite::Error::Other(err.into()))?;
                    let sources = sources
                        .map(|raw| serde_json::from_str::<Vec<String>>(&raw))
                        .transpose()
                        .map_err(|err| tokio_rusqlite::Error::Other(err.into()))?;
                    let created_at = chrono::DateTime::from_timestamp_millis(created_at).ok_or(
                        tokio_rusqlite::Error::Other(eyre::eyre!("invalid created_at").into()),
                    )?;

                    let turn = match (role, sources) {
                        (Role::Assistant, sources) => {
                            NewTurn::assistant(session_id, content, sources.unwrap_or_default())
                        }
                        (Role::User, _) => NewTurn::user(session_id, content),
                    };
                    turns.push(turn.into_turn(id, created_at));
                }
                Ok(turns)
            })
            .await?;

        if newest_first {
            return Ok(turns.into_iter().rev().collect());
        }
        Ok(turns)
    }
}

#[async_trait]
impl Storage for Sqlite {
    async fn append_turn(&self, turn: NewTurn) -> Result<ChatTurn> {
        let created_at = chrono::Utc::now();
        let sources = turn
            .sources()
            .map(|sources| serde_json::to_string(sources))
            .transpose()
            .wrap_err("encoding sources")?;

        let session_id = turn.session_id().to_string();
        let role = turn.role().as_str();
        let content = turn.content().to_string();
        let timestamp = created_at.timestamp_millis();

        let id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    r#"INSERT INTO turns (session_id, role, content, sources, created_at)
            VALUES (:session_id, :role, :content, :sources, :created_at)
            "#,
                    named_params! {
                        ":session_id": session_id,
                        ":role": role,
                        ":content": content,
                        ":sources": sources,
                        ":created_at": timestamp,
                    },
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .wrap_err("inserting turn")?;

        log::trace!("Stored {} turn {} in session {}", turn.role(), id, turn.session_id());

        // Read back with the stored millisecond precision
        let created_at = chrono::DateTime::from_timestamp_millis(timestamp).unwrap_or(created_at);
        Ok(turn.into_turn(id, created_at))
    }

    async fn list_turns(&self, session_id: Option<&str>) -> Result<Vec<ChatTurn>> {
        let filter = TurnFilter {
            session_id: session_id.map(str::to_string),
            ..Default::default()
        };
        self.query_turns(filter).await.wrap_err("listing turns")
    }

    async fn recent_turns(&self, session_id: &str, limit: usize) -> Result<Vec<ChatTurn>> {
        if limit == 0 {
            return Ok(vec![]);
        }
        let filter = TurnFilter {
            session_id: Some(session_id.to_string()),
            limit: Some(limit),
            newest_first: true,
        };
        self.query_turns(filter)
            .await
            .wrap_err("listing recent turns")
    }
}

#[derive(Debug, Default)]
struct TurnFilter {
    session_id: Option<String>,
    limit: Option<usize>,
    newest_first: bool,
}

fn filter_to_query(filter: &TurnFilter) -> (String, Vec<(&str, Box<dyn ToSql>)>) {
    let mut query = format!("{} WHERE 1=1", SELECT_TURNS);
    let mut params: Vec<(&str, Box<dyn ToSql>)> = vec![];

    if let Some(session_id) = filter.session_id.as_deref() {
        query.push_str(" AND session_id = :session_id");
        params.push((":session_id", Box::new(session_id.to_string())));
    }

    // Turns stored within the same millisecond keep their insertion order
    if filter.newest_first {
        query.push_str(" ORDER BY created_at DESC, id DESC");
    } else {
        query.push_str(" ORDER BY created_at ASC, id ASC");
    }

    if let Some(limit) = filter.limit {
        query.push_str(" LIMIT :limit");
        params.push((":limit", Box::new(limit as i64)));
    }

    (query, params)
}
