use crate::models::{Book, BookInput, User};
use bcrypt::{hash, DEFAULT_COST};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// SQLite-backed book storage. The connection is shared behind a mutex;
/// handlers run statements on the blocking pool.
#[derive(Clone)]
pub struct BookStore {
    conn: Arc<Mutex<Connection>>,
}

impl BookStore {
    pub fn open(path: &str) -> Result<Self, rusqlite::Error> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, rusqlite::Error> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS books (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                author TEXT NOT NULL,
                year INTEGER
            );",
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn insert(&self, book: &BookInput) -> Result<i64, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO books (name, author, year) VALUES (?1, ?2, ?3)",
            params![book.name, book.author, book.year],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn list(&self) -> Result<Vec<Book>, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id, name, author, year FROM books")?;
        let rows = stmt.query_map([], |row| {
            Ok(Book {
                id: row.get(0)?,
                name: row.get(1)?,
                author: row.get(2)?,
                year: row.get(3)?,
            })
        })?;
        rows.collect()
    }

    pub fn get(&self, id: i64) -> Result<Option<Book>, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT id, name, author, year FROM books WHERE id = ?1",
            [id],
            |row| {
                Ok(Book {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    author: row.get(2)?,
                    year: row.get(3)?,
                })
            },
        )
        .optional()
    }

    /// Returns the number of rows changed.
    pub fn update(&self, id: i64, book: &BookInput) -> Result<usize, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE books SET name = ?1, author = ?2, year = ?3 WHERE id = ?4",
            params![book.name, book.author, book.year, id],
        )
    }

    /// Returns the number of rows deleted.
    pub fn delete(&self, id: i64) -> Result<usize, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM books WHERE id = ?1", [id])
    }
}

/// Fixed username -> password mapping, provisioned at startup and read-only
/// afterwards. Passwords are stored bcrypt-hashed.
#[derive(Clone)]
pub struct Credentials {
    users: HashMap<String, User>,
}

impl Credentials {
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
        }
    }

    pub fn add_user(&mut self, username: &str, password: &str) -> Result<(), bcrypt::BcryptError> {
        let hashed = hash(password, DEFAULT_COST)?;
        let user = User {
            username: username.to_string(),
            password_hash: hashed,
        };
        self.users.insert(username.to_string(), user);
        Ok(())
    }

    pub fn get(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }
}
