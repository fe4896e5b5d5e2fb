//! # テスト用モックリポジトリ
//!
//! ハンドラテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todo-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use todo_domain::{
    clock::{Clock, SystemClock},
    todo::{Todo, TodoId, TodoTitle},
};

use crate::{error::InfraError, repository::TodoRepository};

// ===== MockTodoRepository =====

/// インメモリの TodoRepository
///
/// 呼び出されたストア操作の回数を記録し、検証前に弾かれた
/// リクエストがストアに到達していないことを確認できる。
/// `set_failing(true)` で全操作がストアエラーを返すようになる。
#[derive(Clone)]
pub struct MockTodoRepository {
    todos:       Arc<Mutex<Vec<Todo>>>,
    store_calls: Arc<AtomicUsize>,
    failing:     Arc<AtomicBool>,
    clock:       Arc<dyn Clock>,
}

impl Default for MockTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTodoRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// 作成日時に使う時計を指定して作成する
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            todos: Arc::new(Mutex::new(Vec::new())),
            store_calls: Arc::new(AtomicUsize::new(0)),
            failing: Arc::new(AtomicBool::new(false)),
            clock,
        }
    }

    /// 事前データを投入する（呼び出し回数には数えない）
    pub fn add_todo(&self, todo: Todo) {
        self.todos.lock().unwrap().push(todo);
    }

    /// 現在格納されている Todo のスナップショット
    pub fn todos(&self) -> Vec<Todo> {
        self.todos.lock().unwrap().clone()
    }

    /// これまでに呼び出されたストア操作の回数
    pub fn store_calls(&self) -> usize {
        self.store_calls.load(Ordering::SeqCst)
    }

    /// 全操作をストアエラーにするかどうかを切り替える
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn begin_call(&self) -> Result<(), InfraError> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(InfraError::dynamo_db("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
    async fn list(&self) -> Result<Vec<Todo>, InfraError> {
        self.begin_call()?;
        Ok(self.todos())
    }

    async fn create(&self, title: TodoTitle, completed: bool) -> Result<Todo, InfraError> {
        self.begin_call()?;
        let todo = Todo::new(TodoId::new(), title, completed, self.clock.now());
        self.todos.lock().unwrap().push(todo.clone());
        Ok(todo)
    }

    async fn update(
        &self,
        id: &TodoId,
        title: &TodoTitle,
        completed: bool,
    ) -> Result<u64, InfraError> {
        self.begin_call()?;
        let mut todos = self.todos.lock().unwrap();
        let Some(pos) = todos.iter().position(|t| t.id() == id) else {
            return Ok(0);
        };
        if todos[pos].title() == title && todos[pos].completed() == completed {
            return Ok(0);
        }
        let current = todos.remove(pos);
        todos.insert(pos, current.with_changes(title.clone(), completed));
        Ok(1)
    }

    async fn delete(&self, id: &TodoId) -> Result<u64, InfraError> {
        self.begin_call()?;
        let mut todos = self.todos.lock().unwrap();
        let before = todos.len();
        todos.retain(|t| t.id() != id);
        Ok((before - todos.len()) as u64)
    }

    async fn check_connection(&self) -> Result<(), InfraError> {
        self.begin_call()
    }
}
