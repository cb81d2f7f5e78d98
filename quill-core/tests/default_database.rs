//! The process-wide default database can only be installed once, so these
//! checks live in their own test binary and run in sequence.

use std::sync::{Arc, Mutex};

use futures::future::{BoxFuture, FutureExt};
use quill_core::{
    from, set_default_database, BoundStatement, Database, Error, Options, PreparedStatement,
    Query, Result, Row, RunResult, Value,
};

#[derive(Clone, Default)]
struct Recorder {
    name: &'static str,
    calls: Arc<Mutex<Vec<String>>>,
}

struct Statement {
    recorder: Recorder,
    sql: String,
}

impl Database for Recorder {
    fn prepare(&self, sql: &str) -> Result<Box<dyn PreparedStatement>> {
        Ok(Box::new(Statement {
            recorder: self.clone(),
            sql: sql.to_string(),
        }))
    }
}

impl PreparedStatement for Statement {
    fn bind(self: Box<Self>, _parameters: Vec<Value>) -> Box<dyn BoundStatement> {
        self
    }
}

impl Statement {
    fn record(&self) -> Row {
        self.recorder.calls.lock().unwrap().push(self.sql.clone());
        let mut row = Row::new();
        row.insert("client".to_string(), self.recorder.name.into());
        row
    }
}

impl BoundStatement for Statement {
    fn all(self: Box<Self>) -> BoxFuture<'static, Result<Vec<Row>>> {
        async move { Ok(vec![self.record()]) }.boxed()
    }

    fn first(self: Box<Self>) -> BoxFuture<'static, Result<Option<Row>>> {
        async move { Ok(Some(self.record())) }.boxed()
    }

    fn run(self: Box<Self>) -> BoxFuture<'static, Result<RunResult>> {
        async move {
            self.record();
            Ok(RunResult::default())
        }
        .boxed()
    }
}

#[tokio::test]
async fn test_default_database_lifecycle() {
    // Nothing configured yet
    let err = from("users").all().await.unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));

    let global = Recorder {
        name: "global",
        ..Recorder::default()
    };
    set_default_database(Arc::new(global.clone())).unwrap();

    // Chains without their own client use the default
    let rows = from("users").where_(("id", "=", 1)).all().await.unwrap();
    assert_eq!(rows[0]["client"], "global");
    assert_eq!(global.calls.lock().unwrap()[0], "SELECT * FROM users WHERE id = ?");

    // A chain's own client wins over the default
    let local = Recorder {
        name: "local",
        ..Recorder::default()
    };
    let query = Query::with_options(Options::new().database(Arc::new(local.clone())));
    let row = query.from("users").first().await.unwrap().unwrap();
    assert_eq!(row["client"], "local");
    assert_eq!(global.calls.lock().unwrap().len(), 1);

    // The default is never rebound
    let err = set_default_database(Arc::new(Recorder::default())).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    let row = from("users").first().await.unwrap().unwrap();
    assert_eq!(row["client"], "global");
}
