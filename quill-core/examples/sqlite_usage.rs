use std::sync::Arc;

use quill_core::{ClauseStyle, Options, Query, SqliteDatabase, Table, Value};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Shader {
    id: i64,
    title: String,
    user_id: i64,
}

struct Shaders;

impl Table for Shaders {
    const NAME: &'static str = "shaders";
    type Row = Shader;
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Quill SQLite - Usage Example ===\n");

    let database = SqliteDatabase::connect("sqlite::memory:").await?;
    sqlx::query("CREATE TABLE shaders (id INTEGER PRIMARY KEY, title TEXT NOT NULL, user_id INTEGER NOT NULL)")
        .execute(database.pool())
        .await?;

    let options = Options::new()
        .database(Arc::new(database.clone()))
        .clause_style(ClauseStyle::Inline);
    let shaders = Query::for_table::<Shaders>(options);

    for (title, user_id) in [("plasma", 1), ("tunnel", 2), ("fire", 1)] {
        let result = shaders
            .insert_into("shaders", [("title", Value::from(title)), ("user_id", Value::from(user_id))])
            .run()
            .await?;
        println!("Inserted row {:?}", result.last_insert_id);
    }

    let latest = shaders.order_by("id DESC").limit(2).all().await?;
    println!("Latest: {:?}", latest);

    let renamed = shaders
        .update("shaders")
        .set([("title", "plasma v2")])
        .where_(("title", "=", "plasma"))
        .first()
        .await?;
    println!("Updated: {:?}", renamed);

    for column in shaders.table_info("shaders").await? {
        println!("Column {} {}", column.name, column.column_type);
    }

    Ok(())
}
