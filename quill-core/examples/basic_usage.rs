use quill_core::{delete_from, from, insert_into, op, update, ClauseStyle, Options, Query, Record};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // SELECT with a join
    let select_query = from("shaders")
        .select("shaders.*, users.name as user_name")
        .left_join("users")
        .on("shaders.user_id", "=", "users.id")
        .where_(("shaders.id", op::GT, 10))
        .order_by("shaders.id DESC")
        .limit(20);

    println!("SELECT SQL: {}", select_query.to_sql());
    println!("Parameters: {:?}", select_query.parameters());

    // Partial queries can be shared, every call returns a new query
    let users = from("users");
    let active = users.where_(("active", "=", 1));
    let admins = users.where_(("role", "=", "admin"));
    println!("Active SQL: {}", active.to_sql());
    println!("Admins SQL: {}", admins.to_sql());

    // INSERT, values are always bound
    let record = Record::new()
        .field("name", "John Doe")
        .field("email", "john@example.com")
        .field("age", 30);
    let insert_query = insert_into("users", record);
    println!("INSERT SQL: {}", insert_query.to_sql());
    println!("Parameters: {:?}", insert_query.parameters());

    // UPDATE needs set() and where_() (or force())
    let update_query = update("users")
        .set([("email", "newemail@example.com")])
        .where_(("id", "=", 123))
        .and(("active", "=", 1))?;
    update_query.validate()?;
    println!("UPDATE SQL: {}", update_query.to_sql());

    // DELETE without a guard is rejected before it reaches the database
    let unguarded = delete_from("users");
    if let Err(e) = unguarded.validate() {
        println!("Rejected: {}", e);
    }

    let delete_query = delete_from("users")
        .where_(("age", op::LT, 13))
        .or(("last_login", op::LT, "2020-01-01"))?;
    println!("DELETE SQL: {}", delete_query.to_sql());

    // Inline clause style writes checked identifiers into the SQL text
    let inline = Query::with_options(Options::new().clause_style(ClauseStyle::Inline));
    let report = inline
        .from("shaders")
        .select("user_id, COUNT(*) as total")
        .group_by("user_id")
        .having("COUNT(*) > 5")
        .order_by("total DESC");
    report.validate()?;
    println!("Inline SQL: {}", report.to_sql());

    Ok(())
}
