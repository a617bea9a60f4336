use sqlscribe_core::SqlBuilder;

fn main() {
    let mut builder = SqlBuilder::new();

    // SELECT with a grouped WHERE clause
    builder
        .select_from("users")
        .column("id")
        .column("name")
        .column_as("password_hash", "pass")
        .where_()
        .equal("pass", "64d878e22cd5046d569bf826869034caf5feab24")
        .or_()
        .sub_condition()
        .equal("role", "admin")
        .and_()
        .more_than("age", 18)
        .finish_sub_condition();

    // INSERT, then a second row through find_insert_or_create
    builder
        .insert_into("events")
        .columns(["kind", "payload", "weight"])
        .value("signup")
        .value("first run")
        .value(2.0);

    // UPDATE with overwrite-in-place SET
    builder
        .update("users")
        .set("name", "Jane")
        .set("name", "Joan")
        .where_()
        .equal("id", 123);

    // DELETE
    builder
        .delete_from("sessions")
        .where_()
        .less_than("expires_at", 1700000000);

    if builder.has_errors() {
        for error in builder.errors() {
            eprintln!("builder error: {}", error);
        }
    }

    println!("{}", builder.sql());

    // reuse the INSERT statement for a fresh row
    builder
        .find_insert_or_create("events")
        .clear_values()
        .value("login")
        .value("second run")
        .value(10.0);

    println!("---");
    println!("{}", builder.sql());
}
