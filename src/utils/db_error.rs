//! Classification of PostgreSQL errors raised by the click log.

/// Foreign key guarding `link_clicks.short_code`.
pub const CLICK_LINK_CONSTRAINT: &str = "link_clicks_short_code_fkey";

/// Returns true if `e` reports a click for a short code that has no link.
pub fn is_missing_link_violation(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_foreign_key_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(CLICK_LINK_CONSTRAINT))
}
