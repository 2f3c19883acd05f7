use crate::store::{escape_literal, SqlDialect, Statement, LIKE_ESCAPE};

pub const DESCRIPTION_PLACEHOLDER: &str = "filtro";

pub fn build_filtered_statement(
    dialect: SqlDialect,
    base_query: &str,
    column: Option<&str>,
    substring: &str,
) -> Statement {
    let column = column.filter(|value| !value.trim().is_empty());
    let (Some(column), false) = (column, substring.trim().is_empty()) else {
        return Statement::new(base_query);
    };
    if base_query.trim().is_empty() {
        return Statement::new(base_query);
    }

    let target = format!("T.{}", dialect.quote_identifier(column));
    let sql = format!(
        "select * from ({base_query}) T where lower({}) like ? escape '{LIKE_ESCAPE}'",
        dialect.text_of(&target)
    );
    Statement::new(sql).bind(dialect.contains_pattern(substring))
}

pub fn substitute_placeholder(query: &str, value: &str) -> Option<Statement> {
    if query.trim().is_empty() {
        return None;
    }
    let quoted = format!("'{DESCRIPTION_PLACEHOLDER}'");
    let literal = escape_literal(value);
    let mut sql = String::with_capacity(query.len());
    let mut params = Vec::new();
    for (index, segment) in query.split(quoted.as_str()).enumerate() {
        if index > 0 {
            sql.push('?');
            params.push(value.to_string());
        }
        sql.push_str(&segment.replace(DESCRIPTION_PLACEHOLDER, &literal));
    }
    Some(Statement { sql, params })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hana_filter_wraps_base_query() {
        let statement = build_filtered_statement(
            SqlDialect::Hana,
            "select Code, Name from items",
            Some("Name"),
            "ALP",
        );
        assert_eq!(
            statement.sql,
            "select * from (select Code, Name from items) T \
             where lower(to_nvarchar(T.\"Name\")) like ? escape '\\'"
        );
        assert_eq!(statement.params, vec!["%alp%".to_string()]);
    }

    #[test]
    fn sql_server_filter_casts_and_brackets_column() {
        let statement =
            build_filtered_statement(SqlDialect::SqlServer, "select 1 as [a]", Some("we]ird"), "o'k");
        assert_eq!(
            statement.sql,
            "select * from (select 1 as [a]) T \
             where lower(cast(T.[we]]ird] as nvarchar(max))) like ? escape '\\'"
        );
        assert_eq!(statement.params, vec!["%o'k%".to_string()]);
    }

    #[test]
    fn blank_inputs_return_base_query() {
        let base = "select Code from items";
        for (column, substring) in [(Some("Code"), ""), (Some("Code"), "  "), (None, "x"), (Some(" "), "x")] {
            let statement = build_filtered_statement(SqlDialect::Hana, base, column, substring);
            assert_eq!(statement.sql, base);
            assert!(statement.params.is_empty());
        }
    }

    #[test]
    fn quoted_placeholder_becomes_bound_parameter() {
        let statement =
            substitute_placeholder("select Name from items where Code = 'filtro'", "O'Neil")
                .expect("statement");
        assert_eq!(statement.sql, "select Name from items where Code = ?");
        assert_eq!(statement.params, vec!["O'Neil".to_string()]);
    }

    #[test]
    fn bare_placeholder_is_escaped_inline() {
        let statement =
            substitute_placeholder("select Name from items where Code like '%filtro%'", "O'N")
                .expect("statement");
        assert_eq!(
            statement.sql,
            "select Name from items where Code like '%O''N%'"
        );
        assert!(statement.params.is_empty());
        assert!(substitute_placeholder("  ", "x").is_none());
    }
}
