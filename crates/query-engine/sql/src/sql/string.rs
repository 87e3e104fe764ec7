//! Type definitions of a low-level SQL string representation.

/// A SQL string with its bound parameters.
#[derive(Debug, PartialEq)]
pub struct SQL {
    pub sql: String,
    pub params: Vec<Param>,
}

impl Default for SQL {
    fn default() -> Self {
        Self::new()
    }
}

/// A parameter for a parameterized query.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// A literal string
    String(String),
    /// A double precision float
    Float(f64),
    /// A json value, bound as `jsonb`
    Value(serde_json::Value),
}

impl SQL {
    pub fn new() -> SQL {
        SQL {
            sql: String::new(),
            params: vec![],
        }
    }

    /// Append raw SQL syntax. Never pass user input here.
    pub fn append_syntax(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Append a quoted identifier. Embedded double quotes are doubled.
    pub fn append_identifier(&mut self, sql: &str) {
        self.sql.push('"');
        self.sql.push_str(&sql.replace('"', "\"\""));
        self.sql.push('"');
    }

    /// Append a placeholder (`$n`) and record the parameter it refers to.
    pub fn append_param(&mut self, param: Param) {
        self.params.push(param);
        self.sql.push_str(format!("${}", self.params.len()).as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_quoted_and_escaped() {
        let mut sql = SQL::new();
        sql.append_identifier("weird\"; DROP TABLE x; --");
        assert_eq!(sql.sql, "\"weird\"\"; DROP TABLE x; --\"");
    }

    #[test]
    fn params_are_numbered_in_order() {
        let mut sql = SQL::new();
        sql.append_param(Param::String("a".to_string()));
        sql.append_syntax(" = ");
        sql.append_param(Param::Float(1.5));
        assert_eq!(sql.sql, "$1 = $2");
        assert_eq!(
            sql.params,
            vec![Param::String("a".to_string()), Param::Float(1.5)]
        );
    }
}
