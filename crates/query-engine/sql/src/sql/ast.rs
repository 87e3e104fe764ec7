//! Type definitions of a SQL AST representation.

/// A WITH clause
#[derive(Debug, Clone, PartialEq)]
pub struct With {
    pub common_table_expressions: Vec<CommonTableExpression>,
}

/// A single Common Table Expression
#[derive(Debug, Clone, PartialEq)]
pub struct CommonTableExpression {
    pub alias: TableAlias,
    pub statement: CTExpr,
}

/// The 'body' side of a Common Table Expression.
/// Data-modifying statements always carry a RETURNING clause so the outer
/// SELECT can read the affected rows.
#[derive(Debug, Clone, PartialEq)]
pub enum CTExpr {
    Insert(Insert),
    Update(Update),
    Delete(Delete),
}

/// A SELECT clause
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub with: With,
    pub select_list: SelectList,
    pub from: Option<From>,
    pub where_: Where,
    pub order_by: OrderBy,
    pub limit: Limit,
}

/// An INSERT clause
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: TableReference,
    pub alias: TableAlias,
    pub columns: Vec<ColumnName>,
    pub from: InsertFrom,
    pub returning: Returning,
}

/// Source from which values would be inserted.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertFrom {
    Select(Box<Select>),
    DefaultValues,
}

/// A DELETE clause
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub from: From,
    pub where_: Where,
    pub returning: Returning,
}

/// An UPDATE clause
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: TableReference,
    pub alias: TableAlias,
    pub set: Vec<(ColumnName, Expression)>,
    pub from: Option<From>,
    pub where_: Where,
    pub returning: Returning,
}

/// a RETURNING clause
#[derive(Debug, Clone, PartialEq)]
pub struct Returning(pub SelectList);

/// A select list
#[derive(Debug, Clone, PartialEq)]
pub enum SelectList {
    SelectList(Vec<(ColumnAlias, Expression)>),
}

/// A FROM clause
#[derive(Debug, Clone, PartialEq)]
pub enum From {
    /// Select from a table reference
    Table {
        reference: TableReference,
        alias: TableAlias,
    },
    /// Select from a subquery
    Select {
        select: Box<Select>,
        alias: TableAlias,
    },
    /// Convert a json object to a row of the given table type.
    /// Renders as `jsonb_populate_record(NULL::<table>, <expression>)`.
    JsonbPopulateRecord {
        table: TableReference,
        expression: Expression,
        alias: TableAlias,
    },
}

/// A WHERE clause
#[derive(Debug, Clone, PartialEq)]
pub struct Where(pub Expression);

/// An ORDER BY clause
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub elements: Vec<OrderByElement>,
}

/// A single element in an ORDER BY clause
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByElement {
    pub target: Expression,
    pub direction: OrderByDirection,
}

/// A direction for a single ORDER BY element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderByDirection {
    Asc,
}

/// A LIMIT clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limit {
    pub limit: Option<u32>,
}

/// A scalar expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// AND clause
    And {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// A binary operation on two scalar expression
    BinaryOperation {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },
    /// A binary operation on a scalar expression and an array of scalar expressions
    BinaryArrayOperation {
        left: Box<Expression>,
        operator: BinaryArrayOperator,
        right: Vec<Expression>,
    },
    /// A scalar function call
    FunctionCall {
        function: Function,
        args: Vec<Expression>,
    },
    /// `position(<needle> IN <haystack>)`, which has its own call syntax
    Position {
        needle: Box<Expression>,
        haystack: Box<Expression>,
    },
    /// A row_to_json function call
    RowToJson(TableReference),
    /// A column reference
    ColumnReference(ColumnReference),
    /// An irreducible value
    Value(Value),
    Cast {
        expression: Box<Expression>,
        r#type: ScalarType,
    },
}

/// A binary operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    Equals,
    CaseInsensitiveLike,
    /// Full text search match, `@@`
    TextSearchMatch,
    /// PostGIS distance operator, `<->`
    Distance,
}

/// A binary operator when the rhs is an array
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryArrayOperator {
    In,
}

/// A scalar function
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Function {
    Coalesce,
    JsonAgg,
    Lower,
    PlainToTsquery,
    StAsGeoJson,
    StGeomFromGeoJson,
    StMakePoint,
    StSetSrid,
    StDWithin,
    StDistance,
}

/// Value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Rendered inline. Only ever built from an already parsed integer.
    Int8(i64),
    Float8(f64),
    /// The boolean `true`.
    True,
    String(String),
    Null,
    JsonValue(serde_json::Value),
    EmptyJsonArray,
}

/// Scalar type
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarType {
    BaseType(ScalarTypeName),
}

/// Scalar type name. This will always be output as a quoted identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarTypeName(pub String);

/// A database schema name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaName(pub String);

/// A database table name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(pub String);

/// A reference to a table. Used when we want to query it,
/// for example in a FROM clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableReference {
    /// refers to a db table object name
    DBTable {
        schema: SchemaName,
        table: TableName,
    },
    /// refers to an alias we created
    AliasedTable(TableAlias),
}

/// A database table's column name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnName(pub String);

/// A reference to a column. Used when we want to query it,
/// for example in a SELECT list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnReference {
    /// refers to a db column object name
    TableColumn {
        table: TableReference,
        name: ColumnName,
    },
}

/// aliases that we give to relations
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableAlias {
    pub name: String,
}

/// aliases that we give to columns
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnAlias {
    pub name: String,
}
