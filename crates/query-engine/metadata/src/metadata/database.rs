//! Metadata information regarding the columns of a database table.

use serde::Deserialize;

/// Native type names that mark a column as the table's geometry.
const GEOMETRY_TYPES: [&str; 1] = ["geometry"];
/// Native type names that mark a column as searchable with full text search.
const FULLTEXT_TYPES: [&str; 1] = ["tsvector"];
/// Native type names of the integer family. `is` and `in` compare these numerically.
const INTEGER_TYPES: [&str; 8] = [
    "int2", "int4", "int8", "smallint", "integer", "bigint", "serial", "bigserial",
];

/// The column name used as primary identifier when a table has no primary key.
pub const DEFAULT_ID_COLUMN: &str = "id";

/// The alias under which statements return the geometry column as GeoJSON text.
pub const GEOMETRY_GEOJSON_ALIAS: &str = "geometry_geojson";

/// The spatial reference system of points built from `lon`/`lat` path operands.
pub const WGS84_SRID: i64 = 4326;

/// The semantic category of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnCategory {
    /// The table's spatial column, rendered as the GeoJSON geometry.
    Geometry,
    /// A `tsvector` column, searched with `matches`.
    Fulltext,
    /// Everything else.
    Plain,
}

/// A column of a table, as reported by the database catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    /// The catalog's type name (`udt_name`), e.g. `int4`, `geometry`, `tsvector`.
    pub native_type: String,
    pub category: ColumnCategory,
    pub is_primary_key: bool,
}

impl ColumnDescriptor {
    pub fn is_integer(&self) -> bool {
        is_integer_type(&self.native_type)
    }
}

/// Whether a native type name belongs to the integer family.
pub fn is_integer_type(native_type: &str) -> bool {
    INTEGER_TYPES.contains(&native_type)
}

/// A column as read from the catalog, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogColumn {
    pub column_name: String,
    pub udt_name: String,
    #[serde(default)]
    pub is_primary_key: bool,
}

/// The classified columns of a single table, in ordinal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumns {
    pub schema: String,
    pub table: String,
    pub columns: Vec<ColumnDescriptor>,
}

impl TableColumns {
    /// Classify catalog columns. Only the first geometry-typed column is
    /// recognised as the geometry; later ones are treated as plain.
    pub fn classify(schema: &str, table: &str, catalog: Vec<CatalogColumn>) -> TableColumns {
        let mut seen_geometry = false;
        let columns = catalog
            .into_iter()
            .map(|column| {
                let category = if GEOMETRY_TYPES.contains(&column.udt_name.as_str()) {
                    if seen_geometry {
                        ColumnCategory::Plain
                    } else {
                        seen_geometry = true;
                        ColumnCategory::Geometry
                    }
                } else if FULLTEXT_TYPES.contains(&column.udt_name.as_str()) {
                    ColumnCategory::Fulltext
                } else {
                    ColumnCategory::Plain
                };
                ColumnDescriptor {
                    name: column.column_name,
                    native_type: column.udt_name,
                    category,
                    is_primary_key: column.is_primary_key,
                }
            })
            .collect();

        TableColumns {
            schema: schema.to_string(),
            table: table.to_string(),
            columns,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// The geometry column, if the table has one.
    pub fn geometry_column(&self) -> Option<&ColumnDescriptor> {
        self.columns
            .iter()
            .find(|column| column.category == ColumnCategory::Geometry)
    }

    pub fn fulltext_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.in_category(ColumnCategory::Fulltext)
    }

    pub fn plain_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.in_category(ColumnCategory::Plain)
    }

    /// The columns rendered as GeoJSON properties: plain and full text, in ordinal order.
    pub fn property_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns
            .iter()
            .filter(|column| column.category != ColumnCategory::Geometry)
    }

    /// The column used to address a single row: the primary key, or else a column named `id`.
    pub fn id_column(&self) -> Option<&ColumnDescriptor> {
        self.columns
            .iter()
            .find(|column| column.is_primary_key)
            .or_else(|| self.column(DEFAULT_ID_COLUMN))
    }

    fn in_category(&self, category: ColumnCategory) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns
            .iter()
            .filter(move |column| column.category == category)
    }
}
