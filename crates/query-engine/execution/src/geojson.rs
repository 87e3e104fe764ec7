//! Shape rows returned by the database as GeoJSON.

use query_engine_metadata::metadata::database;
use serde::Serialize;

use crate::error::Error;

/// A GeoJSON document: a single Feature, or a FeatureCollection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(Feature),
    FeatureCollection { features: Vec<Feature> },
}

/// A GeoJSON Feature. The geometry is left out entirely when the row has none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    pub properties: serde_json::Map<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<serde_json::Value>,
}

/// How rows should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    /// Always a FeatureCollection, even when empty.
    Collection,
    /// A single Feature for one row, a FeatureCollection for several, nothing
    /// for none.
    Single,
}

/// Convert rows into GeoJSON of the requested shape.
pub fn assemble(
    rows: Vec<serde_json::Value>,
    columns: &database::TableColumns,
    shape: ResultShape,
) -> Result<Option<GeoJson>, Error> {
    let mut features = rows
        .into_iter()
        .map(|row| row_to_feature(row, columns))
        .collect::<Result<Vec<Feature>, Error>>()?;

    Ok(match shape {
        ResultShape::Collection => Some(GeoJson::FeatureCollection { features }),
        ResultShape::Single => match features.len() {
            0 => None,
            1 => features.pop().map(GeoJson::Feature),
            _ => Some(GeoJson::FeatureCollection { features }),
        },
    })
}

/// Plain and full text columns become properties, in column order. The
/// GeoJSON text of the geometry column becomes the geometry.
fn row_to_feature(
    row: serde_json::Value,
    columns: &database::TableColumns,
) -> Result<Feature, Error> {
    let mut row = match row {
        serde_json::Value::Object(row) => row,
        other => {
            return Err(Error::UnexpectedResult(format!(
                "expected a json object per row, got {other}"
            )))
        }
    };

    let properties = columns
        .property_columns()
        .map(|column| {
            let value = row
                .remove(&column.name)
                .unwrap_or(serde_json::Value::Null);
            (column.name.clone(), value)
        })
        .collect();

    let geometry = match row.remove(database::GEOMETRY_GEOJSON_ALIAS) {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(text)) => Some(
            serde_json::from_str(&text).map_err(|err| Error::InvalidGeometry(err.to_string()))?,
        ),
        Some(other) => return Err(Error::InvalidGeometry(other.to_string())),
    };

    Ok(Feature {
        properties,
        geometry,
    })
}
