//! Read the record a `create` or `update` request body describes.
//!
//! A body is either a GeoJSON Feature (`properties` and an optional
//! `geometry`) or a bare object of fields.

use query_engine_metadata::metadata::database;

use super::super::error::Error;

/// The fields and geometry of a record to write.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Property values keyed by column name, in body order.
    pub properties: serde_json::Map<String, serde_json::Value>,
    /// `None` when the body says nothing about the geometry, `Some(None)` when
    /// it sets the geometry to null.
    pub geometry: Option<Option<serde_json::Value>>,
}

/// Parse a request body into a record for the given table.
pub fn parse_record(body: &str, columns: &database::TableColumns) -> Result<Record, Error> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|err| Error::InvalidBody(err.to_string()))?;
    let serde_json::Value::Object(mut object) = value else {
        return Err(Error::InvalidBody("expected a JSON object".to_string()));
    };

    let geometry_column = columns.geometry_column().map(|column| column.name.as_str());

    let (mut properties, geometry) = if is_feature(&object) {
        let properties = match object.remove("properties") {
            None | Some(serde_json::Value::Null) => serde_json::Map::new(),
            Some(serde_json::Value::Object(properties)) => properties,
            Some(_) => {
                return Err(Error::InvalidBody(
                    "feature properties must be an object".to_string(),
                ))
            }
        };
        (properties, object.remove("geometry"))
    } else {
        let geometry = geometry_column.and_then(|name| object.remove(name));
        (object, geometry)
    };

    // the geometry is only ever written from the feature geometry
    if let Some(name) = geometry_column {
        properties.remove(name);
    }

    let geometry = geometry.map(|geometry| match geometry {
        serde_json::Value::Null => None,
        geometry => Some(geometry),
    });
    if matches!(geometry, Some(Some(_))) && geometry_column.is_none() {
        return Err(Error::NoGeometryColumn(columns.table.clone()));
    }

    Ok(Record {
        properties,
        geometry,
    })
}

fn is_feature(object: &serde_json::Map<String, serde_json::Value>) -> bool {
    object.get("type").and_then(serde_json::Value::as_str) == Some("Feature")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(with_geometry: bool) -> database::TableColumns {
        let mut catalog = vec![
            database::CatalogColumn {
                column_name: "id".to_string(),
                udt_name: "int4".to_string(),
                is_primary_key: true,
            },
            database::CatalogColumn {
                column_name: "name".to_string(),
                udt_name: "varchar".to_string(),
                is_primary_key: false,
            },
        ];
        if with_geometry {
            catalog.push(database::CatalogColumn {
                column_name: "the_geom".to_string(),
                udt_name: "geometry".to_string(),
                is_primary_key: false,
            });
        }
        database::TableColumns::classify("public", "places", catalog)
    }

    #[test]
    fn reads_a_feature() {
        let record = parse_record(
            r#"{"type":"Feature","properties":{"name":"new point","the_geom":"x"},"geometry":{"type":"Point","coordinates":[143.5,-38.3]}}"#,
            &table(true),
        )
        .unwrap();
        assert_eq!(
            serde_json::Value::Object(record.properties),
            json!({"name": "new point"})
        );
        assert_eq!(
            record.geometry,
            Some(Some(json!({"type": "Point", "coordinates": [143.5, -38.3]})))
        );
    }

    #[test]
    fn reads_a_bare_object() {
        let record = parse_record(r#"{"name":"x","the_geom":null}"#, &table(true)).unwrap();
        assert_eq!(
            serde_json::Value::Object(record.properties),
            json!({"name": "x"})
        );
        assert_eq!(record.geometry, Some(None));
    }

    #[test]
    fn geometry_needs_a_geometry_column() {
        assert_eq!(
            parse_record(
                r#"{"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[1,2]}}"#,
                &table(false)
            ),
            Err(Error::NoGeometryColumn("places".to_string()))
        );
    }

    #[test]
    fn rejects_non_objects() {
        assert!(matches!(
            parse_record("[1]", &table(true)),
            Err(Error::InvalidBody(_))
        ));
        assert!(matches!(
            parse_record("{", &table(true)),
            Err(Error::InvalidBody(_))
        ));
    }
}
